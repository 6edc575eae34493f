// src/scrape/scrape.rs
use std::{
    error::Error, thread, time::Duration,
    sync::{ mpsc, Arc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::consts::{ JITTER_MS, REQUEST_PAUSE_MS, WORKERS, region_precincts },
    config::options::Params,
    data::{ RegionData, Settings },
    progress::Progress,
    store::{ FileWriter, write_region },
};

use super::{ bookings, bookings::RegionBundle, rooms, terms, terms::Term };

pub struct RunSummary {
    pub written: Vec<String>,
}

/// Scrape every selected region for the current (or overridden) term
/// and persist each region's dataset as it completes.
///
/// Regions fail independently: a broken page loses that region's file
/// and nothing else.
pub fn scrape_all(
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {

    if let Some(p) = progress.as_deref_mut() {
        p.log("Fetching teaching periods…");
    }
    let doc = terms::fetch()?;
    let term_list = terms::parse_doc(&doc)?;
    let term = terms::current(&term_list, params.term.as_deref())?.clone();
    logf!("Teaching period {} ({} to {})", term.label, term.from_date, term.to_date);
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Teaching period {}", term.label));
    }

    let regions = Arc::new(params.regions.clone());
    let halfhours = params.halfhours;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(regions.len());
    }

    // Concurrency
    type FetchOk = (String, RegionBundle);
    type FetchErr = (String, String);

    let counter = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();

    let workers = WORKERS.min(regions.len()).max(1);

    // Spawn workers

    for _ in 0..workers {
        let regions = Arc::clone(&regions);
        let idx = Arc::clone(&counter);
        let tx = res_tx.clone();
        let term = term.clone();

        thread::spawn(
            move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= regions.len() {
                        break;
                    }
                    let region = regions[i].clone();
                    let result = match scrape_region(&region, &term, halfhours) {
                        Ok(bundle) => Ok((region, bundle)),
                        Err(e) => Err((region, e.to_string())),
                    };
                    let _ = tx.send(result);
                    let jitter = (i as u64) % JITTER_MS;
                    thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
                }
            }
        );
    }
    drop(res_tx); // main thread is sole receiver now

    // Persist results as they come in

    let writer = FileWriter::new(params.out.clone());
    let mut written = Vec::new();

    for _ in 0..regions.len() {
        match res_rx.recv() {
            Ok(Ok((region, bundle))) => {
                let settings = Settings::build(
                    &bundle.starts,
                    &bundle.ends,
                    bundle.data.len(),
                    halfhours,
                    &term,
                );
                let dataset = RegionData(bundle.data, bundle.rooms, settings);
                match write_region(&writer, &region, &dataset) {
                    Ok(location) => {
                        if let Some(p) = progress.as_deref_mut() {
                            p.region_done(&region, &location);
                        }
                        written.push(location);
                    }
                    Err(e) => {
                        if let Some(p) = progress.as_deref_mut() {
                            p.region_failed(&region, &e.to_string());
                        }
                        loge!("Region {region}: {e}");
                    }
                }
            }
            Ok(Err((region, msg))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.region_failed(&region, &msg);
                }
                loge!("Region {region}: {msg}");
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(RunSummary { written })
}

/// One region, start to finish: room search, booking page, parse.
pub fn scrape_region(
    region: &str,
    term: &Term,
    halfhours: bool,
) -> Result<RegionBundle, Box<dyn Error>> {
    let precincts = region_precincts(region)
        .ok_or_else(|| format!("Unknown region: {}", region))?;

    let room_ids = rooms::fetch(precincts)?;
    if room_ids.is_empty() {
        return Err(format!("Region {}: no rooms found", region).into());
    }
    logf!("Region {region}: {} rooms in {}", room_ids.len(), precincts.join(","));

    let page = bookings::fetch(&room_ids, precincts, term)?;
    bookings::parse_doc(&page, halfhours)
}

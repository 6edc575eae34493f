// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::consts::REGIONS;
use crate::config::options::Params;
use crate::progress::Progress;
use crate::scrape;

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut params = Params::new();
    parse_cli(&mut params, env::args().skip(1))?;

    if params.list_regions {
        for region in REGIONS {
            println!("{}", region);
        }
        return Ok(());
    }

    let mut progress = ConsoleProgress;
    let summary = scrape::scrape_all(&params, Some(&mut progress))?;
    if summary.written.is_empty() {
        return Err("No region data written".into());
    }
    Ok(())
}

fn parse_cli<I>(params: &mut Params, mut args: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-r" | "--region" => {
                let v = args.next().ok_or("Missing value for --region")?;
                params.regions = parse_region_list(&v)?; }
            "--term" => {
                let v = args.next().ok_or("Missing value for --term")?;
                params.term = Some(v); }
            "-o" | "--out" => params.out = PathBuf::from(args.next().ok_or("Missing output path")?),
            "--halfhours" => params.halfhours = true,
            "--list-regions" => params.list_regions = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(())
}

fn parse_region_list(s: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim().to_ascii_lowercase();
        if part.is_empty() { continue; }
        if !REGIONS.contains(&part.as_str()) {
            return Err(format!("Unknown region: {} (known: {})", part, REGIONS.join(", ")).into());
        }
        if !out.contains(&part) { out.push(part); }
    }
    if out.is_empty() {
        return Err("Empty region list".into());
    }
    Ok(out)
}

/* ---------------- console progress ---------------- */

struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        eprintln!("Scraping {} region(s)…", total);
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }
    fn region_done(&mut self, region: &str, location: &str) {
        eprintln!("  {} -> {}", region, location);
    }
    fn region_failed(&mut self, region: &str, msg: &str) {
        eprintln!("  {} FAILED: {}", region, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> std::vec::IntoIter<String> {
        args.iter().map(|a| s!(*a)).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn region_lists_parse_and_dedup() {
        assert_eq!(parse_region_list("mid").unwrap(), vec!["mid"]);
        assert_eq!(parse_region_list("Low, top,low").unwrap(), vec!["low", "top"]);
        assert!(parse_region_list("north").is_err());
        assert!(parse_region_list(",").is_err());
    }

    #[test]
    fn args_build_params() {
        let mut params = Params::new();
        parse_cli(&mut params, argv(&["--region", "mid,low", "--halfhours", "-o", "outdir", "--term", "T2"]))
            .unwrap();
        assert_eq!(params.regions, vec!["mid", "low"]);
        assert!(params.halfhours);
        assert_eq!(params.out, PathBuf::from("outdir"));
        assert_eq!(params.term.as_deref(), Some("T2"));
        assert!(!params.list_regions);
    }

    #[test]
    fn defaults_cover_all_regions() {
        let mut params = Params::new();
        parse_cli(&mut params, argv(&[])).unwrap();
        assert_eq!(params.regions, REGIONS.to_vec());
        assert!(!params.halfhours);
    }

    #[test]
    fn unknown_arg_is_an_error() {
        let mut params = Params::new();
        assert!(parse_cli(&mut params, argv(&["--frobnicate"])).is_err());
    }
}

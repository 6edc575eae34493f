// src/store.rs
use std::{error::Error, fs, path::PathBuf};

use crate::data::RegionData;

/// Persistence seam for region datasets. The scraper hands finished
/// JSON to a writer and does not care where it lands; `write` returns
/// the location it wrote to, for reporting.
pub trait Writer {
    fn write(&self, name: &str, content: &str) -> Result<String, Box<dyn Error>>;
}

/// Writes region files into a local directory.
pub struct FileWriter {
    dir: PathBuf,
}

impl FileWriter {
    pub fn new(dir: PathBuf) -> Self {
        FileWriter { dir }
    }
}

impl Writer for FileWriter {
    fn write(&self, name: &str, content: &str) -> Result<String, Box<dyn Error>> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, content)?;
        let location = path.display().to_string();
        logf!("Wrote {} bytes to {}", content.len(), location);
        Ok(location)
    }
}

/// Serialize one region's dataset and hand it to the writer as
/// `<region>.json`.
pub fn write_region(
    w: &dyn Writer,
    region: &str,
    data: &RegionData,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string(data)?;
    w.write(&join!(region, ".json"), &json)
}

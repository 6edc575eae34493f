// src/config/options.rs
use std::path::PathBuf;
use super::consts::{DEFAULT_OUT_DIR, REGIONS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub regions: Vec<String>,     // campus regions to scrape
    pub term: Option<String>,     // term label override, e.g. "T2"
    pub out: PathBuf,             // output directory for region JSON files
    pub halfhours: bool,          // keep half-hour slots instead of whole hours
    pub list_regions: bool,       // list known regions then exit
}

impl Params {
    pub fn new() -> Self {
        Self {
            regions: REGIONS.iter().map(|r| s!(*r)).collect(),
            term: None,
            out: PathBuf::from(DEFAULT_OUT_DIR),
            halfhours: false,
            list_regions: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

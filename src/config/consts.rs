// src/config/consts.rs

// Net config
pub const HOST: &str = "nss.cse.unsw.edu.au";
pub const PREFIX: &str = "/tt/";
pub const PAGE: &str = "view_multirooms.php?dbafile=2021-KENS-COFA.DBA&campus=KENS";

// Room search is fixed to general-purpose tutorial/seminar rooms
pub const ROOM_USAGE: &str = "RU_GP-TUTSEM";

// Campus regions and the precinct codes behind them
pub const REGIONS: [&str; 3] = ["mid", "low", "top"];

pub fn region_precincts(region: &str) -> Option<&'static [&'static str]> {
    match region {
        "low" => Some(&["PR_SQHS", "PR_TETB", "PR_LAW"]),
        "mid" => Some(&["PR_GOLD", "PR_QUAD"]),
        "top" => Some(&["PR_AGSM", "PR_MATHEWS", "PR_MORVENBRN"]),
        _ => None,
    }
}

// Output
pub const DEFAULT_OUT_DIR: &str = "data";

// Concurrency
pub const WORKERS: usize = 3;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite
pub const JITTER_MS: u64 = 100; // extra 0..100 ms

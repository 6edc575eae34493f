// src/scrape/mod.rs
mod scrape;

pub mod bookings;
pub mod rooms;
pub mod terms;

pub use scrape::RunSummary;
pub use scrape::scrape_all;
pub use scrape::scrape_region;

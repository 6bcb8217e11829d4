//! Fufufafa comment archiver library.
//!
//! Drives a single headless Chrome page through a fixed list of forum thread
//! URLs, extracts one comment's text and timestamp from each, captures a
//! cropped screenshot of the comment region, and writes all outcomes to a
//! single JSON file at the end of the run.

pub mod config;
pub mod constants;
pub mod data;
pub mod region;
pub mod results;
pub mod scraper;

//! Page-independent actions
//!
//! - export: write records to CSV + JSON under the data dir

pub mod export;

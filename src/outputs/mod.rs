//! Output generation for completed scrape runs.
//!
//! # Submodules
//!
//! - [`json`]: writes the assembled
//!   [`ScrapeResult`](crate::models::ScrapeResult) to a date-named JSON file
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── 2026-08-24.json
//! └── 2026-08-25.json
//! ```

pub mod json;

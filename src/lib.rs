//! Property valuation dashboard.
//!
//! Loads a CSV of property valuations once at startup, computes summary
//! statistics, builds a declarative view tree (panels, four charts, a data
//! table) and serves it as a single HTML page. All chart rendering and table
//! interaction is delegated to the browser; no request mutates anything.

pub mod charts;
pub mod data;
pub mod server;
pub mod stats;
pub mod view;

/// Relative path of the source CSV.
pub const DATA_FILE: &str = "PROPERTYVALUATIONS.csv";

/// Listen port when the PORT environment variable is absent.
pub const DEFAULT_PORT: u16 = 8050;

//! Data module - CSV loading and column extraction

mod loader;

pub use loader::{Dataset, LoaderError};

/// Column names the dashboard aggregates over. The CSV may carry any number
/// of additional columns; those flow through to the data table untouched.
pub const COL_LOCATION: &str = "Location";
pub const COL_AREA: &str = "Area";
pub const COL_PROPERTY_TYPE: &str = "Property Type";
pub const COL_MARKET_VALUE: &str = "Market Value";
pub const COL_LAND_RATE: &str = "Land Rate";

//! Charts module - declarative Plotly chart specifications

mod builder;

pub use builder::{build_charts, ChartSpec};

//! Chart Builder Module
//! Declares the four dashboard charts as Plotly trace/layout JSON. All
//! rendering, histogram binning and box-whisker math happens in plotly.js on
//! the client; this module only selects and orders the data.

use crate::data::{Dataset, COL_AREA, COL_LOCATION, COL_MARKET_VALUE, COL_PROPERTY_TYPE};
use crate::stats::{group_means, StatsError};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Primary series color, with a palette for multi-slice charts.
pub const BAR_COLOR: &str = "#3498db";

pub const PALETTE: [&str; 10] = [
    "#e74c3c", "#2ecc71", "#9b59b6", "#f39c12", "#1abc9c", "#e91e63", "#00bcd4", "#ff5722",
    "#795548", "#607d8b",
];

/// One chart: an element id for the page, a title, and Plotly-shaped
/// traces + layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub traces: Vec<Value>,
    pub layout: Value,
}

impl ChartSpec {
    fn new(id: &str, title: &str, traces: Vec<Value>, layout: Value) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            traces,
            layout,
        }
    }
}

/// Build the four charts in dashboard order: bar, box, histogram, pie.
pub fn build_charts(dataset: &Dataset) -> Result<Vec<ChartSpec>, StatsError> {
    Ok(vec![
        bar_by_location(dataset)?,
        box_by_area(dataset)?,
        market_value_histogram(dataset)?,
        pie_by_property_type(dataset)?,
    ])
}

/// Bar chart: mean Market Value per Location, bars in ascending key order.
fn bar_by_location(dataset: &Dataset) -> Result<ChartSpec, StatsError> {
    let means = group_means(dataset, COL_LOCATION, COL_MARKET_VALUE)?;
    let locations: Vec<&str> = means.iter().map(|(k, _)| k.as_str()).collect();
    let values: Vec<f64> = means.iter().map(|(_, v)| *v).collect();

    Ok(ChartSpec::new(
        "bar-location",
        "Average Market Value by Location",
        vec![json!({
            "type": "bar",
            "x": locations,
            "y": values,
            "marker": { "color": BAR_COLOR },
        })],
        json!({
            "xaxis": { "title": COL_LOCATION },
            "yaxis": { "title": COL_MARKET_VALUE },
        }),
    ))
}

/// Box plot: Market Value distribution grouped by Area. A single trace with
/// row-aligned category/value arrays; plotly groups the boxes by x value.
fn box_by_area(dataset: &Dataset) -> Result<ChartSpec, StatsError> {
    let areas = dataset.category_column(COL_AREA)?;
    let market_values = dataset.numeric_column(COL_MARKET_VALUE)?;

    let (x, y): (Vec<String>, Vec<f64>) = areas
        .into_iter()
        .zip(market_values)
        .filter_map(|(area, value)| Some((area?, value?)))
        .unzip();

    Ok(ChartSpec::new(
        "box-area",
        "Market Value Distribution by Area",
        vec![json!({
            "type": "box",
            "x": x,
            "y": y,
            "marker": { "color": BAR_COLOR },
        })],
        json!({
            "xaxis": { "title": COL_AREA },
            "yaxis": { "title": COL_MARKET_VALUE },
        }),
    ))
}

/// Histogram of Market Value, 20 bins across the observed range. Binning is
/// delegated to plotly via nbinsx.
fn market_value_histogram(dataset: &Dataset) -> Result<ChartSpec, StatsError> {
    let values: Vec<f64> = dataset
        .numeric_column(COL_MARKET_VALUE)?
        .into_iter()
        .flatten()
        .collect();

    Ok(ChartSpec::new(
        "histogram-market",
        "Market Value Distribution",
        vec![json!({
            "type": "histogram",
            "x": values,
            "nbinsx": 20,
            "marker": { "color": BAR_COLOR },
        })],
        json!({
            "xaxis": { "title": COL_MARKET_VALUE },
            "yaxis": { "title": "Count" },
        }),
    ))
}

/// Pie chart: record count per Property Type, slices ordered by descending
/// count with ties broken by label.
fn pie_by_property_type(dataset: &Dataset) -> Result<ChartSpec, StatsError> {
    let types = dataset.category_column(COL_PROPERTY_TYPE)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for property_type in types.into_iter().flatten() {
        *counts.entry(property_type).or_insert(0) += 1;
    }

    let mut slices: Vec<(String, usize)> = counts.into_iter().collect();
    slices.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let labels: Vec<&str> = slices.iter().map(|(label, _)| label.as_str()).collect();
    let values: Vec<usize> = slices.iter().map(|(_, count)| *count).collect();

    Ok(ChartSpec::new(
        "pie-type",
        "Property Type Proportion",
        vec![json!({
            "type": "pie",
            "labels": labels,
            "values": values,
            "marker": { "colors": PALETTE },
        })],
        json!({}),
    ))
}

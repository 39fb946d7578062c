//! Scenario tests: load a known CSV, check the summary, the chart data and
//! the served page against hand-computed values.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use propdash::data::Dataset;
use propdash::server::router;
use propdash::stats::{group_means, Summary};
use propdash::view::{build_view, DashboardView, PAGE_SIZE};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use tower::util::ServiceExt;

const SAMPLE_CSV: &str = "\
Location,Area,Property Type,Market Value,Land Rate
A,X,House,100000,50
A,Y,Flat,200000,60
B,X,House,300000,70
";

/// Write CSV content to a scratch file and keep the handle alive so the file
/// survives until the test is done with it.
fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp csv");
    file.flush().expect("flush temp csv");
    file
}

fn load(file: &NamedTempFile) -> Dataset {
    Dataset::load(file.path().to_str().expect("utf-8 temp path")).expect("load csv")
}

fn sample_view() -> DashboardView {
    let file = write_csv(SAMPLE_CSV);
    let dataset = load(&file);
    let summary = Summary::compute(&dataset).expect("summary");
    build_view(&dataset, &summary).expect("view")
}

#[test]
fn summary_matches_sample_scenario() {
    let file = write_csv(SAMPLE_CSV);
    let dataset = load(&file);
    let summary = Summary::compute(&dataset).expect("summary");

    assert_eq!(summary.count, 3);
    assert!((summary.avg_market_value - 200000.0).abs() < 1e-9);
    assert!((summary.median_market_value - 200000.0).abs() < 1e-9);
    assert!((summary.avg_land_rate - 60.0).abs() < 1e-9);
}

#[test]
fn bar_chart_has_one_bar_per_location() {
    let view = sample_view();
    let bar = &view.charts[0];

    assert_eq!(bar.id, "bar-location");
    assert_eq!(bar.traces[0]["x"], json!(["A", "B"]));
    assert_eq!(bar.traces[0]["y"], json!([150000.0, 300000.0]));
}

#[test]
fn pie_chart_counts_property_types() {
    let view = sample_view();
    let pie = &view.charts[3];

    assert_eq!(pie.id, "pie-type");
    assert_eq!(pie.traces[0]["labels"], json!(["House", "Flat"]));
    assert_eq!(pie.traces[0]["values"], json!([2, 1]));
}

#[test]
fn histogram_requests_twenty_bins_over_all_values() {
    let view = sample_view();
    let histogram = &view.charts[2];

    assert_eq!(histogram.id, "histogram-market");
    assert_eq!(histogram.traces[0]["nbinsx"], json!(20));
    assert_eq!(
        histogram.traces[0]["x"]
            .as_array()
            .expect("histogram values")
            .len(),
        3
    );
}

#[test]
fn box_plot_aligns_area_with_market_value() {
    let view = sample_view();
    let box_plot = &view.charts[1];

    assert_eq!(box_plot.id, "box-area");
    assert_eq!(box_plot.traces[0]["x"], json!(["X", "Y", "X"]));
    assert_eq!(box_plot.traces[0]["y"], json!([100000.0, 200000.0, 300000.0]));
}

#[test]
fn summary_panels_use_thousands_formatting() {
    let view = sample_view();
    let values: Vec<&str> = view.panels.iter().map(|p| p.value.as_str()).collect();

    assert_eq!(values, vec!["3", "200,000.00", "200,000.00", "60.00"]);
}

#[test]
fn table_spec_carries_all_rows_and_columns() {
    let view = sample_view();

    assert_eq!(
        view.table.columns,
        vec![
            "Location",
            "Area",
            "Property Type",
            "Market Value",
            "Land Rate"
        ]
    );
    assert_eq!(view.table.rows.len(), 3);
    assert_eq!(view.table.page_size, PAGE_SIZE);
    assert_eq!(view.table.rows[0]["Location"], json!("A"));
    assert_eq!(view.table.rows[0]["Market Value"], json!(100000));
}

#[test]
fn load_aggregate_build_is_idempotent() {
    let file = write_csv(SAMPLE_CSV);

    let build = || {
        let dataset = load(&file);
        let summary = Summary::compute(&dataset).expect("summary");
        let view = build_view(&dataset, &summary).expect("view");
        serde_json::to_value(&view).expect("serialize view")
    };

    assert_eq!(build(), build());
}

#[test]
fn overall_mean_is_weighted_average_of_group_means() {
    let csv = "\
Location,Area,Property Type,Market Value,Land Rate
A,X,House,120000,50
A,Y,Flat,180000,55
A,X,House,210000,60
B,X,House,320000,70
B,Y,Flat,280000,65
C,Z,Plot,95000,40
C,Z,Plot,105000,45
";
    let file = write_csv(csv);
    let dataset = load(&file);
    let summary = Summary::compute(&dataset).expect("summary");
    let means = group_means(&dataset, "Location", "Market Value").expect("group means");

    let sizes = [("A", 3.0), ("B", 2.0), ("C", 2.0)];
    let weighted: f64 = means
        .iter()
        .map(|(group, mean)| {
            let (_, size) = sizes
                .iter()
                .find(|(name, _)| name == group)
                .expect("known group");
            mean * size
        })
        .sum::<f64>()
        / 7.0;

    assert!((summary.avg_market_value - weighted).abs() / weighted < 1e-9);
}

#[test]
fn null_values_are_skipped_by_mean_but_counted_as_rows() {
    let csv = "\
Location,Area,Property Type,Market Value,Land Rate
A,X,House,100000,50
A,Y,Flat,,60
B,X,House,200000,70
B,Y,Flat,300000,
";
    let file = write_csv(csv);
    let dataset = load(&file);
    let summary = Summary::compute(&dataset).expect("summary");

    assert_eq!(summary.count, 4);
    assert!((summary.avg_market_value - 200000.0).abs() < 1e-9);
    assert!((summary.avg_land_rate - 60.0).abs() < 1e-9);
}

#[test]
fn missing_file_fails_before_anything_serves() {
    let err = Dataset::load("definitely/not/here.csv").expect_err("load must fail");
    assert!(err.to_string().contains("definitely/not/here.csv"));
}

#[test]
fn missing_column_is_a_fatal_error() {
    let csv = "Location,Price\nA,100\n";
    let file = write_csv(csv);
    let dataset = load(&file);

    let err = Summary::compute(&dataset).expect_err("summary must fail");
    assert!(err.to_string().contains("Market Value"));
}

#[tokio::test]
async fn index_page_serves_summary_and_table() {
    let view = sample_view();
    let app = router(&view).expect("router");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");

    assert!(body.contains("Property Valuation Dashboard"));
    assert!(body.contains("200,000.00"));
    assert!(body.contains("60.00"));
    assert!(body.contains("bar-location"));
    assert!(body.contains("\"page_size\":10"));
}

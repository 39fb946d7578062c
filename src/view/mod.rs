//! View module - the declarative dashboard tree

mod builder;

pub use builder::{
    build_view, format_thousands, DashboardView, SummaryPanel, TableSpec, ViewError,
    DASHBOARD_TITLE, PAGE_SIZE,
};

//! Stats module - summary statistics over the dataset

mod calculator;

pub use calculator::{group_means, mean, median, StatsError, Summary};

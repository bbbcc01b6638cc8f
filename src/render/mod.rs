mod chart;

pub use chart::SvgChartRenderer;

use std::path::PathBuf;

use anyhow::Result;

use crate::summary::UrbanizationSummary;

/// A rendered summary chart, and where it was saved if it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub svg: String,
    pub path: Option<PathBuf>,
}

/// Draws the urbanisation summary. Only called when a chart is explicitly requested.
pub trait SummaryRenderer: std::fmt::Debug {
    fn render(&self, summary: &UrbanizationSummary, save: bool) -> Result<Chart>;
}

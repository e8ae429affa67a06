//! PNG charts of census file counts, drawn with [`plotters`] on the bitmap
//! backend (no window system needed).

use plotters::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (1200, 720);

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("failed to prepare output: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// `census_by_state_<STATE>.png`, or `..._all.png` without a state filter.
pub fn state_chart_name(state: Option<&str>) -> String {
    format!("census_by_state_{}.png", state.unwrap_or("all"))
}

/// `census_by_year_<YEAR>.png`, or `..._all.png` without a year filter.
pub fn year_chart_name(year: Option<&str>) -> String {
    format!("census_by_year_{}.png", year.unwrap_or("all"))
}

fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Bar chart of file counts per state.
pub fn plot_files_by_state(counts: &BTreeMap<String, usize>, output_path: &Path) -> Result<()> {
    if counts.is_empty() {
        return Err(PlotError::InvalidData("no state counts to plot".to_string()));
    }
    prepare_output(output_path)?;

    let labels: Vec<&str> = counts.keys().map(|s| s.as_str()).collect();
    let max = counts.values().copied().max().unwrap_or(0);
    let n = labels.len() as u32;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Census Files by State", ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..n).into_segmented(), 0usize..max + max / 10 + 1)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .x_desc("State")
        .y_desc("Number of Census Files")
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(10)
                .data(counts.values().enumerate().map(|(i, c)| (i as u32, *c))),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    tracing::info!("wrote {}", output_path.display());
    Ok(())
}

/// Line chart with point markers of file counts per census year.
///
/// Keys that are not numeric years are ignored.
pub fn plot_files_by_year(counts: &BTreeMap<String, usize>, output_path: &Path) -> Result<()> {
    let points: Vec<(i32, usize)> = counts
        .iter()
        .filter_map(|(year, c)| year.parse::<i32>().ok().map(|y| (y, *c)))
        .collect();
    if points.is_empty() {
        return Err(PlotError::InvalidData("no year counts to plot".to_string()));
    }
    prepare_output(output_path)?;

    let first = points.iter().map(|p| p.0).min().unwrap_or(0);
    let last = points.iter().map(|p| p.0).max().unwrap_or(0);
    let max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Timeline of Census Data Collection", ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d((first - 2)..(last + 2), 0usize..max + max / 10 + 1)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Census Files")
        .x_label_formatter(&|y| y.to_string())
        .label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            BLUE.stroke_width(2),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|p| Circle::new(*p, 6, BLUE.filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    tracing::info!("wrote {}", output_path.display());
    Ok(())
}

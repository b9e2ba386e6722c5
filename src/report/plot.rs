//! SVG histogram plots

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::histogram::Histogram;
use crate::analysis::GroupReport;
use crate::error::{AnalysisError, ErrorCode, ErrorExt, Result};

const PLOT_SIZE: (u32, u32) = (900, 600);

/// File name for a group's plot, derived from its transition label
pub fn plot_file_name(label: Option<&str>) -> String {
    let stem = match label {
        Some(label) => label
            .replace("->", "_to_")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect(),
        None => "all_intervals".to_string(),
    };
    format!("{}.svg", stem)
}

/// Write one SVG histogram per group into `dir`, returning the written paths
pub fn write_group_plots(groups: &[GroupReport], dir: &Path, bins: usize) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AnalysisError::io_with_code(
            ErrorCode::IO_WRITE_FAILED,
            format!("Failed to create plot directory {}", dir.display()),
            Some(dir.to_path_buf()),
        )
        .with_source(e)
    })?;

    groups
        .iter()
        .map(|group| {
            let path = dir.join(plot_file_name(group.label.as_deref()));
            let histogram = Histogram::from_values(&group.values, bins);
            write_histogram_svg(&histogram, &group.title, &path)?;
            debug!("Wrote histogram {}", path.display());
            Ok(path)
        })
        .collect()
}

/// Draw a histogram with "Time difference (s)" on x and "Count" on y
pub fn write_histogram_svg(histogram: &Histogram, title: &str, path: &Path) -> Result<()> {
    let (Some(first), Some(last)) = (histogram.bins.first(), histogram.bins.last()) else {
        return Err(AnalysisError::render_with_code(
            ErrorCode::RENDER_PLOT_FAILED,
            "Histogram has no bins",
        ));
    };
    let y_max = histogram.max_count().max(1) as u32 + 1;

    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .to_render_error("Failed to draw plot background")?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(first.lower..last.upper, 0u32..y_max)
        .to_render_error("Failed to lay out histogram axes")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Time difference (s)")
        .y_desc("Count")
        .draw()
        .to_render_error("Failed to draw histogram axes")?;

    chart
        .draw_series(histogram.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0u32), (bin.upper, bin.count as u32)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .to_render_error("Failed to draw histogram bars")?;

    chart
        .draw_series(histogram.bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0u32), (bin.upper, bin.count as u32)],
                BLACK.stroke_width(1),
            )
        }))
        .to_render_error("Failed to draw histogram edges")?;

    root.present()
        .map_err(|e| {
            AnalysisError::render_with_code(
                ErrorCode::RENDER_PLOT_FAILED,
                format!("Failed to write {}", path.display()),
            )
            .with_source(e)
        })?;
    Ok(())
}

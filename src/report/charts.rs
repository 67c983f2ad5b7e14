//! SVG chart generator for benchmark results
//!
//! Reads the CSV report back, averages the numeric columns per execution
//! mode, and renders two comparison charts: a CPU-vs-inference latency
//! breakdown and a total-latency comparison. Charts are plain SVG written
//! with `std::fs`, suitable for reports and presentations.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::pipeline::{ExecutionMode, MetricRecord};
use crate::utils::error::Result;

/// Chart styling constants
const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 500.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 80.0;
const MARGIN_LEFT: f64 = 80.0;

const COLOR_PRIMARY: &str = "#3498db";
const COLOR_SECONDARY: &str = "#2ecc71";
const COLOR_GRID: &str = "#ecf0f1";
const COLOR_AXIS: &str = "#2c3e50";
const COLOR_TEXT: &str = "#2c3e50";

/// File name of the CPU-vs-inference breakdown chart
pub const BREAKDOWN_CHART_FILE: &str = "latency_breakdown.svg";
/// File name of the total-latency comparison chart
pub const TOTAL_LATENCY_CHART_FILE: &str = "total_latency.svg";

/// Mean of each numeric record field, grouped by execution mode.
///
/// Transient: recomputed on every plot run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeAverages {
    pub mode: ExecutionMode,
    pub cpu_time_ms: f64,
    pub inference_time_ms: f64,
    pub total_latency_ms: f64,
    pub memory_mb: f64,
}

/// Group records by mode and compute per-field arithmetic means.
///
/// Modes appear in a stable order (sequential first); a mode with no
/// records is omitted.
pub fn aggregate(records: &[MetricRecord]) -> Vec<ModeAverages> {
    [ExecutionMode::Sequential, ExecutionMode::Pipelined]
        .into_iter()
        .filter_map(|mode| {
            let group: Vec<&MetricRecord> = records.iter().filter(|r| r.mode == mode).collect();
            if group.is_empty() {
                return None;
            }
            let n = group.len() as f64;
            Some(ModeAverages {
                mode,
                cpu_time_ms: group.iter().map(|r| r.cpu_time_ms).sum::<f64>() / n,
                inference_time_ms: group.iter().map(|r| r.inference_time_ms).sum::<f64>() / n,
                total_latency_ms: group.iter().map(|r| r.total_latency_ms).sum::<f64>() / n,
                memory_mb: group.iter().map(|r| r.memory_mb).sum::<f64>() / n,
            })
        })
        .collect()
}

/// Render both comparison charts into `output_dir`.
///
/// Returns the paths of the written chart files.
pub fn render_charts(records: &[MetricRecord], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;
    let averages = aggregate(records);

    let breakdown_path = output_dir.join(BREAKDOWN_CHART_FILE);
    render_latency_breakdown(&averages, &breakdown_path)?;

    let total_path = output_dir.join(TOTAL_LATENCY_CHART_FILE);
    render_total_latency(&averages, &total_path)?;

    info!("Wrote charts to {}", output_dir.display());
    Ok(vec![breakdown_path, total_path])
}

/// Grouped bar chart: mean CPU vs inference time per execution mode
pub fn render_latency_breakdown(averages: &[ModeAverages], output_path: &Path) -> Result<()> {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let y_max = averages
        .iter()
        .flat_map(|a| [a.cpu_time_ms, a.inference_time_ms])
        .fold(0.0f64, f64::max)
        .max(1.0);

    let group_count = averages.len().max(1);
    let group_width = plot_width / group_count as f64;
    let bar_width = (group_width * 0.8) / 2.0;
    let group_padding = group_width * 0.1;

    let mut svg = String::new();
    push_chart_frame(
        &mut svg,
        "CPU vs DSP Inference Time",
        "Milliseconds",
        y_max,
        plot_width,
        plot_height,
    );

    for (group_idx, avg) in averages.iter().enumerate() {
        let group_x = MARGIN_LEFT + group_idx as f64 * group_width + group_padding;
        let bars = [
            ("cpu_time_ms", avg.cpu_time_ms, COLOR_PRIMARY),
            ("inference_time_ms", avg.inference_time_ms, COLOR_SECONDARY),
        ];

        for (bar_idx, (_, value, color)) in bars.iter().enumerate() {
            let x = group_x + bar_idx as f64 * bar_width;
            let bar_height = (value / y_max) * plot_height;
            let y = MARGIN_TOP + plot_height - bar_height;

            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" rx="3"/>"#,
                x,
                y,
                bar_width * 0.9,
                bar_height,
                color
            ));

            svg.push_str(&format!(
                r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="10" font-weight="bold" fill="{}">{:.1}</text>"#,
                x + bar_width * 0.45,
                y - 5.0,
                COLOR_TEXT,
                value
            ));
        }

        // Group label: the execution mode
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="12" font-weight="bold" fill="{}">{}</text>"#,
            group_x + bar_width,
            MARGIN_TOP + plot_height + 25.0,
            COLOR_TEXT,
            avg.mode
        ));
    }

    // Legend
    let legend = [
        ("cpu_time_ms", COLOR_PRIMARY),
        ("inference_time_ms", COLOR_SECONDARY),
    ];
    let mut legend_x = MARGIN_LEFT;
    for (label, color) in legend {
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="12" height="12" fill="{}"/>"#,
            legend_x,
            CHART_HEIGHT - 35.0,
            color
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="Arial, sans-serif" font-size="11" fill="{}">{}</text>"#,
            legend_x + 18.0,
            CHART_HEIGHT - 25.0,
            COLOR_TEXT,
            escape_xml(label)
        ));
        legend_x += 140.0;
    }

    svg.push_str("</svg>");
    fs::write(output_path, svg)?;
    Ok(())
}

/// Bar chart: mean total latency per execution mode
pub fn render_total_latency(averages: &[ModeAverages], output_path: &Path) -> Result<()> {
    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let y_max = averages
        .iter()
        .map(|a| a.total_latency_ms)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let bar_count = averages.len().max(1);
    let bar_width = (plot_width / bar_count as f64) * 0.7;
    let bar_gap = (plot_width / bar_count as f64) * 0.3;

    let mut svg = String::new();
    push_chart_frame(
        &mut svg,
        "Total Latency: Sequential vs Pipelined",
        "Milliseconds",
        y_max,
        plot_width,
        plot_height,
    );

    for (i, avg) in averages.iter().enumerate() {
        let x = MARGIN_LEFT + (i as f64 * (bar_width + bar_gap)) + bar_gap / 2.0;
        let bar_height = (avg.total_latency_ms / y_max) * plot_height;
        let y = MARGIN_TOP + plot_height - bar_height;

        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" rx="4"/>"#,
            x, y, bar_width, bar_height, COLOR_PRIMARY
        ));

        // Value label on top
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="12" font-weight="bold" fill="{}">{:.1}</text>"#,
            x + bar_width / 2.0,
            y - 8.0,
            COLOR_TEXT,
            avg.total_latency_ms
        ));

        // X-axis label
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="11" fill="{}">{}</text>"#,
            x + bar_width / 2.0,
            MARGIN_TOP + plot_height + 25.0,
            COLOR_TEXT,
            avg.mode
        ));
    }

    svg.push_str("</svg>");
    fs::write(output_path, svg)?;
    Ok(())
}

/// Shared chart scaffolding: background, title, grid, axes, Y label
fn push_chart_frame(
    svg: &mut String,
    title: &str,
    y_label: &str,
    y_max: f64,
    plot_width: f64,
    plot_height: f64,
) {
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
        CHART_WIDTH, CHART_HEIGHT, CHART_WIDTH, CHART_HEIGHT
    ));

    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        CHART_WIDTH, CHART_HEIGHT
    ));

    svg.push_str(&format!(
        r#"<text x="{}" y="35" text-anchor="middle" font-family="Arial, sans-serif" font-size="18" font-weight="bold" fill="{}">{}</text>"#,
        CHART_WIDTH / 2.0,
        COLOR_TEXT,
        escape_xml(title)
    ));

    // Grid lines with millisecond tick labels
    for i in 0..=5 {
        let y = MARGIN_TOP + plot_height - (i as f64 / 5.0) * plot_height;
        let value = (i as f64 / 5.0) * y_max;

        svg.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + plot_width,
            y,
            COLOR_GRID
        ));

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" text-anchor="end" font-family="Arial, sans-serif" font-size="12" fill="{}">{:.1}</text>"#,
            MARGIN_LEFT - 10.0,
            y + 4.0,
            COLOR_TEXT,
            value
        ));
    }

    // X axis
    svg.push_str(&format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
        MARGIN_LEFT,
        MARGIN_TOP + plot_height,
        MARGIN_LEFT + plot_width,
        MARGIN_TOP + plot_height,
        COLOR_AXIS
    ));

    // Y-axis label
    svg.push_str(&format!(
        r#"<text x="20" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="{}" transform="rotate(-90 20 {})">{}</text>"#,
        CHART_HEIGHT / 2.0,
        COLOR_TEXT,
        CHART_HEIGHT / 2.0,
        escape_xml(y_label)
    ));
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::MetricRecord;
    use tempfile::TempDir;

    fn record(mode: ExecutionMode, cpu: f64, inf: f64, mem: f64) -> MetricRecord {
        MetricRecord::new("frame.png".to_string(), cpu, inf, mem, mode)
    }

    #[test]
    fn test_aggregate_per_mode_means() {
        let records = vec![
            record(ExecutionMode::Sequential, 8.0, 2.0, 1.0),
            record(ExecutionMode::Sequential, 12.0, 8.0, 3.0),
            record(ExecutionMode::Pipelined, 20.0, 10.0, -1.0),
        ];

        let averages = aggregate(&records);

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].mode, ExecutionMode::Sequential);
        assert_eq!(averages[0].cpu_time_ms, 10.0);
        assert_eq!(averages[0].inference_time_ms, 5.0);
        assert_eq!(averages[0].total_latency_ms, 15.0);
        assert_eq!(averages[0].memory_mb, 2.0);
        assert_eq!(averages[1].mode, ExecutionMode::Pipelined);
        assert_eq!(averages[1].total_latency_ms, 30.0);
    }

    #[test]
    fn test_aggregate_mean_matches_matching_rows_only() {
        let records = vec![
            record(ExecutionMode::Sequential, 10.0, 10.0, 0.0),
            record(ExecutionMode::Pipelined, 1.0, 1.0, 0.0),
            record(ExecutionMode::Sequential, 30.0, 10.0, 0.0),
        ];

        let averages = aggregate(&records);
        let sequential = averages
            .iter()
            .find(|a| a.mode == ExecutionMode::Sequential)
            .unwrap();

        // (20 + 40) / 2, untouched by the pipelined row
        assert_eq!(sequential.total_latency_ms, 30.0);
    }

    #[test]
    fn test_aggregate_skips_empty_modes() {
        let records = vec![record(ExecutionMode::Sequential, 5.0, 5.0, 0.0)];
        let averages = aggregate(&records);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_render_charts_writes_both_files() {
        let dir = TempDir::new().unwrap();
        let records = vec![
            record(ExecutionMode::Sequential, 8.0, 2.0, 1.0),
            record(ExecutionMode::Pipelined, 6.0, 3.0, 0.5),
        ];

        let paths = render_charts(&records, dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        for path in &paths {
            let contents = std::fs::read_to_string(path).unwrap();
            assert!(contents.starts_with("<svg"));
            assert!(contents.ends_with("</svg>"));
        }
    }
}

//! Output formatting for CLI results

use crate::classify::{format_duration, QualityAssessment};
use crate::service::{AnalysisReport, QualityTier};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Format one analysis report as a terminal card
pub fn format_report(
    report: &AnalysisReport,
    assessment: &QualityAssessment,
    verbose: bool,
) -> String {
    let metrics = &report.metrics;
    let mut output = String::new();

    // Header: track name plus duration
    output.push_str(&format!(
        "{}{}{} {}[{} ({}s)]{}\n",
        BOLD,
        metrics.filename(),
        RESET,
        DIM,
        format_duration(metrics.duration_secs),
        metrics.duration_secs,
        RESET,
    ));

    output.push_str(&format_metric(
        "Bitrate",
        &format!("{} kbps", metrics.bitrate_kbps),
        assessment.bitrate_tier,
    ));
    output.push_str(&format_detail(
        "Real source quality:",
        &assessment.cutoff_description,
    ));
    output.push_str(&format_detail(
        "Cutoff type:",
        assessment.cutoff_shape.label(),
    ));
    output.push_str(&format_detail(
        "Likely audio origin:",
        assessment.likely_origin.label(),
    ));

    output.push_str(&format_metric(
        "Sample rate",
        &format!("{} kHz", metrics.sample_rate_khz),
        assessment.sample_rate_tier,
    ));
    output.push_str(&format_metric(
        "Loudness",
        &format!("{} LUFS", metrics.loudness_lufs),
        assessment.loudness_tier,
    ));

    if verbose {
        output.push_str(&format!(
            "  {}Analyzed as: {}{}\n",
            DIM, metrics.file, RESET
        ));
        if let Some(summary) = &metrics.cutoff_summary {
            if let Some((low, high)) = summary.cutoff_range() {
                output.push_str(&format!(
                    "  {}Cutoff range: {:.0}-{:.0} Hz{}\n",
                    DIM, low, high, RESET
                ));
            }
            if let Some(confidence) = summary.confidence() {
                output.push_str(&format!(
                    "  {}Cutoff confidence: {:.2}{}\n",
                    DIM, confidence, RESET
                ));
            }
        }
    }

    // Lyrics render only when the report carries the full block
    if let Some(block) = report.lyrics_block() {
        output.push_str(&format!(
            "\n  {}\"{}\"{} by {}\n",
            BOLD, block.song_name, RESET, block.artist_name
        ));
        for line in block.lyrics.lines() {
            output.push_str(&format!("    {}{}{}\n", DIM, line, RESET));
        }
    }

    output
}

fn format_metric(label: &str, value: &str, tier: QualityTier) -> String {
    format!(
        "  {:<12} {:<14} {}{}{}\n",
        label,
        value,
        tier.color_code(),
        tier.label(),
        RESET
    )
}

fn format_detail(label: &str, value: &str) -> String {
    format!("    {}{:<22}{} {}\n", DIM, label, RESET, value)
}

/// Format the quality tier legend, printed once per run
pub fn format_legend() -> String {
    let mut output = String::new();

    output.push_str(&format!("{}Quality levels:{}\n", BOLD, RESET));
    for tier in QualityTier::all() {
        output.push_str(&format!(
            "  {}{}{} - {}\n",
            tier.color_code(),
            tier.label(),
            RESET,
            tier.description()
        ));
    }

    output
}

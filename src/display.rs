//! 診断結果のターミナル表示

use eye_scan_common::render::{ConditionsSection, ScoreGauge};
use eye_scan_common::{Preview, RenderedView, ScoreColor, SelectedInput, StatusStyle};

const BAR_WIDTH: usize = 20;

pub fn format_view(view: &RenderedView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}  (overall score: {})\n\n",
        status_icon(view.status.style),
        view.status.text,
        view.status.overall_score_text()
    ));

    for gauge in view.gauges() {
        out.push_str(&format_gauge(gauge));
        out.push('\n');
    }
    out.push('\n');

    match &view.conditions {
        ConditionsSection::Detected(conditions) => {
            out.push_str(view.conditions.header());
            out.push('\n');
            for c in conditions {
                out.push_str(&format!("  [{}]\n", c));
            }
        }
        ConditionsSection::NoneDetected => {
            out.push_str(view.conditions.header());
            out.push('\n');
        }
    }

    if !view.findings.is_empty() {
        out.push_str("\nFindings:\n");
        for f in &view.findings {
            out.push_str(&format!("  - {}\n", f));
        }
    }

    out.push_str("\nRecommendations:\n");
    for r in &view.recommendations {
        let bullet = if r.urgent { "!!" } else { "-" };
        out.push_str(&format!("  {} {}\n", bullet, r.text));
    }

    if view.consultation_needed {
        out.push_str("\nProfessional consultation recommended.\n");
    }

    if let Some(note) = &view.medical_note {
        out.push_str(&format!("\n{}\n", note));
    }

    out
}

/// "Redness  [██████░░░░] 80%  Detected (red)"
pub fn format_gauge(gauge: &ScoreGauge) -> String {
    format!(
        "{:<8} [{}] {:>6}  {} ({})",
        gauge.channel.label(),
        bar(gauge.degrees),
        gauge.value_text(),
        gauge.status,
        color_name(gauge.color)
    )
}

fn bar(degrees: f64) -> String {
    let filled = ((degrees / 360.0) * BAR_WIDTH as f64).round();
    let filled = filled.clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn color_name(color: ScoreColor) -> &'static str {
    match color {
        ScoreColor::Red => "red",
        ScoreColor::Orange => "orange",
        ScoreColor::Green => "green",
    }
}

fn status_icon(style: StatusStyle) -> &'static str {
    match style {
        StatusStyle::Healthy => "🟢",
        StatusStyle::Moderate => "🟠",
        StatusStyle::Attention => "🔴",
    }
}

pub fn format_preview(input: &SelectedInput, preview: &Preview, dimensions: Option<(u32, u32)>) -> String {
    let size_kb = preview.size_bytes as f64 / 1024.0;
    match dimensions {
        Some((w, h)) => format!(
            "{} ({}, {:.1} KB, {}x{}px)",
            input.file_name, input.mime_type, size_kb, w, h
        ),
        None => format!("{} ({}, {:.1} KB)", input.file_name, input.mime_type, size_kb),
    }
}

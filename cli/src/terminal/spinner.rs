use colored::*;
use indicatif::ProgressStyle;
use readyr_common::outcome::AttemptReport;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::format;

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Turns the progress bar of `span` into the poll spinner.
pub fn attach(span: &Span, endpoints: usize) {
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&format!(
        "Probing {} endpoint(s)...",
        endpoints.to_string().green().bold()
    ));
}

pub fn report_attempt(span: &Span, report: &AttemptReport) {
    if report.unreachable.is_empty() {
        return;
    }
    span.pb_set_message(&format!(
        "Attempt {}/{}, waiting on {}",
        report.attempt.to_string().yellow().bold(),
        report.of,
        format::join_endpoints(&report.unreachable).italic()
    ));
}

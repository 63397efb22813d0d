//! CLI output: error mapping and table/text presentation.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::booking::{BookingRecord, SyncReport};
use crate::cms::ContentEntry;
use crate::context::ContextState;
use crate::error::EngineError;
use crate::perf::EndpointStats;
use crate::scoring::RankedModule;

/// Map an engine error to a user-facing message.
pub fn map_error(err: &EngineError) -> String {
    match err {
        EngineError::StorageError(e) => format!("Storage problem: {}", e),
        EngineError::TransportError(e) => format!("Delivery problem: {}", e),
        EngineError::ConfigError(msg) => format!("Configuration problem: {}", msg),
        EngineError::InvalidContent(msg) => format!("Content problem: {}", msg),
        EngineError::UnknownContentKey(key) => {
            format!("No content entry for key '{}'. Use `baize cms list` to see keys.", key)
        }
        EngineError::InvalidInput(msg) => format!("Invalid input: {}", msg),
    }
}

/// Human-readable context summary.
pub fn format_context_text(state: &ContextState) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Context".bold()));
    out.push_str(&format!(
        "  journey: {}   engagement: {}   layout: {}\n",
        state.fields.journey, state.cells.engagement, state.organs.layout
    ));
    out.push_str(&format!(
        "  coherence: {:.2}   resonance: {:.2}   intention: {}\n",
        state.fields.coherence, state.fields.resonance, state.fields.intention
    ));
    out.push_str(&format!(
        "  visits: {}   session: {} ms\n",
        state.visit_count(),
        state.cells.session_duration_ms
    ));
    out.push_str(&format!(
        "  interests: {}\n",
        if state.molecules.interests.is_empty() {
            "(none)".to_string()
        } else {
            state.molecules.interests.join(", ")
        }
    ));
    if !state.organs.recommendations.is_empty() {
        out.push_str("  recommendations:\n");
        for rec in &state.organs.recommendations {
            out.push_str(&format!("    - {}\n", rec));
        }
    }
    out
}

/// JSON rendering of the context state.
pub fn format_context_json(state: &ContextState) -> Result<String, EngineError> {
    serde_json::to_string_pretty(state).map_err(|e| EngineError::InvalidContent(e.to_string()))
}

/// Ranked modules as a table.
pub fn format_ranked_table(ranked: &[RankedModule]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Module", "Category", "Base", "Dynamic"]);

    for (index, item) in ranked.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.module.id),
            Cell::new(item.module.category),
            Cell::new(format!("{:.2}", item.module.base_priority)),
            Cell::new(format!("{:.2}", item.dynamic_priority)),
        ]);
    }
    table.to_string()
}

/// CMS entries as a table.
pub fn format_content_table(entries: &[ContentEntry]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Key", "Kind", "Category", "Label", "Value"]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.key),
            Cell::new(entry.kind),
            Cell::new(&entry.category),
            Cell::new(&entry.label),
            Cell::new(truncate(&entry.value, 48)),
        ]);
    }
    table.to_string()
}

/// Queued bookings as a table.
pub fn format_pending_table(records: &[BookingRecord]) -> String {
    if records.is_empty() {
        return format!("{}", "No bookings queued.".green());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Id", "Name", "Date", "Time", "Queued at"]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.id),
            Cell::new(&record.request.name),
            Cell::new(&record.request.date),
            Cell::new(&record.request.time),
            Cell::new(format_epoch_ms(record.created_at_ms)),
        ]);
    }
    table.to_string()
}

fn format_epoch_ms(ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(ms as i64)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ms.to_string())
}

/// Sync report plus endpoint timings.
pub fn format_sync_report(report: &SyncReport, stats: &[EndpointStats]) -> String {
    let mut out = format!(
        "Sync finished: {} attempted, {} delivered, {} failed\n",
        report.attempted,
        report.delivered.green(),
        if report.failed > 0 {
            report.failed.red().to_string()
        } else {
            report.failed.to_string()
        }
    );

    if !stats.is_empty() {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(vec!["Endpoint", "Calls", "Errors", "Mean", "p50", "p95", "p99"]);
        for stat in stats {
            table.add_row(vec![
                Cell::new(&stat.endpoint),
                Cell::new(stat.count),
                Cell::new(stat.errors),
                Cell::new(format!("{:.1} ms", stat.mean_ms)),
                Cell::new(format!("{} ms", stat.p50_ms)),
                Cell::new(format!("{} ms", stat.p95_ms)),
                Cell::new(format!("{} ms", stat.p99_ms)),
            ]);
        }
        out.push_str(&table.to_string());
    }
    out
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let head: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

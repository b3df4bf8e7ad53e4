//! Formatting of the final transfer data printed on quit.
//!
//! Pure functions: (TransferData, OutputFormat) → String.

use crate::types::{OutputFormat, TransferData};

/// Format transfer data for output.
pub fn format_transfer(data: &TransferData, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(data),
        OutputFormat::Json => format_json(data),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(data: &TransferData) -> String {
    let mut out = String::new();

    out.push_str("=== Graph ===\n");
    out.push_str(&format!("Width:  {}\n", data.graph.width));
    out.push_str(&format!("Height: {}\n", data.graph.height));
    out.push('\n');

    out.push_str("=== Filters ===\n");
    if data.filters.is_empty() {
        out.push_str("  (none)\n");
    }
    for filter in &data.filters {
        out.push_str(&format!("  {}\n", filter));
    }

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(data: &TransferData) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| {
        // Plain structs of strings and integers always serialize
        panic!("Failed to serialize transfer data to JSON: {}", e)
    })
}

// ============================================================================
// TESTS
// ============================================================================

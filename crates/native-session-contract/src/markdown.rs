// crates/native-session-contract/src/markdown.rs
// ============================================================================
// Module: Session Property Reference
// Description: Markdown rendering of the session property metadata.
// Purpose: Human-readable reference generated from the same records.
// Dependencies: native-session-core
// ============================================================================

//! ## Overview
//! Renders a summary table followed by one section per property. Output is a
//! pure function of the metadata records, so it is stable across runs.

use std::fmt::Write;

use native_session_core::SessionPropertyMetadata;

/// Renders the session property reference as markdown.
#[must_use]
pub fn session_properties_markdown(records: &[SessionPropertyMetadata]) -> String {
    let mut out = String::new();
    out.push_str("# Native Session Properties\n\n");
    out.push_str(
        "Generated from the built-in session property catalog. Do not edit by hand.\n\n",
    );
    out.push_str("| Name | Type | Default | Hidden |\n");
    out.push_str("| --- | --- | --- | --- |\n");
    for record in records {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            table_cell(&code_span(&record.name)),
            table_cell(&record.type_signature),
            table_cell(&render_default(&record.default_value)),
            if record.hidden { "yes" } else { "no" }
        );
    }
    for record in records {
        let _ = write!(out, "\n## {}\n\n", code_span(&record.name));
        for line in record.description.lines() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                let _ = writeln!(out, "{trimmed}");
            }
        }
        let _ = write!(
            out,
            "\n- Type: {}\n- Default: {}\n",
            code_span(&record.type_signature),
            render_default(&record.default_value)
        );
        if record.hidden {
            out.push_str("- Hidden: yes\n");
        }
    }
    out
}

/// Renders a default value, or `engine default` when absent.
fn render_default(value: &str) -> String {
    if value.is_empty() { String::from("engine default") } else { code_span(value) }
}

/// Wraps `value` in a code span whose fence outlasts any backtick run inside it.
fn code_span(value: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in value.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    let fence = "`".repeat(longest + 1);
    if value.starts_with('`') || value.ends_with('`') {
        format!("{fence} {value} {fence}")
    } else {
        format!("{fence}{value}{fence}")
    }
}

/// Escapes pipes so a value stays inside its table cell.
fn table_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_defaults_render_as_engine_default() {
        let records = [SessionPropertyMetadata {
            name: String::from("knob"),
            description: String::from("first line \nsecond line"),
            type_signature: String::from("varchar"),
            default_value: String::new(),
            hidden: true,
        }];
        let markdown = session_properties_markdown(&records);
        assert!(markdown.contains("| `knob` | varchar | engine default | yes |"));
        assert!(markdown.contains("first line\nsecond line\n"));
        assert!(markdown.contains("- Hidden: yes"));
    }

    #[test]
    fn table_cells_escape_pipes_and_backticks() {
        let records = [SessionPropertyMetadata {
            name: String::from("knob"),
            description: String::from("free form"),
            type_signature: String::from("varchar"),
            default_value: String::from("a|b`c"),
            hidden: false,
        }];
        let markdown = session_properties_markdown(&records);
        assert!(markdown.contains("| `knob` | varchar | ``a\\|b`c`` | no |"));
        assert!(markdown.contains("- Default: ``a|b`c``"));
        assert_eq!(code_span("`edge`"), "`` `edge` ``");
    }
}

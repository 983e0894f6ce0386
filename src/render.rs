//! # Text Rendering
//!
//! Turns descriptors and runtime state into plain text for the terminal.
//! Rendering never mutates the engine.

use std::fmt::Write;

use crate::catalog::group_endpoints;
use crate::engine::models::{EndpointDescriptor, EndpointRuntimeState, InvocationResult};
use crate::engine::EndpointEngine;

/// Heading used for endpoints without a group
const UNGROUPED_HEADING: &str = "Endpoints";

/// One line per endpoint, grouped under headings
pub fn render_catalog(engine: &EndpointEngine) -> String {
    let mut out = String::new();
    for (heading, endpoints) in group_endpoints(engine.descriptors()) {
        let _ = writeln!(out, "== {} ==", heading.unwrap_or(UNGROUPED_HEADING));
        for endpoint in endpoints {
            let state = engine.get_state(&endpoint.id);
            let marker = if state.expanded { 'v' } else { '>' };
            let _ = writeln!(
                out,
                "{marker} {:<6} {:<20} {}",
                endpoint.method, endpoint.id, endpoint.title
            );
        }
        out.push('\n');
    }
    out
}

/// Full card for one endpoint; details only when expanded
pub fn render_card(descriptor: &EndpointDescriptor, state: &EndpointRuntimeState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", descriptor.method, descriptor.title);
    if !descriptor.description.is_empty() {
        let _ = writeln!(out, "{}", descriptor.description);
    }
    let _ = writeln!(out, "  {}", descriptor.target_url());

    if !state.expanded {
        return out;
    }

    let placeholders = descriptor.placeholders();
    if !placeholders.is_empty() {
        let _ = writeln!(
            out,
            "\nTemplate: {} (placeholders: {})",
            descriptor.invocation_url,
            placeholders.join(", ")
        );
    }

    if !descriptor.parameters.is_empty() {
        out.push_str("\nParameters:\n");
        for parameter in &descriptor.parameters {
            let _ = writeln!(out, "  {:<16} {}", parameter.name, parameter.type_hint);
        }
    }

    if let Some(notes) = &descriptor.notes {
        let _ = writeln!(out, "\n{notes}");
    }

    if state.loading {
        out.push_str("\nLoading...\n");
    } else if let Some(result) = &state.last_result {
        out.push('\n');
        out.push_str(&render_result(result));
    }
    out
}

/// Status line followed by pretty JSON or the error message
pub fn render_result(result: &InvocationResult) -> String {
    let mark = if result.succeeded { "OK" } else { "FAILED" };
    let mut out = format!(
        "{mark} Status: {} {}\n",
        result.status, result.status_text
    );

    match (result.error_message(), result.body()) {
        (Some(message), _) => {
            let _ = writeln!(out, "Error: {message}");
        }
        (None, Some(body)) => {
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            let _ = writeln!(out, "{pretty}");
        }
        (None, None) => {}
    }
    out
}

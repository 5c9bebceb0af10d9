//! Terminal rendering of the dashboard
//!
//! Produces one text frame from a [`DashboardState`]. Resource sections are
//! only drawn behind the login gate; each shows its loading line, its error
//! line, a "no data" placeholder, and the last received items, following
//! the same precedence a browser view of the dashboard would.

use console::style;
use std::fmt::{self, Write};

use super::state::{DashboardState, ResourceState};
use crate::resource::{document_id, Document, ResourceKind};

/// Render a full frame
pub fn render(state: &DashboardState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_frame(&mut out, state);
    out
}

fn render_frame(out: &mut String, state: &DashboardState) -> fmt::Result {
    writeln!(out, "{}", style("Frontend Data Dashboard").bold().magenta())?;
    writeln!(
        out,
        "{}",
        style("Connecting to your Rust/axum/MongoDB backend").dim()
    )?;
    writeln!(out)?;

    render_session(out, state)?;

    if state.is_logged_in() {
        for (kind, resource) in state.resources() {
            writeln!(out)?;
            render_resource(out, kind, resource)?;
        }
    }

    Ok(())
}

fn render_session(out: &mut String, state: &DashboardState) -> fmt::Result {
    writeln!(out, "{}", style("== User Management ==").bold())?;

    if state.is_logged_in() {
        writeln!(
            out,
            "{}",
            style(format!("Welcome back, {}!", state.session().identity)).green()
        )?;
        writeln!(out, "Type `logout` to sign out.")
    } else {
        writeln!(out, "Enter your username: `login <username>` (mock)")
    }
}

fn render_resource(out: &mut String, kind: ResourceKind, resource: &ResourceState) -> fmt::Result {
    writeln!(out, "{}", style(format!("== {} ==", kind.label())).bold())?;
    let collection = kind.collection();

    if resource.loading() {
        writeln!(out, "{}", style(format!("Loading {collection}...")).cyan())?;
    }
    if let Some(error) = resource.error() {
        writeln!(out, "{}", style(format!("Error: {error}")).red())?;
    }
    if resource.is_empty_result() {
        writeln!(
            out,
            "{}",
            style(format!("No {collection} found or logged out.")).dim()
        )?;
    }

    for (index, item) in resource.items().iter().enumerate() {
        render_item(out, index, item)?;
    }
    Ok(())
}

fn render_item(out: &mut String, index: usize, item: &Document) -> fmt::Result {
    let key = document_id(item).unwrap_or_else(|| index.to_string());
    writeln!(out, "{}", style(format!("[{key}]")).yellow())?;

    let body = serde_json::to_string_pretty(item).unwrap_or_else(|_| format!("{item:?}"));
    for line in body.lines() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text or, with `--json`, a
//! JSON document on stdout. Text writers take any `io::Write` so they can
//! be tested against a buffer.

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use waygraph_core::{CheapestPath, CycleMembership, NodePath, PathSet};

/// Output format selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

impl OutputMode {
    /// `Json` when the flag is set.
    #[must_use]
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Render a path as `a → b → c`.
#[must_use]
pub fn format_path(path: &[String]) -> String {
    path.join(" → ")
}

// ============================================================================
// Paths
// ============================================================================

#[derive(Serialize)]
struct PathsJson<'a> {
    from: &'a str,
    to: &'a str,
    paths: &'a [NodePath],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    truncated: bool,
}

/// Print the simple paths from `from` to `to`.
pub fn print_paths(from: &str, to: &str, found: &PathSet, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&PathsJson {
            from,
            to,
            paths: &found.paths,
            truncated: found.truncated,
        }),
        OutputMode::Text => write_paths_text(&mut io::stdout().lock(), from, to, found),
    }
}

fn write_paths_text(w: &mut impl Write, from: &str, to: &str, found: &PathSet) -> io::Result<()> {
    if found.is_empty() {
        return writeln!(w, "{}", format!("No path from {from} to {to}.").yellow());
    }

    writeln!(
        w,
        "Found {} from {} to {}:",
        plural(found.len(), "path").bold(),
        from.cyan(),
        to.cyan()
    )?;
    for (i, path) in found.paths.iter().enumerate() {
        writeln!(w, "  {:>3}. {}", i + 1, format_path(path))?;
    }
    if found.truncated {
        writeln!(w, "  {}", "(more paths exist; raise --max-paths)".dimmed())?;
    }
    Ok(())
}

// ============================================================================
// Cheapest path
// ============================================================================

#[derive(Serialize)]
struct CheapestJson<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(serialize_with = "path_or_false")]
    path: Option<&'a NodePath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

fn path_or_false<S: serde::Serializer>(
    path: &Option<&NodePath>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match path {
        Some(path) => path.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

/// Print the cheapest path from `from` to `to`, if any.
pub fn print_cheapest(
    from: &str,
    to: &str,
    best: Option<&CheapestPath>,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&CheapestJson {
            from,
            to,
            path: best.map(|b| &b.nodes),
            cost: best.map(|b| b.cost),
        }),
        OutputMode::Text => write_cheapest_text(&mut io::stdout().lock(), from, to, best),
    }
}

fn write_cheapest_text(
    w: &mut impl Write,
    from: &str,
    to: &str,
    best: Option<&CheapestPath>,
) -> io::Result<()> {
    match best {
        None => writeln!(w, "{}", format!("No path from {from} to {to}.").yellow()),
        Some(best) => {
            writeln!(w, "{}", format_path(&best.nodes))?;
            writeln!(
                w,
                "  {} {}",
                "cost".dimmed(),
                best.cost.to_string().green().bold()
            )
        }
    }
}

// ============================================================================
// Cycles
// ============================================================================

/// Print every cycle and the nodes involved.
pub fn print_cycles(membership: &CycleMembership, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(membership),
        OutputMode::Text => write_cycles_text(&mut io::stdout().lock(), membership),
    }
}

fn write_cycles_text(w: &mut impl Write, membership: &CycleMembership) -> io::Result<()> {
    if membership.is_acyclic() {
        return writeln!(w, "{}", "No cycles detected.".green());
    }

    writeln!(
        w,
        "Found {}:",
        plural(membership.cycles.len(), "cycle").red().bold()
    )?;
    writeln!(w)?;

    for (i, cycle) in membership.cycles.iter().enumerate() {
        writeln!(w, "  {} {}:", "Cycle".yellow().bold(), i + 1)?;

        // Repeat the first node to show the cycle closing.
        let mut path_str = format_path(cycle);
        if let Some(first) = cycle.first() {
            path_str.push_str(" → ");
            path_str.push_str(first);
        }
        writeln!(w, "    {}", path_str.dimmed())?;
    }

    writeln!(w)?;
    let nodes: Vec<&str> = membership.nodes.iter().map(String::as_str).collect();
    writeln!(w, "{} {}", "Nodes on cycles:".bold(), nodes.join(", "))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

//! Human-readable rendering for command results.
//!
//! Commands build a [`Report`] and print it once. Colors follow the
//! `colored` crate's switches (`NO_COLOR`, `CLICOLOR`).

use chrono::{DateTime, Utc};
use std::fmt::{self, Display};

/// Styles used across reports
pub mod style {
    use colored::{ColoredString, Colorize};
    use std::fmt::Display;
    use std::path::Path;

    pub fn heading(s: &str) -> ColoredString {
        s.bold()
    }

    pub fn path(p: &Path) -> ColoredString {
        p.display().to_string().blue()
    }

    pub fn count(n: impl Display) -> ColoredString {
        n.to_string().yellow()
    }

    pub fn good(s: &str) -> ColoredString {
        s.green()
    }

    pub fn bad(s: &str) -> ColoredString {
        s.red().bold()
    }

    pub fn muted(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// A titled block of `Label: value` lines
#[derive(Debug, Clone)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new(title: impl Display) -> Self {
        Self {
            lines: vec![style::heading(&title.to_string()).to_string()],
        }
    }

    pub fn field(&mut self, label: &str, value: impl Display) -> &mut Self {
        self.lines
            .push(format!("  {}: {}", style::heading(label), value));
        self
    }

    pub fn line(&mut self, text: impl Display) -> &mut Self {
        self.lines.push(format!("  {text}"));
        self
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Store size on disk, binary units
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Ingestion wall time
pub fn format_elapsed(duration_ms: u64) -> String {
    match duration_ms {
        0..=999 => format!("{duration_ms}ms"),
        1_000..=59_999 => format!("{:.2}s", duration_ms as f64 / 1000.0),
        _ => {
            let secs = duration_ms / 1000;
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }
}

/// Age of a store relative to `now` ("3h ago")
pub fn format_age(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let age = now.signed_duration_since(created_at);
    if age.num_seconds() < 0 {
        return "in the future".to_string();
    }

    match (age.num_days(), age.num_hours(), age.num_minutes()) {
        (days, _, _) if days > 0 => format!("{days}d ago"),
        (_, hours, _) if hours > 0 => format!("{hours}h ago"),
        (_, _, mins) if mins > 0 => format!("{mins}m ago"),
        _ => "just now".to_string(),
    }
}

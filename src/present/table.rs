//! Bordered table rendering for pending results.

use super::PendingEntry;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 6] = ["File", "Status", "Match Type", "Matched", "Purl", "License"];

/// Apply ANSI color formatting if colored output is enabled.
pub(crate) fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "bold-red" => format!("\x1b[1;31m{text}\x1b[0m"),
            "bold-green" => format!("\x1b[1;32m{text}\x1b[0m"),
            "bold-magenta" => format!("\x1b[1;35m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Table with one row per pending file and a rule between rows.
pub struct PendingTable<'a> {
    rows: Vec<[&'a str; 6]>,
    colored: bool,
}

impl<'a> PendingTable<'a> {
    #[must_use]
    pub fn new(entries: &'a [PendingEntry]) -> Self {
        let rows = entries.iter().map(PendingEntry::cells).collect();
        Self {
            rows,
            colored: true,
        }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn widths(&self) -> [usize; 6] {
        let mut widths = HEADERS.map(|h| h.width());
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }

    fn rule(widths: &[usize; 6], left: char, mid: char, right: char) -> String {
        let mut line = String::new();
        line.push(left);
        for (i, w) in widths.iter().enumerate() {
            if i > 0 {
                line.push(mid);
            }
            line.push_str(&"─".repeat(w + 2));
        }
        line.push(right);
        line
    }

    fn row(&self, cells: &[&str; 6], widths: &[usize; 6], style: Option<&str>) -> String {
        let mut line = String::from("│");
        for (cell, w) in cells.iter().zip(widths) {
            let pad = w.saturating_sub(cell.width());
            let text = style.map_or_else(
                || (*cell).to_string(),
                |s| ansi_color(cell, s, self.colored),
            );
            line.push(' ');
            line.push_str(&text);
            line.push_str(&" ".repeat(pad));
            line.push_str(" │");
        }
        line
    }

    /// Render the table as newline-separated lines.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = vec![
            Self::rule(&widths, '┌', '┬', '┐'),
            self.row(&HEADERS, &widths, Some("bold-magenta")),
        ];
        for row in &self.rows {
            lines.push(Self::rule(&widths, '├', '┼', '┤'));
            lines.push(self.row(row, &widths, None));
        }
        lines.push(Self::rule(&widths, '└', '┴', '┘'));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file: &str) -> PendingEntry {
        PendingEntry {
            file: Some(file.to_string()),
            status: Some("pending".to_string()),
            match_type: Some("snippet".to_string()),
            matched: Some("80%".to_string()),
            purl: Some("pkg:npm/foo".to_string()),
            license: Some("MIT".to_string()),
        }
    }

    #[test]
    fn test_render_contains_headers_and_cells() {
        let entries = vec![entry("src/a.js")];
        let out = PendingTable::new(&entries).no_color().render();
        for header in HEADERS {
            assert!(out.contains(header), "missing {header}: {out}");
        }
        assert!(out.contains("src/a.js"));
        assert!(out.contains("pkg:npm/foo"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_rows_are_aligned() {
        let entries = vec![entry("a.js"), entry("a/much/longer/path.js")];
        let out = PendingTable::new(&entries).no_color().render();
        let widths: Vec<usize> = out.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
    }

    #[test]
    fn test_wide_characters_are_aligned() {
        let entries = vec![entry("日本語.js"), entry("ascii.js")];
        let out = PendingTable::new(&entries).no_color().render();
        let widths: Vec<usize> = out.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{out}");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let entries = vec![PendingEntry {
            file: Some("a.js".to_string()),
            ..PendingEntry::default()
        }];
        let out = PendingTable::new(&entries).no_color().render();
        assert!(out.contains("a.js"));
    }

    #[test]
    fn test_ansi_color_disabled() {
        assert_eq!(ansi_color("x", "red", false), "x");
        assert_eq!(ansi_color("x", "red", true), "\x1b[31mx\x1b[0m");
    }
}

//! Bordered text tables
//!
//! Columns are sized by terminal display width, so wide glyphs such as
//! emoji and CJK text stay aligned.

use unicode_width::UnicodeWidthStr;

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A single table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    align: Align,
}

impl Cell {
    /// Left-aligned text cell
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
        }
    }

    /// Right-aligned numeric cell
    pub fn number(n: impl ToString) -> Self {
        Self {
            text: n.to_string(),
            align: Align::Right,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::text(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::text(text)
    }
}

#[derive(Debug, Clone)]
enum Line {
    Row(Vec<Cell>),
    Separator,
}

/// A table with an upper-cased header row
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    lines: Vec<Line>,
}

impl Table {
    /// Creates a table with the given column headers
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_uppercase()).collect(),
            lines: Vec::new(),
        }
    }

    /// Appends a row. Missing trailing cells render blank; extra cells are dropped.
    pub fn row(&mut self, cells: Vec<Cell>) -> &mut Self {
        self.lines.push(Line::Row(cells));
        self
    }

    /// Appends a horizontal rule
    pub fn separator(&mut self) -> &mut Self {
        self.lines.push(Line::Separator);
        self
    }

    /// Renders the table, one line per row, with a trailing newline
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let border = border(&widths);

        let header: Vec<Cell> = self.header.iter().map(|h| Cell::text(h.as_str())).collect();
        let mut out = vec![border.clone(), render_row(&header, &widths), border.clone()];

        for line in &self.lines {
            match line {
                Line::Row(cells) => out.push(render_row(cells, &widths)),
                Line::Separator => {
                    if out.last() != Some(&border) {
                        out.push(border.clone());
                    }
                }
            }
        }
        if out.last() != Some(&border) {
            out.push(border);
        }

        let mut rendered = out.join("\n");
        rendered.push('\n');
        rendered
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| display_width(h)).collect();
        for line in &self.lines {
            if let Line::Row(cells) = line {
                for (width, cell) in widths.iter_mut().zip(cells) {
                    *width = (*width).max(display_width(&cell.text));
                }
            }
        }
        widths
    }
}

fn border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn render_row(cells: &[Cell], widths: &[usize]) -> String {
    let blank = Cell::text("");
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).unwrap_or(&blank);
        let padding = " ".repeat(width.saturating_sub(display_width(&cell.text)));
        line.push(' ');
        match cell.align {
            Align::Left => {
                line.push_str(&cell.text);
                line.push_str(&padding);
            }
            Align::Right => {
                line.push_str(&padding);
                line.push_str(&cell.text);
            }
        }
        line.push_str(" |");
    }
    line
}

/// Number of terminal columns `s` occupies
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_rows() {
        let mut table = Table::new(&["Id", "Title"]);
        table.row(vec![Cell::number(0), "Buy milk".into()]);

        let expected = "\
+----+----------+
| ID | TITLE    |
+----+----------+
|  0 | Buy milk |
+----+----------+
";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn empty_table_has_only_header() {
        let table = Table::new(&["Id"]);
        assert_eq!(table.render(), "+----+\n| ID |\n+----+\n");
    }

    #[test]
    fn separators_do_not_double_up() {
        let mut table = Table::new(&["A"]);
        table.row(vec!["x".into()]).separator().separator();
        table.row(vec!["y".into()]).separator();

        let rendered = table.render();
        assert_eq!(rendered.lines().count(), 7);
        assert!(!rendered.contains("+---+\n+---+"));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.row(vec!["Dependencies".into()]);

        let rendered = table.render();
        assert!(rendered.contains("| Dependencies |   |"));
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("✅"), 2);
        assert_eq!(display_width("❌"), 2);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("yes"), 3);
        assert_eq!(display_width("🆗"), 2);
        assert_eq!(display_width("🀄"), 2);
    }

    #[test]
    fn mixed_width_titles_share_borders() {
        let mut table = Table::new(&["Title"]);
        table.row(vec!["🆗 ok".into()]).row(vec!["plain".into()]);

        let rendered = table.render();
        let widths: Vec<usize> = rendered.lines().map(display_width).collect();
        assert!(widths.iter().all(|&w| w == widths[0]));
    }

    #[test]
    fn wide_glyphs_stay_aligned() {
        let mut table = Table::new(&["Done"]);
        table.row(vec!["✅".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(display_width(lines[1]), display_width(lines[3]));
        assert_eq!(lines[3], "| ✅   |");
    }
}

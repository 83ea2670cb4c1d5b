use crate::models::LeaderboardTable;

const MIN_COLUMN_WIDTH: usize = 3;
const NO_DATA: &str = "No data to display.";

/// Removes caret-digit color markers (`^3` etc.) so width accounting sees
/// only visible characters. The markers stay in the emitted text.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '^' {
            if let Some(next) = chars.peek() {
                if next.is_ascii_digit() {
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

fn visible_width(text: &str) -> usize {
    strip_formatting(text).chars().count()
}

fn pad_cell(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(cell));
    format!("{}{}", cell, " ".repeat(padding))
}

/// Renders headers and rows into an aligned, bordered text block with an
/// optional centered title. Every line of the block has the same total
/// width. Empty headers or rows yield a fixed "no data" sentinel instead.
pub fn render_table(headers: &[String], rows: &[Vec<String>], title: Option<&str>) -> String {
    if headers.is_empty() || rows.is_empty() {
        return NO_DATA.to_string();
    }

    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| header.chars().count().max(MIN_COLUMN_WIDTH))
        .collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(visible_width(cell));
            }
        }
    }

    let header_line = format!(
        "| {} |",
        headers
            .iter()
            .zip(&widths)
            .map(|(header, &width)| pad_cell(header, width))
            .collect::<Vec<_>>()
            .join(" | ")
    );
    let separator = format!(
        "+-{}-+",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-")
    );

    let mut lines = Vec::new();
    if let Some(title) = title {
        let inner = separator.chars().count() - 2;
        lines.push(format!("+{}+", "-".repeat(inner)));
        lines.push(format!("|{:^width$}|", title, width = inner));
        lines.push(separator.clone());
    }
    lines.push(header_line);
    lines.push(separator.clone());
    for row in rows {
        lines.push(format!(
            "| {} |",
            row.iter()
                .zip(&widths)
                .map(|(cell, &width)| pad_cell(cell, width))
                .collect::<Vec<_>>()
                .join(" | ")
        ));
    }
    lines.push(separator);

    lines.join("\n")
}

impl LeaderboardTable {
    pub fn render(&self) -> String {
        render_table(&self.headers, &self.rows(), self.title.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn strips_color_markers() {
        assert_eq!(strip_formatting("^1Red^7name"), "Redname");
        assert_eq!(strip_formatting("plain"), "plain");
        assert_eq!(strip_formatting("^x1 caret kept"), "^x1 caret kept");
    }

    #[test]
    fn all_lines_share_the_same_width() {
        let table = render_table(
            &headers(&["#", "PLAYER", "KILLS"]),
            &[row(&["1", "Alice", "10"]), row(&["2", "Bob", "3"])],
            Some("Kills"),
        );
        let mut line_widths = table.lines().map(|line| line.chars().count());
        let first = line_widths.next().unwrap();
        assert!(line_widths.all(|width| width == first));
    }

    #[test]
    fn column_width_honors_the_floor() {
        let table = render_table(&headers(&["#"]), &[row(&["1"])], None);
        // "#" padded to the 3-character floor
        assert!(table.contains("| #   |"));
    }

    #[test]
    fn player_column_fits_the_widest_name() {
        let table = render_table(
            &headers(&["#", "PLAYER", "KILLS"]),
            &[row(&["1", "Alice", "10"]), row(&["2", "Bob", "3"])],
            None,
        );
        assert!(table.contains("| PLAYER |"));
        assert!(table.contains("| Alice  |"));
    }

    #[test]
    fn color_markers_do_not_count_toward_width_but_survive_rendering() {
        let plain = render_table(
            &headers(&["#", "PLAYER"]),
            &[row(&["1", "Alice"])],
            None,
        );
        let colored = render_table(
            &headers(&["#", "PLAYER"]),
            &[row(&["1", "^2Alice^7"])],
            None,
        );
        assert!(colored.contains("^2Alice^7"));
        let plain_width = plain.lines().next().unwrap().chars().count();
        let colored_width = strip_formatting(&colored)
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap();
        assert_eq!(plain_width, colored_width);
    }

    #[test]
    fn empty_input_renders_the_sentinel() {
        assert_eq!(render_table(&[], &[], None), NO_DATA);
        assert_eq!(render_table(&headers(&["#"]), &[], Some("Kills")), NO_DATA);
    }

    #[test]
    fn title_row_is_centered_to_the_table_width() {
        let table = render_table(
            &headers(&["#", "PLAYER", "KILLS"]),
            &[row(&["1", "Alice", "10"])],
            Some("Kills"),
        );
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("+-"));
        assert!(lines[1].contains("Kills"));
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }
}

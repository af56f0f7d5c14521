//! Composition of a page's rows into display text.
//!
//! Line numbers refer to logical lines. The first row produced by a logical
//! line is stamped with its number; continuation rows of a wrapped line get
//! a blank gutter of the same width so their text stays aligned.

use crate::pagination::{PageBoundary, PageTable};
use crate::wrap::VisualLine;

pub const LINE_SEPARATOR: &str = "\n";
const NUMBER_SEPARATOR: &str = ": ";

/// Decimal digit count of `n`; zero has one digit.
pub fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Columns taken by the line-number prefix for a document of this length.
pub fn gutter_width(total_logical_lines: usize) -> usize {
    digits(total_logical_lines) + NUMBER_SEPARATOR.len()
}

/// Rows of one page, optionally prefixed with logical line numbers.
///
/// A boundary that does not lie inside `lines` yields no rows.
pub fn render_rows(
    lines: &[VisualLine],
    boundary: PageBoundary,
    number_lines: bool,
    total_logical_lines: usize,
) -> Vec<String> {
    let Some(slice) = lines.get(boundary.range()) else {
        return Vec::new();
    };

    if !number_lines {
        return slice.iter().map(|line| line.text.clone()).collect();
    }

    let width = digits(total_logical_lines);
    slice
        .iter()
        .map(|line| {
            if line.is_continuation {
                format!("{:pad$}{}", "", line.text, pad = width + NUMBER_SEPARATOR.len())
            } else {
                format!("{:>width$}{NUMBER_SEPARATOR}{}", line.source_line, line.text)
            }
        })
        .collect()
}

/// Page text joined with the line separator.
pub fn render(
    lines: &[VisualLine],
    boundary: PageBoundary,
    number_lines: bool,
    total_logical_lines: usize,
) -> String {
    render_rows(lines, boundary, number_lines, total_logical_lines).join(LINE_SEPARATOR)
}

/// Render a 1-based page of a table, empty when the page does not exist.
pub fn render_page(
    lines: &[VisualLine],
    table: &PageTable,
    page: usize,
    number_lines: bool,
    total_logical_lines: usize,
) -> String {
    table
        .page(page)
        .map(|boundary| render(lines, boundary, number_lines, total_logical_lines))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::split_lines;
    use crate::pagination::paginate;
    use crate::wrap::{WrapConfig, layout_lines};

    fn plain(content: &str) -> Vec<VisualLine> {
        layout_lines(&split_lines(content), &WrapConfig::new(false))
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(12), 2);
        assert_eq!(digits(1000), 4);
    }

    #[test]
    fn test_render_slice_without_numbers() {
        let lines = plain("a\nb\nc\nd\ne");
        assert_eq!(render(&lines, PageBoundary::new(2, 4), false, 5), "c\nd");
    }

    #[test]
    fn test_numbers_are_padded_to_document_width() {
        let content: Vec<String> = (1..=12).map(|n| format!("line {n}")).collect();
        let lines = plain(&content.join("\n"));
        let rows = render_rows(&lines, PageBoundary::new(0, 12), true, 12);

        assert_eq!(rows[0], " 1: line 1");
        assert_eq!(rows[8], " 9: line 9");
        assert_eq!(rows[11], "12: line 12");
    }

    #[test]
    fn test_numbers_follow_logical_lines_on_later_pages() {
        let lines = plain("a\nb\nc\nd\ne");
        let table = paginate(&lines, 2);
        assert_eq!(render_page(&lines, &table, 3, true, 5), "5: e");
    }

    #[test]
    fn test_continuation_rows_get_blank_gutter() {
        let lines = layout_lines(
            &split_lines("one two three\nfour"),
            &WrapConfig {
                enabled: true,
                max_chars_per_line: 7,
            },
        );
        let rows = render_rows(&lines, PageBoundary::new(0, lines.len()), true, 2);

        assert_eq!(rows, vec!["1: one two", "   three", "2: four"]);
    }

    #[test]
    fn test_continuation_at_top_of_page_is_not_numbered() {
        let lines = layout_lines(
            &split_lines("one two three"),
            &WrapConfig {
                enabled: true,
                max_chars_per_line: 7,
            },
        );
        let table = paginate(&lines, 1);
        assert_eq!(render_page(&lines, &table, 2, true, 1), "   three");
    }

    #[test]
    fn test_out_of_range_boundary_is_empty() {
        let lines = plain("a\nb");
        assert_eq!(render(&lines, PageBoundary::new(4, 6), true, 2), "");
        assert_eq!(render(&lines, PageBoundary::new(1, 5), false, 2), "");

        let table = paginate(&lines, 1);
        assert_eq!(render_page(&lines, &table, 3, false, 2), "");
    }

    #[test]
    fn test_empty_document_renders_empty_page() {
        let lines = plain("");
        let table = paginate(&lines, 5);
        assert_eq!(table.total_pages(), 1);
        assert_eq!(render_page(&lines, &table, 1, false, 0), "");
        assert_eq!(render_page(&lines, &table, 1, true, 0), "");
    }
}

use crate::document::Document;
use crate::page_renderer::{self, gutter_width};
use crate::pagination::{PageTable, paginate};
use crate::viewport::ViewportMetrics;
use crate::wrap::{VisualLine, WrapConfig, layout_lines};
use log::debug;
use std::rc::Rc;

/// One display pane: a handle on the shared document plus this pane's own
/// wrap settings, metrics and derived page table.
///
/// The row sequence and page table are derived state. They are rebuilt as a
/// whole by [`Pane::repaginate`] and never patched.
#[derive(Debug, Clone, Default)]
pub struct Pane {
    document: Option<Rc<Document>>,
    wrap: WrapConfig,
    number_lines: bool,
    metrics: Option<ViewportMetrics>,
    lines: Vec<VisualLine>,
    page_table: PageTable,
}

impl Pane {
    pub fn new(wrap: WrapConfig) -> Self {
        Self {
            wrap,
            ..Self::default()
        }
    }

    pub fn set_document(&mut self, document: Option<Rc<Document>>) {
        self.document = document;
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_deref()
    }

    pub fn wrap_config(&self) -> WrapConfig {
        self.wrap
    }

    pub fn set_wrap_enabled(&mut self, enabled: bool) {
        self.wrap.enabled = enabled;
    }

    pub fn number_lines(&self) -> bool {
        self.number_lines
    }

    pub fn set_number_lines(&mut self, enabled: bool) {
        self.number_lines = enabled;
    }

    /// Copy everything that affects layout from another pane.
    pub fn sync_from(&mut self, other: &Pane) {
        self.document = other.document.clone();
        self.wrap = other.wrap;
        self.number_lines = other.number_lines;
    }

    pub fn metrics(&self) -> Option<ViewportMetrics> {
        self.metrics
    }

    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn total_pages(&self) -> usize {
        self.page_table.total_pages()
    }

    fn total_logical_lines(&self) -> usize {
        self.document.as_deref().map_or(0, Document::line_count)
    }

    /// Rebuild rows and page boundaries for new metrics.
    pub fn repaginate(&mut self, metrics: ViewportMetrics, margin_units: u32) {
        let mut max_chars = metrics.chars_per_line();
        if self.number_lines {
            max_chars = max_chars.saturating_sub(gutter_width(self.total_logical_lines()));
        }
        self.wrap.max_chars_per_line = max_chars.max(1);
        self.metrics = Some(metrics);

        self.lines = match self.document.as_deref() {
            Some(document) => layout_lines(document.logical_lines(), &self.wrap),
            None => Vec::new(),
        };

        let capacity = metrics.lines_per_page(margin_units);
        self.page_table = paginate(&self.lines, capacity);
        debug!(
            "Repaginated pane: {} rows, {} per page, {} pages (wrap: {}, width: {})",
            self.lines.len(),
            capacity,
            self.page_table.total_pages(),
            self.wrap.enabled,
            self.wrap.max_chars_per_line
        );
    }

    /// Display rows of a 1-based page; empty for pages past the end.
    pub fn render_rows(&self, page: usize) -> Vec<String> {
        self.page_table
            .page(page)
            .map(|boundary| {
                page_renderer::render_rows(
                    &self.lines,
                    boundary,
                    self.number_lines,
                    self.total_logical_lines(),
                )
            })
            .unwrap_or_default()
    }

    pub fn render_page(&self, page: usize) -> String {
        page_renderer::render_page(
            &self.lines,
            &self.page_table,
            page,
            self.number_lines,
            self.total_logical_lines(),
        )
    }

    /// First and last logical line (1-based) that appear on a page.
    pub fn logical_range(&self, page: usize) -> Option<(usize, usize)> {
        let (first, last) = self.page_table.page(page)?.inclusive()?;
        Some((
            self.lines[first].source_line,
            self.lines[last].source_line,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::{FontMetrics, ViewportSize};

    fn metrics(cols: u32, rows: u32) -> ViewportMetrics {
        let font = FontMetrics::for_point_size(10);
        ViewportMetrics::from_parts(
            ViewportSize::new(
                cols * font.char_width_units,
                rows * font.line_height_units,
            ),
            font,
        )
    }

    fn pane_with(content: &str, wrap: bool) -> Pane {
        let mut pane = Pane::new(WrapConfig::new(wrap));
        pane.set_document(Some(Rc::new(Document::from_text(content))));
        pane
    }

    #[test]
    fn test_empty_pane_has_one_page() {
        let mut pane = Pane::default();
        pane.repaginate(metrics(20, 5), 0);
        assert_eq!(pane.total_pages(), 1);
        assert_eq!(pane.render_page(1), "");
        assert_eq!(pane.logical_range(1), None);
    }

    #[test]
    fn test_no_wrap_pagination() {
        let mut pane = pane_with("a\nb\nc\nd\ne", false);
        pane.repaginate(metrics(20, 2), 0);
        assert_eq!(pane.total_pages(), 3);
        assert_eq!(pane.render_page(1), "a\nb");
        assert_eq!(pane.render_page(3), "e");
        assert_eq!(pane.render_page(4), "");
    }

    #[test]
    fn test_wrap_uses_viewport_width() {
        let mut pane = pane_with("one two three four", true);
        pane.repaginate(metrics(7, 10), 0);
        assert_eq!(pane.wrap_config().max_chars_per_line, 7);
        assert_eq!(pane.render_rows(1), vec!["one two", "three", "four"]);
        assert_eq!(pane.logical_range(1), Some((1, 1)));
    }

    #[test]
    fn test_line_numbers_narrow_the_wrap_width() {
        let mut pane = pane_with("one two three four", true);
        pane.set_number_lines(true);
        pane.repaginate(metrics(10, 10), 0);

        assert_eq!(pane.wrap_config().max_chars_per_line, 7);
        assert_eq!(
            pane.render_rows(1),
            vec!["1: one two", "   three", "   four"]
        );
    }

    #[test]
    fn test_logical_range_spans_wrapped_lines() {
        let mut pane = pane_with("aaa bbb ccc\nddd\neee fff", true);
        pane.repaginate(metrics(3, 2), 0);

        // rows: aaa bbb ccc ddd eee fff
        assert_eq!(pane.total_pages(), 3);
        assert_eq!(pane.logical_range(1), Some((1, 1)));
        assert_eq!(pane.logical_range(2), Some((1, 2)));
        assert_eq!(pane.logical_range(3), Some((3, 3)));
    }

    #[test]
    fn test_sync_from_copies_layout_settings() {
        let mut primary = pane_with("x", false);
        primary.set_number_lines(true);
        let mut secondary = Pane::new(WrapConfig::new(true));

        secondary.sync_from(&primary);
        assert!(!secondary.wrap_config().enabled);
        assert!(secondary.number_lines());
        assert_eq!(secondary.document().map(Document::line_count), Some(1));
    }
}

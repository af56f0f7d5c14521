//! The viewing session: one document, two panes and the navigation state.
//!
//! Every event that can change layout (open, resize, zoom, wrap or line
//! number toggles, entering dual mode) ends in [`Viewer::invalidate_and_repaginate`],
//! which rebuilds the page tables of the active panes and clamps the anchor
//! page into the new range.

use crate::document::Document;
use crate::error::DocumentLoadError;
use crate::navigation::{AdvancePolicy, DisplayMode, NavigationController, VisiblePages};
use crate::pane::Pane;
use crate::viewport::{DEFAULT_MARGIN_UNITS, ViewportMetrics, ViewportSize};
use crate::wrap::WrapConfig;
use crate::zoom::{DEFAULT_BASE_FONT_SIZE, ZoomController};
use log::{debug, info, warn};
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub mode: DisplayMode,
    pub advance_policy: AdvancePolicy,
    pub word_wrap: bool,
    pub line_numbers: bool,
    pub margin_units: u32,
    pub base_font_size: u32,
    pub min_zoom: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Dual,
            advance_policy: AdvancePolicy::Sliding,
            word_wrap: true,
            line_numbers: false,
            margin_units: DEFAULT_MARGIN_UNITS,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
            min_zoom: ZoomController::MIN_SCALE,
        }
    }
}

/// A composed page ready for the display sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// 1-based page number
    pub number: usize,
    /// False for the blank companion page past the end of the document
    pub exists: bool,
    pub rows: Vec<String>,
}

impl RenderedPage {
    pub fn text(&self) -> String {
        self.rows.join(crate::page_renderer::LINE_SEPARATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub left: RenderedPage,
    pub right: Option<RenderedPage>,
}

pub struct Viewer {
    document: Option<Rc<Document>>,
    primary: Pane,
    secondary: Pane,
    navigation: NavigationController,
    zoom: ZoomController,
    size: ViewportSize,
    margin_units: u32,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerOptions::default())
    }
}

impl Viewer {
    pub fn new(options: ViewerOptions) -> Self {
        let mut primary = Pane::new(WrapConfig::new(options.word_wrap));
        primary.set_number_lines(options.line_numbers);
        let mut secondary = Pane::default();
        secondary.sync_from(&primary);

        let mut navigation = NavigationController::new(options.mode, options.advance_policy);
        navigation.set_line_numbers(options.line_numbers);

        let mut viewer = Self {
            document: None,
            primary,
            secondary,
            navigation,
            zoom: ZoomController::new(options.base_font_size).with_min_factor(options.min_zoom),
            size: ViewportSize::default(),
            margin_units: options.margin_units,
        };
        viewer.invalidate_and_repaginate();
        viewer
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_deref()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn primary(&self) -> &Pane {
        &self.primary
    }

    pub fn secondary(&self) -> &Pane {
        &self.secondary
    }

    pub fn size(&self) -> ViewportSize {
        self.size
    }

    pub fn metrics(&self) -> ViewportMetrics {
        ViewportMetrics::from_parts(self.size, self.zoom.font_metrics())
    }

    pub fn total_pages(&self) -> usize {
        self.navigation.total_pages()
    }

    pub fn anchor_page(&self) -> usize {
        self.navigation.anchor_page()
    }

    pub fn mode(&self) -> DisplayMode {
        self.navigation.mode()
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.navigation.advance_policy()
    }

    pub fn word_wrap(&self) -> bool {
        self.primary.wrap_config().enabled
    }

    pub fn line_numbers(&self) -> bool {
        self.primary.number_lines()
    }

    /// Replace the current document and go back to the first page.
    pub fn open(&mut self, document: Document) {
        info!(
            "Opening {} ({} lines)",
            document.title(),
            document.line_count()
        );
        let document = Rc::new(document);
        self.document = Some(Rc::clone(&document));
        self.primary.set_document(Some(Rc::clone(&document)));
        self.secondary.set_document(Some(document));
        self.navigation.reset();
        self.invalidate_and_repaginate();
    }

    /// Load and open a file. On failure the current document stays on screen.
    pub fn open_path(&mut self, path: &Path) -> Result<(), DocumentLoadError> {
        match Document::load(path) {
            Ok(document) => {
                self.open(document);
                Ok(())
            }
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        }
    }

    /// Rebuild page tables for the active panes and clamp the anchor.
    pub fn invalidate_and_repaginate(&mut self) {
        let metrics = self.metrics();
        self.primary.repaginate(metrics, self.margin_units);
        if self.navigation.mode() == DisplayMode::Dual {
            self.secondary.repaginate(metrics, self.margin_units);
        }

        self.navigation.set_total_pages(self.primary.total_pages());
        self.navigation.set_zoom_factor(self.zoom.factor());
        debug!(
            "Layout: {} pages, anchor {}, zoom {:.2}",
            self.navigation.total_pages(),
            self.navigation.anchor_page(),
            self.zoom.factor()
        );
    }

    /// New pane size from the display surface.
    pub fn resize(&mut self, size: ViewportSize) {
        self.size = size;
        self.invalidate_and_repaginate();
    }

    pub fn next(&mut self) -> bool {
        self.navigation.next()
    }

    pub fn previous(&mut self) -> bool {
        self.navigation.previous()
    }

    pub fn first(&mut self) -> bool {
        self.navigation.first()
    }

    pub fn last(&mut self) -> bool {
        self.navigation.last()
    }

    pub fn toggle_mode(&mut self) -> DisplayMode {
        let mode = self.mode().toggled();
        self.set_mode(mode);
        mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        if mode == DisplayMode::Dual {
            self.secondary.sync_from(&self.primary);
        }
        self.navigation.set_mode(mode);
        self.invalidate_and_repaginate();
    }

    pub fn set_advance_policy(&mut self, policy: AdvancePolicy) {
        self.navigation.set_advance_policy(policy);
    }

    pub fn toggle_advance_policy(&mut self) -> AdvancePolicy {
        let policy = self.advance_policy().toggled();
        self.set_advance_policy(policy);
        policy
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
        self.invalidate_and_repaginate();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
        self.invalidate_and_repaginate();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
        self.invalidate_and_repaginate();
    }

    pub fn set_word_wrap(&mut self, enabled: bool) {
        self.primary.set_wrap_enabled(enabled);
        self.secondary.set_wrap_enabled(enabled);
        self.invalidate_and_repaginate();
    }

    pub fn toggle_word_wrap(&mut self) -> bool {
        let enabled = !self.word_wrap();
        self.set_word_wrap(enabled);
        enabled
    }

    pub fn set_line_numbers(&mut self, enabled: bool) {
        self.primary.set_number_lines(enabled);
        self.secondary.set_number_lines(enabled);
        self.navigation.set_line_numbers(enabled);
        self.invalidate_and_repaginate();
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        let enabled = !self.line_numbers();
        self.set_line_numbers(enabled);
        enabled
    }

    pub fn visible_pages(&self) -> VisiblePages {
        self.navigation.visible_pages()
    }

    /// Compose the page or pages that are currently visible.
    pub fn page_view(&self) -> PageView {
        let VisiblePages { left, right } = self.visible_pages();
        let total = self.total_pages();

        let left = RenderedPage {
            number: left,
            exists: left <= total,
            rows: self.primary.render_rows(left),
        };
        let right = right.map(|number| RenderedPage {
            number,
            exists: number <= total,
            rows: self.secondary.render_rows(number),
        });
        PageView { left, right }
    }

    /// Logical lines covered by the visible pages.
    pub fn visible_line_range(&self) -> Option<(usize, usize)> {
        let VisiblePages { left, right } = self.visible_pages();
        let (first, mut last) = self.primary.logical_range(left)?;
        if let Some((_, right_last)) = right.and_then(|page| self.secondary.logical_range(page)) {
            last = right_last;
        }
        Some((first, last))
    }

    pub fn page_info(&self) -> String {
        self.navigation.page_info()
    }
}

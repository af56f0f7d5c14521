//! Page position state machine.
//!
//! The display mode (one or two panes) and the two-page advance policy are
//! independent axes; all four combinations are valid, but the policy only
//! changes behaviour in dual mode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Single,
    #[default]
    Dual,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Single => DisplayMode::Dual,
            DisplayMode::Dual => DisplayMode::Single,
        }
    }
}

/// How far a two-page view moves per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    /// 1-2, 2-3, 3-4...
    #[default]
    Sliding,
    /// 1-2, 3-4, 5-6...
    Spread,
}

impl AdvancePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvancePolicy::Sliding => "Sliding",
            AdvancePolicy::Spread => "Spread",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AdvancePolicy::Sliding => "Sliding Window (1-2, 2-3, 3-4...)",
            AdvancePolicy::Spread => "Spread View (1-2, 3-4, 5-6...)",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AdvancePolicy::Sliding => AdvancePolicy::Spread,
            AdvancePolicy::Spread => AdvancePolicy::Sliding,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub mode: DisplayMode,
    pub advance_policy: AdvancePolicy,
    /// 1-based page shown in the left (or only) pane
    pub anchor_page: usize,
    pub line_numbers_enabled: bool,
    pub zoom_factor: f32,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            advance_policy: AdvancePolicy::default(),
            anchor_page: 1,
            line_numbers_enabled: false,
            zoom_factor: 1.0,
        }
    }
}

/// Pages currently on screen. `right` is set in dual mode even when it lies
/// past the end of the document; such a page is shown blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisiblePages {
    pub left: usize,
    pub right: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
    total_pages: usize,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(DisplayMode::default(), AdvancePolicy::default())
    }
}

impl NavigationController {
    pub fn new(mode: DisplayMode, advance_policy: AdvancePolicy) -> Self {
        Self {
            state: NavigationState {
                mode,
                advance_policy,
                ..NavigationState::default()
            },
            total_pages: 1,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.mode
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.state.advance_policy
    }

    pub fn anchor_page(&self) -> usize {
        self.state.anchor_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Back to the first page, used when a new document is opened.
    pub fn reset(&mut self) {
        self.state.anchor_page = 1;
    }

    /// Adopt a freshly computed page count and pull the anchor back inside it.
    pub fn set_total_pages(&mut self, total_pages: usize) {
        self.total_pages = total_pages.max(1);
        self.state.anchor_page = self.state.anchor_page.clamp(1, self.total_pages);
    }

    pub fn set_line_numbers(&mut self, enabled: bool) {
        self.state.line_numbers_enabled = enabled;
    }

    pub fn set_zoom_factor(&mut self, factor: f32) {
        self.state.zoom_factor = factor;
    }

    fn step(&self) -> usize {
        match (self.state.mode, self.state.advance_policy) {
            (DisplayMode::Dual, AdvancePolicy::Spread) => 2,
            _ => 1,
        }
    }

    /// Returns true when the anchor moved.
    pub fn next(&mut self) -> bool {
        let target = (self.state.anchor_page + self.step()).min(self.total_pages);
        self.move_to(target)
    }

    pub fn previous(&mut self) -> bool {
        let target = self.state.anchor_page.saturating_sub(self.step()).max(1);
        self.move_to(target)
    }

    pub fn first(&mut self) -> bool {
        self.move_to(1)
    }

    /// Jump to the end. In spread view the anchor stays on the odd pages so
    /// the final spread lines up with the ones reached by stepping from 1.
    pub fn last(&mut self) -> bool {
        let target = if self.step() == 2 && self.total_pages % 2 == 0 {
            self.total_pages - 1
        } else {
            self.total_pages
        };
        self.move_to(target)
    }

    fn move_to(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.total_pages);
        let moved = page != self.state.anchor_page;
        self.state.anchor_page = page;
        moved
    }

    /// Switch between one and two panes; the anchor stays where it is and
    /// becomes the left page when entering dual mode.
    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.state.mode = self.state.mode.toggled();
        self.state.mode
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.state.mode = mode;
    }

    /// Only changes future step sizes; the anchor does not move.
    pub fn set_advance_policy(&mut self, policy: AdvancePolicy) {
        self.state.advance_policy = policy;
    }

    pub fn can_previous(&self) -> bool {
        self.state.anchor_page > 1
    }

    pub fn can_next(&self) -> bool {
        match (self.state.mode, self.state.advance_policy) {
            (DisplayMode::Dual, AdvancePolicy::Spread) => {
                self.state.anchor_page + 1 < self.total_pages
            }
            _ => self.state.anchor_page < self.total_pages,
        }
    }

    pub fn visible_pages(&self) -> VisiblePages {
        let left = self.state.anchor_page;
        let right = match self.state.mode {
            DisplayMode::Dual => Some(left + 1),
            DisplayMode::Single => None,
        };
        VisiblePages { left, right }
    }

    /// Button captions for the previous/next controls.
    pub fn labels(&self) -> (&'static str, &'static str) {
        match (self.state.mode, self.state.advance_policy) {
            (DisplayMode::Dual, AdvancePolicy::Spread) => ("Previous Spread", "Next Spread"),
            _ => ("Previous Page", "Next Page"),
        }
    }

    pub fn page_info(&self) -> String {
        let VisiblePages { left, right } = self.visible_pages();
        let total = self.total_pages;
        match right {
            Some(right) if right <= total => format!(
                "Pages {left}-{right} of {total} ({})",
                self.state.advance_policy.as_str()
            ),
            Some(_) => format!(
                "Page {left} of {total} ({})",
                self.state.advance_policy.as_str()
            ),
            None => format!("Page {left} of {total}"),
        }
    }
}

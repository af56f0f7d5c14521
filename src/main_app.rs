use crate::error::DocumentLoadError;
use crate::event_source::{Event, EventSource, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crate::navigation::{DisplayMode, NavigationController};
use crate::notification::NotificationManager;
use crate::preferences::Preferences;
use crate::recent_files::RecentFilesPopup;
use crate::theme::{self, Palette, ThemeId};
use crate::viewer::{RenderedPage, Viewer, ViewerOptions};
use crate::viewport::ViewportSize;
use anyhow::Result;
use log::{debug, info, warn};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Layout units covered by one terminal cell. They match the glyph metrics
/// of the base font, so at 100% zoom a cell holds exactly one character.
pub const CELL_WIDTH_UNITS: u32 = 6;
pub const CELL_HEIGHT_UNITS: u32 = 12;

/// A terminal cannot draw glyphs smaller than a cell.
pub const TERMINAL_MIN_ZOOM: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    viewer: Viewer,
    preferences: Preferences,
    notifications: NotificationManager,
    recent_popup: Option<RecentFilesPopup>,
}

impl App {
    /// Viewer settings for a terminal surface: panes fill their whole cell
    /// area and zoom never goes below 100%.
    pub fn terminal_viewer_options() -> ViewerOptions {
        ViewerOptions {
            margin_units: 0,
            min_zoom: TERMINAL_MIN_ZOOM,
            ..ViewerOptions::default()
        }
    }

    pub fn new(options: ViewerOptions, preferences: Preferences) -> Self {
        theme::set_theme(ThemeId::from_name(preferences.theme()));
        Self {
            viewer: Viewer::new(options),
            preferences,
            notifications: NotificationManager::default(),
            recent_popup: None,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn is_recent_popup_open(&self) -> bool {
        self.recent_popup.is_some()
    }

    /// Open a file and record it in the recent list. Failures are reported in
    /// the status bar and the current document stays open.
    pub fn open_file(&mut self, path: &Path) -> Result<(), DocumentLoadError> {
        match self.viewer.open_path(path) {
            Ok(()) => {
                self.preferences.add_recent_file(path);
                let title = self
                    .viewer
                    .document()
                    .map(|document| document.title())
                    .unwrap_or_default();
                self.notifications.info(format!("Opened {title}"));
                Ok(())
            }
            Err(e) => {
                self.notifications.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Open an entry of the recent list, dropping it if the file is gone.
    pub fn open_recent(&mut self, path: &Path) {
        if !path.exists() {
            warn!("Recent file {} no longer exists", path.display());
            self.preferences.remove_recent_file(path);
            self.notifications
                .warn(format!("{} no longer exists", path.display()));
            return;
        }
        // open_file already reports the failure
        let _ = self.open_file(path);
    }

    /// Reopen the last file from the previous session, if it still exists.
    pub fn load_most_recent(&mut self) -> bool {
        let Some(path) = self.preferences.most_recent_existing().map(Path::to_path_buf) else {
            debug!("No recent file to reopen");
            return false;
        };
        info!("Reopening most recent file {}", path.display());
        self.open_file(&path).is_ok()
    }

    /// Resize the viewer to the panes of a terminal of `area`. Only a real
    /// change triggers repagination.
    pub fn sync_viewport(&mut self, area: Rect) {
        let size = pane_viewport(area, self.viewer.mode());
        if size != self.viewer.size() {
            debug!(
                "Viewport changed to {}x{} units",
                size.width_units, size.height_units
            );
            self.viewer.resize(size);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppAction::Quit);
        }
        if self.recent_popup.is_some() {
            self.handle_popup_key(key);
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(AppAction::Quit),
            KeyCode::Char(' ') | KeyCode::PageDown | KeyCode::Char('l') | KeyCode::Right => {
                self.viewer.next();
            }
            KeyCode::Char('b') | KeyCode::PageUp | KeyCode::Char('h') | KeyCode::Left => {
                self.viewer.previous();
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.viewer.first();
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.viewer.last();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.viewer.zoom_in();
                self.notify_zoom();
            }
            KeyCode::Char('-') => {
                self.viewer.zoom_out();
                self.notify_zoom();
            }
            KeyCode::Char('0') => {
                self.viewer.reset_zoom();
                self.notify_zoom();
            }
            KeyCode::Char('#') => {
                let enabled = self.viewer.toggle_line_numbers();
                self.notifications
                    .info(format!("Line numbers {}", on_off(enabled)));
            }
            KeyCode::Char('w') => {
                let enabled = self.viewer.toggle_word_wrap();
                self.preferences.set_word_wrap(enabled);
                self.notifications
                    .info(format!("Word wrap {}", on_off(enabled)));
            }
            KeyCode::Char('t') => {
                let message = match self.viewer.toggle_mode() {
                    DisplayMode::Dual => "Two-page view",
                    DisplayMode::Single => "Single-page view",
                };
                self.notifications.info(message);
            }
            KeyCode::Char('v') => {
                let policy = self.viewer.toggle_advance_policy();
                self.preferences.set_advance_policy(policy);
                self.notifications
                    .info(format!("Navigation mode: {}", policy.description()));
            }
            KeyCode::Char('c') => {
                let next = theme::current_theme_id().next();
                theme::set_theme(next);
                self.preferences.set_theme(next.name());
                self.notifications.info(format!("Theme: {}", next.name()));
            }
            KeyCode::Char('r') => {
                self.recent_popup = Some(RecentFilesPopup::new(self.preferences.recent_files()));
            }
            KeyCode::Esc => {
                self.notifications.dismiss();
            }
            _ => {}
        }
        None
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.recent_popup.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => popup.next(),
            KeyCode::Char('k') | KeyCode::Up => popup.previous(),
            KeyCode::Enter => {
                let selected: Option<PathBuf> = popup.selected_path().map(Path::to_path_buf);
                self.recent_popup = None;
                if let Some(path) = selected {
                    self.open_recent(&path);
                }
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') => {
                self.recent_popup = None;
            }
            _ => {}
        }
    }

    fn notify_zoom(&mut self) {
        let zoom = self.viewer.zoom();
        self.notifications
            .info(format!("Zoom {}% ({} pt)", zoom.percent(), zoom.font_size()));
    }

    pub fn update(&mut self) -> bool {
        self.notifications.update()
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        self.sync_viewport(area);
        let palette = theme::current_theme();

        f.render_widget(
            Block::default().style(Style::default().bg(palette.background)),
            area,
        );

        let [content, nav, status] = screen_layout(area);
        let view = self.viewer.page_view();
        let panes = pane_areas(content, self.viewer.mode());
        render_page(f, panes[0], &view.left, palette);
        if let (Some(right), Some(right_area)) = (&view.right, panes.get(1)) {
            render_page(f, *right_area, right, palette);
        }

        self.render_nav_bar(f, nav, palette);
        self.render_status_bar(f, status, palette);

        if let Some(popup) = self.recent_popup.as_mut() {
            popup.render(f, area, palette);
        }
    }

    fn render_nav_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let navigation: &NavigationController = self.viewer.navigation();
        let (previous_label, next_label) = navigation.labels();
        let previous = format!("< {previous_label}");
        let next = format!("{next_label} >");

        let [left, middle, right] = Layout::horizontal([
            Constraint::Length(previous.width() as u16 + 1),
            Constraint::Min(0),
            Constraint::Length(next.width() as u16 + 1),
        ])
        .areas(area);

        let bar = Style::default().bg(palette.bar_bg).fg(palette.bar_text);
        let button = |enabled: bool| {
            if enabled {
                bar.add_modifier(Modifier::BOLD)
            } else {
                bar.fg(palette.muted)
            }
        };

        f.render_widget(
            Paragraph::new(Span::styled(previous, button(navigation.can_previous()))).style(bar),
            left,
        );
        f.render_widget(
            Paragraph::new(self.viewer.page_info())
                .alignment(Alignment::Center)
                .style(bar),
            middle,
        );
        f.render_widget(
            Paragraph::new(Span::styled(next, button(navigation.can_next())))
                .alignment(Alignment::Right)
                .style(bar),
            right,
        );
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let bar = Style::default().bg(palette.bar_bg).fg(palette.bar_text);
        let zoom = self.viewer.zoom();
        let indicators = format!(
            " Zoom {}% | Wrap {} | # {} ",
            zoom.percent(),
            on_off(self.viewer.word_wrap()),
            on_off(self.viewer.line_numbers())
        );

        let [left, right] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(indicators.width() as u16),
        ])
        .areas(area);

        let message = match self.notifications.current() {
            Some(notification) => Line::from(Span::styled(
                format!(" {}", notification.message),
                notification.level.style(palette),
            )),
            None => Line::from(format!(" {}", self.document_summary())),
        };

        f.render_widget(Paragraph::new(message).style(bar), left);
        f.render_widget(
            Paragraph::new(indicators)
                .alignment(Alignment::Right)
                .style(bar),
            right,
        );
    }

    fn document_summary(&self) -> String {
        match self.viewer.document() {
            Some(document) => match self.viewer.visible_line_range() {
                Some((first, last)) => format!(
                    "{} | Lines {first}-{last} of {}",
                    document.title(),
                    document.line_count()
                ),
                None => format!("{} | empty", document.title()),
            },
            None => "No file open (r: recent files, q: quit)".to_string(),
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn render_page(f: &mut Frame, area: Rect, page: &RenderedPage, palette: &Palette) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    if page.exists {
        block = block.title(format!(" {} ", page.number));
    }

    let lines: Vec<Line> = page.rows.iter().map(|row| Line::from(row.as_str())).collect();
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(palette.text).bg(palette.background)),
        area,
    );
}

/// Page area, navigation bar and status bar.
fn screen_layout(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area)
}

fn pane_areas(content: Rect, mode: DisplayMode) -> Vec<Rect> {
    match mode {
        DisplayMode::Single => vec![content],
        DisplayMode::Dual => {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .areas(content);
            vec![left, right]
        }
    }
}

/// Text area of one pane, inside its border, in layout units.
pub fn pane_viewport(area: Rect, mode: DisplayMode) -> ViewportSize {
    let [content, _, _] = screen_layout(area);
    let cols = pane_areas(content, mode)
        .iter()
        .map(|pane| pane.width.saturating_sub(2))
        .min()
        .unwrap_or(0);
    let rows = content.height.saturating_sub(2);
    ViewportSize::new(
        u32::from(cols) * CELL_WIDTH_UNITS,
        u32::from(rows) * CELL_HEIGHT_UNITS,
    )
}

pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(250);
    loop {
        app.update();
        terminal.draw(|f| app.draw(f))?;

        if !event_source.poll(tick_rate)? {
            continue;
        }
        match event_source.read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key) == Some(AppAction::Quit) {
                    info!("Quit requested");
                    return Ok(());
                }
            }
            Event::Resize(cols, rows) => {
                debug!("Terminal resized to {cols}x{rows}");
                app.sync_viewport(Rect::new(0, 0, cols, rows));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use serial_test::serial;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn app_with_lines(count: usize) -> App {
        let mut app = App::new(App::terminal_viewer_options(), Preferences::ephemeral());
        let text = (1..=count)
            .map(|n| format!("line {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        app.viewer.open(Document::from_text(text));
        app.sync_viewport(Rect::new(0, 0, 80, 24));
        app
    }

    #[test]
    #[serial]
    fn test_pane_viewport() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(
            pane_viewport(area, DisplayMode::Dual),
            ViewportSize::new(38 * CELL_WIDTH_UNITS, 20 * CELL_HEIGHT_UNITS)
        );
        assert_eq!(
            pane_viewport(area, DisplayMode::Single),
            ViewportSize::new(78 * CELL_WIDTH_UNITS, 20 * CELL_HEIGHT_UNITS)
        );
        assert_eq!(
            pane_viewport(Rect::new(0, 0, 1, 1), DisplayMode::Single),
            ViewportSize::new(0, 0)
        );
    }

    #[test]
    #[serial]
    fn test_navigation_keys() {
        let mut app = app_with_lines(100);
        assert_eq!(app.viewer().total_pages(), 5);

        app.handle_key(key(' '));
        app.handle_key(key('l'));
        assert_eq!(app.viewer().anchor_page(), 3);
        app.handle_key(key('b'));
        assert_eq!(app.viewer().anchor_page(), 2);
        app.handle_key(key('G'));
        assert_eq!(app.viewer().anchor_page(), 5);
        app.handle_key(key('g'));
        assert_eq!(app.viewer().anchor_page(), 1);
    }

    #[test]
    #[serial]
    fn test_quit_keys() {
        let mut app = app_with_lines(1);
        assert_eq!(app.handle_key(key('q')), Some(AppAction::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Some(AppAction::Quit));
    }

    #[test]
    #[serial]
    fn test_policy_toggle_notifies() {
        let mut app = app_with_lines(10);
        app.handle_key(key('v'));
        assert_eq!(
            app.notifications().current().map(|n| n.message.as_str()),
            Some("Navigation mode: Spread View (1-2, 3-4, 5-6...)")
        );
        assert_eq!(
            app.preferences().advance_policy(),
            crate::navigation::AdvancePolicy::Spread
        );
    }

    #[test]
    #[serial]
    fn test_zoom_cannot_go_below_cell_size() {
        let mut app = app_with_lines(100);
        app.handle_key(key('-'));
        assert_eq!(app.viewer().zoom().factor(), 1.0);

        app.handle_key(key('+'));
        assert_eq!(app.viewer().zoom().font_size(), 11);
        assert!(app.viewer().total_pages() > 5);
        app.handle_key(key('0'));
        assert_eq!(app.viewer().total_pages(), 5);
    }

    #[test]
    #[serial]
    fn test_mode_toggle_resizes_on_sync() {
        let mut app = app_with_lines(10);
        app.handle_key(key('t'));
        assert_eq!(app.viewer().mode(), DisplayMode::Single);

        app.sync_viewport(Rect::new(0, 0, 80, 24));
        assert_eq!(app.viewer().metrics().chars_per_line(), 78);
    }

    #[test]
    #[serial]
    fn test_escape_dismisses_notification() {
        let mut app = app_with_lines(10);
        app.handle_key(key('#'));
        assert!(app.notifications().current().is_some());

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.handle_key(esc), None);
        assert!(app.notifications().current().is_none());
        assert!(app.viewer().line_numbers());
    }

    #[test]
    #[serial]
    fn test_popup_swallows_keys() {
        let mut app = app_with_lines(100);
        app.handle_key(key('r'));
        assert!(app.is_recent_popup_open());

        assert_eq!(app.handle_key(key('q')), None);
        assert!(!app.is_recent_popup_open());
        assert_eq!(app.viewer().anchor_page(), 1);
    }
}

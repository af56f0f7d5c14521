use crate::preferences::RecentFile;
use crate::theme::Palette;
use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};
use std::path::{Path, PathBuf};

/// Popup listing recently opened files, most recent first.
pub struct RecentFilesPopup {
    items: Vec<RecentItem>,
    state: ListState,
}

#[derive(Clone)]
struct RecentItem {
    opened: DateTime<Local>,
    title: String,
    path: PathBuf,
}

impl RecentFilesPopup {
    pub fn new(recent: &[RecentFile]) -> Self {
        let items: Vec<RecentItem> = recent
            .iter()
            .map(|entry| RecentItem {
                opened: entry.last_opened.with_timezone(&Local),
                title: entry
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| entry.path.display().to_string()),
                path: entry.path.clone(),
            })
            .collect();

        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }

        RecentFilesPopup { items, state }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let popup_area = centered_rect(60, 60, area);
        f.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = if self.items.is_empty() {
            vec![ListItem::new(Span::styled(
                "No recent files",
                Style::default().fg(palette.muted),
            ))]
        } else {
            self.items
                .iter()
                .map(|item| {
                    let date_str = item.opened.format("%Y-%m-%d %H:%M").to_string();
                    ListItem::new(Line::from(vec![
                        Span::styled(date_str, Style::default().fg(palette.muted)),
                        Span::raw(" : "),
                        Span::styled(item.title.as_str(), Style::default().fg(palette.text)),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Recent Files ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border))
                    .style(Style::default().bg(palette.background)),
            )
            .highlight_style(
                Style::default()
                    .bg(palette.selection_bg)
                    .fg(palette.selection_text)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, popup_area, &mut self.state);
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.state
            .selected()
            .and_then(|i| self.items.get(i))
            .map(|item| item.path.as_path())
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

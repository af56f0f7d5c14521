use pageturn::App;
use pageturn::event_source::KeyCode;
use pageturn::navigation::{AdvancePolicy, DisplayMode};
use pageturn::preferences::Preferences;
use pageturn::run_app_with_event_source;
use pageturn::test_utils::test_helpers::{
    TestScenarioBuilder, capture_terminal_state, create_test_terminal,
};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_lines(dir: &Path, name: &str, count: usize) -> PathBuf {
    let path = dir.join(name);
    let text = (1..=count)
        .map(|n| format!("line {n}"))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&path, text).unwrap();
    path
}

fn run(terminal: &mut Terminal<TestBackend>, app: &mut App, scenario: TestScenarioBuilder) {
    let mut events = scenario.build();
    run_app_with_event_source(terminal, app, &mut events).unwrap();
}

fn app_with_file(path: &Path) -> App {
    let mut app = App::new(App::terminal_viewer_options(), Preferences::ephemeral());
    app.open_file(path).unwrap();
    app
}

#[test]
#[serial]
fn test_two_page_view_renders_consecutive_pages() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(dir.path(), "notes.txt", 100);
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&path);

    run(&mut terminal, &mut app, TestScenarioBuilder::new().next_page(2));

    assert_eq!(app.viewer().total_pages(), 5);
    assert_eq!(app.viewer().anchor_page(), 3);
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Pages 3-4 of 5 (Sliding)"), "{screen}");
    assert!(screen.contains("line 41"), "{screen}");
    assert!(screen.contains("line 61"), "{screen}");
    assert!(!screen.contains("line 40 "), "{screen}");
    assert!(screen.contains("< Previous Page"), "{screen}");
    assert!(screen.contains("Next Page >"), "{screen}");
}

#[test]
#[serial]
fn test_spread_navigation_stops_on_last_page() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(dir.path(), "notes.txt", 100);
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&path);

    run(
        &mut terminal,
        &mut app,
        TestScenarioBuilder::new().toggle_policy().next_page(3),
    );

    assert_eq!(app.viewer().advance_policy(), AdvancePolicy::Spread);
    assert_eq!(app.viewer().anchor_page(), 5);
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Page 5 of 5 (Spread)"), "{screen}");
    assert!(screen.contains("Next Spread >"), "{screen}");
    assert!(screen.contains("line 81"), "{screen}");
}

#[test]
#[serial]
fn test_single_mode_uses_full_width() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wide.txt");
    fs::write(&path, "word ".repeat(30)).unwrap();
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&path);

    // 38 columns per pane: 7 words of "word " per row
    run(&mut terminal, &mut app, TestScenarioBuilder::new());
    assert_eq!(app.viewer().primary().lines().len(), 5);

    // 78 columns: 15 words per row
    run(&mut terminal, &mut app, TestScenarioBuilder::new().toggle_mode());
    assert_eq!(app.viewer().mode(), DisplayMode::Single);
    assert_eq!(app.viewer().primary().lines().len(), 2);
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Page 1 of 1"), "{screen}");
}

#[test]
#[serial]
fn test_terminal_resize_repaginates_and_clamps() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(dir.path(), "notes.txt", 100);
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&path);

    run(&mut terminal, &mut app, TestScenarioBuilder::new().last_page());
    assert_eq!(app.viewer().anchor_page(), 5);

    terminal.backend_mut().resize(80, 44);
    run(
        &mut terminal,
        &mut app,
        TestScenarioBuilder::new().resize(80, 44),
    );

    assert_eq!(app.viewer().total_pages(), 3);
    assert_eq!(app.viewer().anchor_page(), 3);
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Page 3 of 3 (Sliding)"), "{screen}");
}

#[test]
#[serial]
fn test_line_numbers_and_zoom_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(dir.path(), "notes.txt", 100);
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&path);

    run(&mut terminal, &mut app, TestScenarioBuilder::new().press_char('#'));
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("  1: line 1"), "{screen}");
    assert!(screen.contains(" 21: line 21"), "{screen}");

    run(&mut terminal, &mut app, TestScenarioBuilder::new().zoom_in());
    assert_eq!(app.viewer().zoom().percent(), 110);
    assert_eq!(app.viewer().total_pages(), 6);
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("Zoom 110%"), "{screen}");
}

#[test]
#[serial]
fn test_ctrl_c_quits_immediately() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(dir.path(), "notes.txt", 100);
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&path);

    run(
        &mut terminal,
        &mut app,
        TestScenarioBuilder::new().press_ctrl_char('c').next_page(3),
    );
    assert_eq!(app.viewer().anchor_page(), 1);
}

#[test]
#[serial]
fn test_recent_popup_opens_selected_file() {
    let dir = TempDir::new().unwrap();
    let first = write_lines(dir.path(), "first.txt", 10);
    let second = write_lines(dir.path(), "second.txt", 10);
    let mut terminal = create_test_terminal(80, 24);
    let mut app = app_with_file(&first);
    app.open_file(&second).unwrap();

    // most recent first: second.txt, first.txt
    run(
        &mut terminal,
        &mut app,
        TestScenarioBuilder::new()
            .press_char('r')
            .press_char('j')
            .press_key(KeyCode::Enter),
    );

    assert!(!app.is_recent_popup_open());
    let title = app.viewer().document().map(|document| document.title());
    assert_eq!(title.as_deref(), Some("first.txt"));
    assert_eq!(
        app.preferences().recent_files()[0].path.file_name(),
        first.file_name()
    );
}

#[test]
#[serial]
fn test_missing_recent_file_is_dropped() {
    let dir = TempDir::new().unwrap();
    let kept = write_lines(dir.path(), "kept.txt", 10);
    let gone = write_lines(dir.path(), "gone.txt", 10);
    let mut app = app_with_file(&kept);
    app.open_file(&gone).unwrap();
    fs::remove_file(&gone).unwrap();

    let gone_abs = app.preferences().recent_files()[0].path.clone();
    app.open_recent(&gone_abs);

    assert_eq!(app.preferences().recent_files().len(), 1);
    let message = app
        .notifications()
        .current()
        .map(|n| n.message.clone())
        .unwrap_or_default();
    assert!(message.contains("no longer exists"), "{message}");
    // the document that was open stays open
    assert_eq!(
        app.viewer().document().map(|document| document.title()).as_deref(),
        Some("gone.txt")
    );
}

#[test]
#[serial]
fn test_open_failure_keeps_current_document() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(dir.path(), "notes.txt", 10);
    let mut app = app_with_file(&path);

    let result = app.open_file(&dir.path().join("missing.txt"));
    assert!(result.is_err());
    assert!(result.unwrap_err().is_not_found());
    assert_eq!(app.viewer().document().map(|d| d.line_count()), Some(10));
    assert_eq!(app.preferences().recent_files().len(), 1);
}

#[test]
#[serial]
fn test_most_recent_file_is_reopened_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config").join("config.json");
    let path = write_lines(dir.path(), "notes.txt", 30);

    {
        let mut app = App::new(App::terminal_viewer_options(), Preferences::with_file(&config));
        app.open_file(&path).unwrap();
    }

    let preferences = Preferences::load_or_ephemeral(Some(&config));
    let mut app = App::new(App::terminal_viewer_options(), preferences);
    assert!(app.load_most_recent());
    assert_eq!(app.viewer().document().map(|d| d.line_count()), Some(30));
}

#[test]
#[serial]
fn test_empty_session_shows_hint() {
    let mut terminal = create_test_terminal(80, 24);
    let mut app = App::new(App::terminal_viewer_options(), Preferences::ephemeral());
    assert!(!app.load_most_recent());

    run(&mut terminal, &mut app, TestScenarioBuilder::new());
    let screen = capture_terminal_state(&terminal);
    assert!(screen.contains("No file open"), "{screen}");
    assert!(screen.contains("Page 1 of 1 (Sliding)"), "{screen}");
}

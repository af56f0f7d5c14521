// Export modules for use in tests
pub mod document;
pub mod error;
pub mod event_source;
pub mod main_app;
pub mod navigation;
pub mod notification;
pub mod page_renderer;
pub mod pagination;
pub mod pane;
pub mod panic_handler;
pub mod paths;
pub mod preferences;
pub mod recent_files;
pub mod theme;
pub mod viewer;
pub mod viewport;
pub mod wrap;
pub mod zoom;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main app components
pub use main_app::{App, AppAction, run_app_with_event_source};

pub mod test_helpers {
    use crate::event_source::{Event, KeyCode, KeyModifiers, SimulatedEventSource, press, press_with};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Builder for creating test scenarios with simulated user input
    #[derive(Default)]
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(press(KeyCode::Char(c)));
            self
        }

        /// Add a Ctrl+character key press
        pub fn press_ctrl_char(mut self, c: char) -> Self {
            self.events
                .push(press_with(KeyCode::Char(c), KeyModifiers::CONTROL));
            self
        }

        pub fn press_key(mut self, code: KeyCode) -> Self {
            self.events.push(press(code));
            self
        }

        /// Advance n times (Space)
        pub fn next_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(press(KeyCode::Char(' ')));
            }
            self
        }

        /// Go back n times (b)
        pub fn previous_page(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(press(KeyCode::Char('b')));
            }
            self
        }

        pub fn last_page(self) -> Self {
            self.press_char('G')
        }

        pub fn zoom_in(self) -> Self {
            self.press_char('+')
        }

        /// Single/two-page view (t)
        pub fn toggle_mode(self) -> Self {
            self.press_char('t')
        }

        /// Sliding/spread (v)
        pub fn toggle_policy(self) -> Self {
            self.press_char('v')
        }

        pub fn resize(mut self, width: u16, height: u16) -> Self {
            self.events.push(Event::Resize(width, height));
            self
        }

        /// Quit the application (press 'q')
        pub fn quit(self) -> Self {
            self.press_char('q')
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Create a test terminal for snapshot testing
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    /// Capture the current terminal buffer as a string
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            // Trim trailing whitespace from each line
            lines.push(line.trim_end().to_string());
        }

        // Remove trailing empty lines
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }
}

use anyhow::Result;
pub use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::time::Duration;

/// Where the main loop reads its input from
pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    fn read(&mut self) -> Result<Event>;
}

/// Terminal input through crossterm
pub struct KeyboardEventSource;

impl EventSource for KeyboardEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(crossterm::event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(crossterm::event::read()?)
    }
}

/// A scripted run. Once the script is used up every read answers `q`, so
/// the loop always ends.
pub struct SimulatedEventSource {
    pending: VecDeque<Event>,
}

impl SimulatedEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            pending: events.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for SimulatedEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(true)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(self
            .pending
            .pop_front()
            .unwrap_or_else(|| press(KeyCode::Char('q'))))
    }
}

/// Key press without modifiers
pub fn press(code: KeyCode) -> Event {
    press_with(code, KeyModifiers::NONE)
}

pub fn press_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

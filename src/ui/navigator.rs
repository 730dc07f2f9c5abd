use colored::*;
use std::sync::Mutex;

/// Where the client sends the user, and how it drops in-memory state
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
    fn reload(&self);
}

/// Prints navigation requests for a terminal user
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: &str) {
        eprintln!("{}", format!("-> {}", route).cyan());
    }

    fn reload(&self) {
        eprintln!("{}", "Session state discarded.".dimmed());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Redirect(String),
    Reload,
}

/// Keeps every navigation request so callers can inspect them later
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: NavigationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &str) {
        self.push(NavigationEvent::Redirect(route.to_string()));
    }

    fn reload(&self) {
        self.push(NavigationEvent::Reload);
    }
}

//! Navigation seam between the session and whatever hosts the screens

use std::fmt;
use std::sync::Mutex;

use colored::Colorize;

use super::lock;

/// Screens a user can be on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Unauthenticated entry screen
    Login,
    Register,
    Profile,
    Instances,
    /// Metrics detail for one instance
    Metrics(String),
    /// Commands that do not correspond to a screen
    Other,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Login => write!(f, "login"),
            Screen::Register => write!(f, "register"),
            Screen::Profile => write!(f, "profile"),
            Screen::Instances => write!(f, "instances"),
            Screen::Metrics(id) => write!(f, "metrics/{id}"),
            Screen::Other => write!(f, "other"),
        }
    }
}

/// Host-side navigation, injected into the session.
///
/// The session calls [`Navigator::navigate`] on forced logout.
pub trait Navigator: Send + Sync {
    fn current(&self) -> Screen;

    fn navigate(&self, to: Screen);
}

/// Navigator for the terminal: tracks the active screen and tells the user
/// where to go when sent back to the login screen.
#[derive(Debug)]
pub struct TerminalNavigator {
    current: Mutex<Screen>,
}

impl TerminalNavigator {
    pub fn new(screen: Screen) -> Self {
        Self {
            current: Mutex::new(screen),
        }
    }
}

impl Navigator for TerminalNavigator {
    fn current(&self) -> Screen {
        lock(&self.current).clone()
    }

    fn navigate(&self, to: Screen) {
        if to == Screen::Login {
            eprintln!(
                "{} Your session has ended. Run {} to sign in again.",
                "⚠".yellow(),
                "scalectl login".cyan()
            );
        }
        *lock(&self.current) = to;
    }
}

/// Navigator that records every navigation, for tests
#[cfg(test)]
#[derive(Debug)]
pub struct RecordingNavigator {
    current: Mutex<Screen>,
    history: Mutex<Vec<Screen>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn new(screen: Screen) -> Self {
        Self {
            current: Mutex::new(screen),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn history(&self) -> Vec<Screen> {
        lock(&self.history).clone()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn current(&self) -> Screen {
        lock(&self.current).clone()
    }

    fn navigate(&self, to: Screen) {
        lock(&self.history).push(to.clone());
        *lock(&self.current) = to;
    }
}

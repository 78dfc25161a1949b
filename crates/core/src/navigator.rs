//! In-app location access

use std::cell::RefCell;
use std::rc::Rc;

/// Reads and replaces the current in-app location
pub trait Navigator {
    /// Current in-app path (`/staff/42`)
    fn current_path(&self) -> String;

    /// Move to `path`, superseding any in-flight navigation
    fn navigate(&self, path: &str);
}

/// Navigator that only remembers where it is; used off-browser and in tests
#[derive(Clone, Debug, Default)]
pub struct MemoryNavigator {
    state: Rc<RefCell<NavigatorState>>,
}

#[derive(Debug, Default)]
struct NavigatorState {
    path: String,
    history: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(path: impl Into<String>) -> Self {
        let navigator = Self::default();
        navigator.state.borrow_mut().path = path.into();
        navigator
    }

    /// Every path passed to [`Navigator::navigate`], oldest first
    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.state.borrow().path.clone()
    }

    fn navigate(&self, path: &str) {
        let mut state = self.state.borrow_mut();
        state.path = path.to_string();
        state.history.push(path.to_string());
    }
}

//! Routing seam: the list only needs to read and replace the query string.

use std::sync::Mutex;

/// Capability the host router exposes to the list controller.
pub trait Navigator: Send + Sync + 'static {
    /// Current query string, without the leading `?`.
    fn query_string(&self) -> String;

    /// Swaps the query string without creating a history entry.
    fn replace_query_string(&self, query: &str);
}

/// In-memory router with a history stack, used by tests and the demo binary.
#[derive(Debug)]
pub struct MemoryNavigator {
    state: Mutex<NavigatorState>,
}

#[derive(Debug)]
struct NavigatorState {
    history: Vec<String>,
    replaces: usize,
}

impl MemoryNavigator {
    pub fn new(initial_query: &str) -> Self {
        Self {
            state: Mutex::new(NavigatorState {
                history: vec![initial_query.trim_start_matches('?').to_string()],
                replaces: 0,
            }),
        }
    }

    /// Simulates the user following a link: pushes a new entry.
    pub fn push_query_string(&self, query: &str) {
        let mut state = self.lock();
        state.history.push(query.trim_start_matches('?').to_string());
    }

    /// Simulates the browser back button. Returns false at the first entry.
    pub fn back(&self) -> bool {
        let mut state = self.lock();
        if state.history.len() > 1 {
            state.history.pop();
            true
        } else {
            false
        }
    }

    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }

    pub fn replace_count(&self) -> usize {
        self.lock().replaces
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NavigatorState> {
        // A poisoned lock still holds a consistent Vec<String>.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("")
    }
}

impl Navigator for MemoryNavigator {
    fn query_string(&self) -> String {
        self.lock().history.last().cloned().unwrap_or_default()
    }

    fn replace_query_string(&self, query: &str) {
        let mut state = self.lock();
        state.replaces += 1;
        let query = query.trim_start_matches('?').to_string();
        match state.history.last_mut() {
            Some(current) => *current = query,
            None => state.history.push(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_does_not_grow_history() {
        let navigator = MemoryNavigator::new("?page=1");
        navigator.push_query_string("page=1&view=list");
        navigator.replace_query_string("page=2&view=list");
        navigator.replace_query_string("page=3&view=list");
        assert_eq!(navigator.history_len(), 2);

        // Back leaves the list; it does not undo the page change.
        assert!(navigator.back());
        assert_eq!(navigator.query_string(), "page=1");
        assert!(!navigator.back());
    }
}

use crate::core::Navigator;
use std::sync::Mutex;

/// Stack of visited views; `go_back` pops the current one.
#[derive(Debug)]
pub struct HistoryNavigator {
    stack: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(vec![root.into()]),
        }
    }

    pub fn push(&self, view: impl Into<String>) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.push(view.into());
        }
    }

    pub fn current(&self) -> Option<String> {
        self.stack.lock().ok().and_then(|stack| stack.last().cloned())
    }
}

impl Navigator for HistoryNavigator {
    fn go_back(&self) {
        if let Ok(mut stack) = self.stack.lock() {
            // The root view stays.
            if stack.len() > 1 {
                let left = stack.pop();
                tracing::debug!("Navigating back from {:?}", left);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_back_returns_to_previous_view() {
        let nav = HistoryNavigator::new("courses");
        nav.push("courses/new");
        assert_eq!(nav.current().as_deref(), Some("courses/new"));

        nav.go_back();
        assert_eq!(nav.current().as_deref(), Some("courses"));

        nav.go_back();
        assert_eq!(nav.current().as_deref(), Some("courses"));
    }
}

//! Navigation history sources.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

/// A source of the current location that can be navigated.
///
/// The browser backend wraps `window.history`; [`MemoryHistory`] keeps the
/// stack in memory.
pub trait History {
    /// The current path, including any query string.
    fn location(&self) -> String;

    /// Adds a new entry and makes it current.
    fn push(&mut self, path: &str);

    /// Replaces the current entry.
    fn replace(&mut self, path: &str);

    /// Moves `delta` entries through the stack. Out-of-range moves are ignored.
    fn go(&mut self, delta: isize);

    /// Same as `go(-1)`.
    fn back(&mut self) {
        self.go(-1);
    }

    /// Same as `go(1)`.
    fn forward(&mut self) {
        self.go(1);
    }
}

/// An in-memory history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    /// Creates a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            entries: alloc::vec![initial.to_string()],
            cursor: 0,
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl History for MemoryHistory {
    fn location(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.to_string());
        self.cursor += 1;
    }

    fn replace(&mut self, path: &str) {
        self.entries[self.cursor] = path.to_string();
    }

    fn go(&mut self, delta: isize) {
        let Some(target) = self.cursor.checked_add_signed(delta) else {
            return;
        };
        if target < self.entries.len() {
            self.cursor = target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push("/video-to-text");
        history.push("/text-to-video");
        history.back();
        history.back();
        assert_eq!(history.location(), "/");
        history.push("/test");
        assert_eq!(history.entries(), ["/", "/test"]);
        history.forward();
        assert_eq!(history.location(), "/test");
    }

    #[test]
    fn test_go_ignores_out_of_range() {
        let mut history = MemoryHistory::default();
        history.back();
        history.go(5);
        assert_eq!(history.location(), "/");
        history.replace("/text-to-video");
        assert_eq!(history.entries(), ["/text-to-video"]);
    }
}

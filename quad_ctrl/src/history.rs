//! Command history

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// First entry of every new history.
pub const NEW_HISTORY: &str = "*** new history ***";

/// Size of the recent window returned by [`CommandHistory::last_ten`].
const RECENT_WINDOW: usize = 10;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Append-only log of the commands a robot has performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandHistory {
    entries: Vec<String>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Create a history seeded with the [`NEW_HISTORY`] marker.
    pub fn new() -> Self {
        Self {
            entries: vec![String::from(NEW_HISTORY)],
        }
    }

    pub fn append<S: Into<String>>(&mut self, command: S) {
        self.entries.push(command.into());
    }

    /// Wipe the history. The marker is not re-added.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, oldest first.
    pub fn history(&self) -> &[String] {
        &self.entries
    }

    /// The most recent ten entries (or fewer if the history is shorter), oldest first.
    pub fn last_ten(&self) -> &[String] {
        let start = self.entries.len().saturating_sub(RECENT_WINDOW);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_history() {
        let history = CommandHistory::new();
        assert_eq!(history.history(), &[String::from(NEW_HISTORY)]);
        assert_eq!(history.last_ten(), history.history());
    }

    #[test]
    fn test_last_ten() {
        let mut history = CommandHistory::new();
        for i in 0..15 {
            history.append(format!("cmd {}", i));
        }

        let expected: Vec<String> = (5..15).map(|i| format!("cmd {}", i)).collect();
        assert_eq!(history.last_ten(), expected.as_slice());

        // Non-destructive
        assert_eq!(history.len(), 16);
        assert_eq!(history.last_ten(), expected.as_slice());
    }

    #[test]
    fn test_clear() {
        let mut history = CommandHistory::new();
        history.append("sit");
        history.clear();

        assert!(history.is_empty());
        assert!(history.last_ten().is_empty());

        history.append("stand");
        assert_eq!(history.history(), &[String::from("stand")]);
    }

    #[test]
    fn test_serialises_as_list() {
        let mut history = CommandHistory::new();
        history.append("clap 2");

        assert_eq!(
            serde_json::to_string(&history).unwrap(),
            r#"["*** new history ***","clap 2"]"#
        );
    }
}

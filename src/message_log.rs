//! Progress messages pushed by the extension

/// Append-only log of received messages. Nothing is ever evicted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    entries: Vec<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        MessageLog {
            entries: Vec::new(),
        }
    }

    pub fn append(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Markup of the log element: every entry followed by `<br>`
    pub fn content(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}<br>", entry))
            .collect()
    }
}

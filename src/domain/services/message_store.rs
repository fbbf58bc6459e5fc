#[cfg(test)]
#[path = "message_store_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Author;
use crate::domain::models::Message;

/// The ordered log of conversation entries. Entries are only ever appended or
/// extended with a suffix patch; nothing removes or reorders prior content.
#[derive(Default)]
pub struct MessageStore {
    entries: Vec<Message>,
}

impl MessageStore {
    pub fn append(&mut self, message: Message) -> Result<()> {
        if self.contains(&message.id) {
            bail!(format!("message id {} already exists in the store", message.id));
        }

        self.entries.push(message);
        return Ok(());
    }

    /// Extends the matching entry's text when `id` is known, otherwise creates
    /// a new entry at the end of the log. This is the single mutation the
    /// reconciler uses, and it never awaits, so it stays atomic relative to
    /// other event handlers on the UI loop.
    pub fn patch_by_id_or_append(&mut self, id: &str, delta: &str, author_if_new: Author) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| return entry.id == id) {
            entry.append(delta);
            return;
        }

        self.entries.push(Message::with_id(id, author_if_new, delta));
    }

    pub fn contains(&self, id: &str) -> bool {
        return self.entries.iter().any(|entry| return entry.id == id);
    }

    /// Order-preserving filtered view, recomputed on demand.
    pub fn project<P: Fn(&Message) -> bool>(&self, predicate: P) -> Vec<&Message> {
        return self.entries.iter().filter(|entry| return predicate(entry)).collect();
    }

    pub fn messages(&self) -> &[Message] {
        return &self.entries;
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod tests;

use std::collections::HashSet;

use crate::domain::models::Author;
use crate::domain::models::StreamPayload;

use super::MessageStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reconciled {
    /// The fragment was folded into the store; the stream stays open.
    Applied,
    /// The terminal fragment was folded in and the stream is now closed.
    Closed,
    /// Malformed or late fragment; the store was left untouched.
    Discarded,
}

/// Folds stream payloads into the message store. The first fragment seen for a
/// response id creates a generated entry, every subsequent one appends to it.
/// Closing a stream is bookkeeping only; content is never altered on close.
#[derive(Default)]
pub struct StreamReconciler {
    closed: HashSet<String>,
}

impl StreamReconciler {
    pub fn handle(&mut self, store: &mut MessageStore, payload: &StreamPayload) -> Reconciled {
        let fragment = match payload.fragment() {
            Ok(fragment) => fragment,
            Err(err) => {
                tracing::error!(error = %err, "discarding malformed fragment");
                return Reconciled::Discarded;
            }
        };

        if self.closed.contains(&fragment.response_id) {
            // The protocol does not rule this out across reconnects. Never
            // reopen a closed entry.
            tracing::warn!(
                response_id = %fragment.response_id,
                "ignoring fragment for a closed stream"
            );
            return Reconciled::Discarded;
        }

        store.patch_by_id_or_append(&fragment.response_id, &fragment.delta, Author::Generated);

        if fragment.is_final {
            self.closed.insert(fragment.response_id);
            return Reconciled::Closed;
        }

        return Reconciled::Applied;
    }

    pub fn is_closed(&self, response_id: &str) -> bool {
        return self.closed.contains(response_id);
    }
}

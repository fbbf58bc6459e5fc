#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use ratatui::style::Color;

use super::MessageStore;
use super::PaneList;
use super::Reconciled;
use super::Scroll;
use super::StreamReconciler;
use crate::domain::models::Author;
use crate::domain::models::ChatRequest;
use crate::domain::models::ConnectionStatus;
use crate::domain::models::Message;
use crate::domain::models::StreamPayload;

/// Root state for the session: the message store, the reconciler folding
/// fragments into it, and the derived render state for both panes. Created at
/// session start, discarded on teardown, mutated only on the UI event loop.
pub struct AppState<'a> {
    pub store: MessageStore,
    pub reconciler: StreamReconciler,
    pub human_pane: PaneList<'a>,
    pub generated_pane: PaneList<'a>,
    pub human_scroll: Scroll,
    pub generated_scroll: Scroll,
    pub connection: ConnectionStatus,
    pub last_error: Option<String>,
    pub waiting_for_channel: bool,
    pub last_known_width: u16,
    pub last_known_height: u16,
}

impl<'a> AppState<'a> {
    pub fn new() -> AppState<'a> {
        return AppState {
            store: MessageStore::default(),
            reconciler: StreamReconciler::default(),
            human_pane: PaneList::new(Color::Cyan),
            generated_pane: PaneList::new(Color::Magenta),
            human_scroll: Scroll::default(),
            generated_scroll: Scroll::default(),
            connection: ConnectionStatus::default(),
            last_error: None,
            waiting_for_channel: false,
            last_known_width: 0,
            last_known_height: 0,
        };
    }

    pub fn add_message(&mut self, message: Message) -> Result<()> {
        self.store.append(message)?;
        self.sync_dependants();
        self.human_scroll.last();
        self.generated_scroll.last();

        return Ok(());
    }

    /// Builds the outbound request for the channel: the whole turn history,
    /// latest human turn included.
    pub fn chat_request(&self) -> ChatRequest {
        return ChatRequest::from_history(self.store.messages());
    }

    pub fn handle_stream_payload(&mut self, payload: StreamPayload) {
        match self.reconciler.handle(&mut self.store, &payload) {
            Reconciled::Applied => {}
            Reconciled::Closed => {
                self.waiting_for_channel = false;
            }
            Reconciled::Discarded => {
                return;
            }
        }

        self.sync_dependants();
    }

    pub fn handle_channel_error(&mut self, error: String) {
        self.waiting_for_channel = false;
        self.last_error = Some(error);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        let pane_width = self.last_known_width as usize;

        let human_view = self.store.project(|message| return message.author == Author::Human);
        self.human_pane.set_messages(&human_view, pane_width);

        let generated_view = self
            .store
            .project(|message| return message.author == Author::Generated);
        self.generated_pane.set_messages(&generated_view, pane_width);

        self.human_scroll
            .set_state(self.human_pane.len() as u16, self.last_known_height);
        self.generated_scroll
            .set_state(self.generated_pane.len() as u16, self.last_known_height);

        if self.waiting_for_channel {
            self.generated_scroll.last();
        }
    }
}

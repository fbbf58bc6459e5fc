pub mod channels;
pub mod events;
mod app_state;
mod message_store;
mod pane_list;
mod reconciler;
mod scroll;

pub use app_state::*;
pub use message_store::*;
pub use pane_list::*;
pub use reconciler::*;
pub use scroll::*;

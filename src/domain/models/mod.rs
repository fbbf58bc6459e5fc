mod action;
mod author;
mod channel;
mod event;
mod fragment;
mod loading;
mod message;
mod textarea;

pub use action::*;
pub use author::*;
pub use channel::*;
pub use event::*;
pub use fragment::*;
pub use loading::*;
pub use message::*;
pub use textarea::*;

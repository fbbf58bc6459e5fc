pub mod sse;
pub mod websocket;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ChannelBox;
use crate::domain::models::ChannelName;

pub struct ChannelManager {}

impl ChannelManager {
    pub fn get(name: ChannelName) -> Result<ChannelBox> {
        if name == ChannelName::Websocket {
            return Ok(Box::<websocket::Websocket>::default());
        }

        if name == ChannelName::Sse {
            return Ok(Box::<sse::Sse>::default());
        }

        bail!(format!("No channel implemented for {name}"))
    }
}

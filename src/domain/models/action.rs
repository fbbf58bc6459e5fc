use super::ChatRequest;

pub enum Action {
    ChannelAbort(),
    ChannelRequest(ChatRequest),
}

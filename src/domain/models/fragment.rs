#[cfg(test)]
#[path = "fragment_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadDelta {
    pub content: Option<String>,
    pub role: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadChoice {
    pub index: u32,
    pub delta: PayloadDelta,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// One `chat.completion.chunk` shaped unit as delivered over the wire. Fields
/// default so that partial payloads still parse; validation happens in
/// `fragment()`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPayload {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<PayloadChoice>,
}

/// The reconciler's view of a payload: a response identifier, a content delta,
/// and whether this is the terminal fragment of the logical stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFragment {
    pub response_id: String,
    pub delta: String,
    pub is_final: bool,
}

impl StreamPayload {
    pub fn fragment(&self) -> Result<StreamFragment> {
        if self.id.is_empty() {
            bail!("fragment is missing a response id");
        }

        let choice = match self.choices.first() {
            Some(choice) => choice,
            None => bail!("fragment carries no choices"),
        };

        let is_final = choice.finish_reason.as_deref() == Some("stop");
        let delta = match &choice.delta.content {
            Some(content) => content.to_string(),
            // The terminal fragment is allowed to carry no content at all.
            None if is_final => "".to_string(),
            None => bail!("fragment is missing delta content"),
        };

        return Ok(StreamFragment {
            response_id: self.id.to_string(),
            delta,
            is_final,
        });
    }

    /// True once any finish reason is present, whether or not the payload
    /// survives validation. Channels use this to stop reading.
    pub fn is_terminal(&self) -> bool {
        return self
            .choices
            .first()
            .and_then(|choice| return choice.finish_reason.as_deref())
            .is_some();
    }
}

//! Renderer trait and the Slack implementation.
//!
//! The dispatcher produces a [`Reply`] that knows nothing about any chat
//! platform. A [`Renderer`] turns it into that platform's message type.
//! Only Slack is supported today; another platform means another
//! `Renderer` impl and nothing else changes.

use crate::{Attachment, ProtocolError, Reply, SlackMessage};

/// Converts a [`Reply`] into a platform message.
///
/// `Send + Sync + 'static` because the renderer is shared by every
/// request task for the lifetime of the server.
pub trait Renderer: Send + Sync + 'static {
    /// The platform's message type.
    type Output;

    /// Renders the reply. Pure: no side effects, no failure.
    fn render(&self, reply: &Reply) -> Self::Output;
}

// ---------------------------------------------------------------------------
// SlackRenderer
// ---------------------------------------------------------------------------

/// Renders replies as Slack slash-command responses.
///
/// The headline becomes `text`; every detail becomes one attachment, in
/// order. Replies are always posted `in_channel`.
///
/// ```rust
/// use foosbot_protocol::{Renderer, Reply, SlackRenderer};
///
/// let reply = Reply::new("Game already created").with_detail("need more");
/// let msg = SlackRenderer.render(&reply);
///
/// assert_eq!(msg.response_type, "in_channel");
/// assert_eq!(msg.text, "Game already created");
/// assert_eq!(msg.attachments[0].text, "need more");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackRenderer;

impl SlackRenderer {
    /// The `response_type` that makes a reply visible to the channel.
    pub const RESPONSE_TYPE: &'static str = "in_channel";

    /// Renders and serializes the reply in one step.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if JSON serialization fails.
    pub fn to_json(&self, reply: &Reply) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(&self.render(reply)).map_err(ProtocolError::Encode)
    }
}

impl Renderer for SlackRenderer {
    type Output = SlackMessage;

    fn render(&self, reply: &Reply) -> SlackMessage {
        SlackMessage {
            response_type: Self::RESPONSE_TYPE.to_string(),
            text: reply.headline.clone(),
            attachments: reply
                .details
                .iter()
                .map(|text| Attachment { text: text.clone() })
                .collect(),
        }
    }
}

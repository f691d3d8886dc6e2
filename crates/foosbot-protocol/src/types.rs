//! Core protocol types: what the chat platform sends us and what we
//! send back.
//!
//! Inbound, the platform POSTs a form-encoded body for every slash
//! command. We only care about three fields of it (see [`SlashCommand`]).
//! Outbound, we answer with a JSON [`SlackMessage`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The platform's opaque identifier for a user (e.g. `U024BE7LH`).
///
/// A newtype around `String` so a user id can't be confused with a user
/// *name*. Both are strings in the form body, but only the id is
/// stable. Equality is exact-string; no case folding or trimming.
///
/// `Ord` is derived so rosters can be listed and tie-broken in a
/// deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Creates a `UserId` from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the id as a platform mention: `<@U024BE7LH>`.
    ///
    /// The chat client renders this as a clickable, notifying @-mention.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A slash command the bot understands.
///
/// Parsing never fails: anything we don't recognize becomes
/// [`Command::Unknown`], which the dispatcher answers with a hint. That
/// keeps dispatch total: every (state, command) pair has a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/explain`: list the available commands.
    Explain,
    /// `/giveup`: leave the game being collected.
    GiveUp,
    /// `/new`: open a new game.
    New,
    /// `/play`: join the open game.
    Play,
    /// `/reset`: cancel the open game, whoever joined it.
    Reset,
    /// `/current`: show who has joined so far.
    Current,
    /// Anything else. Carries the raw text for logging.
    Unknown(String),
}

impl Command {
    /// Parses the `command` form field (e.g. `"/play"`).
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "/explain" => Self::Explain,
            "/giveup" => Self::GiveUp,
            "/new" => Self::New,
            "/play" => Self::Play,
            "/reset" => Self::Reset,
            "/current" => Self::Current,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The slash-command text for this command.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Explain => "/explain",
            Self::GiveUp => "/giveup",
            Self::New => "/new",
            Self::Play => "/play",
            Self::Reset => "/reset",
            Self::Current => "/current",
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Inbound: SlashCommand → CommandRequest
// ---------------------------------------------------------------------------

/// The form body the platform POSTs for a slash command.
///
/// The real payload carries many more fields (`team_id`, `channel_id`,
/// `response_url`, ...). Serde ignores unknown fields by default, so we
/// only declare the ones we use. A missing field is a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlashCommand {
    /// The command text, including the leading slash.
    pub command: String,
    /// Display name of the invoking user. Only used for logging.
    pub user_name: String,
    /// Stable id of the invoking user.
    pub user_id: String,
}

impl SlashCommand {
    /// Parses a verified, form-encoded request body.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Parse`] if the body isn't valid form
    /// data, a required field is missing, or `user_id` is blank.
    pub fn from_form(body: &[u8]) -> Result<Self, ProtocolError> {
        let cmd: SlashCommand = serde_urlencoded::from_bytes(body)?;
        if cmd.user_id.trim().is_empty() {
            return Err(ProtocolError::Parse("user_id is empty".into()));
        }
        Ok(cmd)
    }

    /// Converts the raw form into the typed request the dispatcher takes.
    pub fn into_request(self) -> CommandRequest {
        CommandRequest {
            command: Command::parse(&self.command),
            user_id: UserId(self.user_id),
            user_name: self.user_name,
        }
    }
}

/// A verified, parsed command, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub command: Command,
    pub user_id: UserId,
    pub user_name: String,
}

impl CommandRequest {
    /// Builds a request directly. Handy for tests and tooling that
    /// bypass the HTTP layer.
    pub fn new(command: Command, user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            command,
            user_id: UserId::new(user_id),
            user_name: user_name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound: Reply → SlackMessage
// ---------------------------------------------------------------------------

/// The platform-agnostic answer to a command.
///
/// `headline` is the main line of text; each entry of `details` becomes
/// one extra block under it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub headline: String,
    pub details: Vec<String>,
}

impl Reply {
    /// A reply with a headline and no details.
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            details: Vec::new(),
        }
    }

    /// Appends one detail block.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// One attachment block of a [`SlackMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub text: String,
}

/// The JSON body of a slash-command response.
///
/// ```json
/// { "response_type": "in_channel", "text": "...", "attachments": [{"text": "..."}] }
/// ```
///
/// `response_type: "in_channel"` makes the reply visible to the whole
/// channel instead of only the invoking user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub response_type: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // UserId
    // =====================================================================

    #[test]
    fn test_user_id_mention_format() {
        assert_eq!(UserId::new("U123").mention(), "<@U123>");
    }

    #[test]
    fn test_user_id_equality_is_exact() {
        assert_ne!(UserId::new("u1"), UserId::new("U1"));
        assert_ne!(UserId::new("u1"), UserId::new("u1 "));
    }

    #[test]
    fn test_user_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&UserId::new("U9")).unwrap();
        assert_eq!(json, "\"U9\"");
    }

    // =====================================================================
    // Command
    // =====================================================================

    #[test]
    fn test_command_parse_known_commands() {
        assert_eq!(Command::parse("/explain"), Command::Explain);
        assert_eq!(Command::parse("/giveup"), Command::GiveUp);
        assert_eq!(Command::parse("/new"), Command::New);
        assert_eq!(Command::parse("/play"), Command::Play);
        assert_eq!(Command::parse("/reset"), Command::Reset);
        assert_eq!(Command::parse("/current"), Command::Current);
    }

    #[test]
    fn test_command_parse_unknown_keeps_raw_text() {
        assert_eq!(Command::parse("/dance"), Command::Unknown("/dance".into()));
        // Case matters: the platform always sends lowercase.
        assert_eq!(Command::parse("/PLAY"), Command::Unknown("/PLAY".into()));
    }

    #[test]
    fn test_command_display_round_trips_text() {
        assert_eq!(Command::GiveUp.to_string(), "/giveup");
        assert_eq!(Command::Unknown("/x".into()).to_string(), "/x");
    }

    // =====================================================================
    // SlashCommand
    // =====================================================================

    #[test]
    fn test_slash_command_parses_required_fields_and_ignores_extra() {
        let body = b"token=abc&team_id=T1&command=%2Fplay&user_name=alice&user_id=U1&text=";
        let cmd = SlashCommand::from_form(body).unwrap();
        assert_eq!(cmd.command, "/play");
        assert_eq!(cmd.user_name, "alice");
        assert_eq!(cmd.user_id, "U1");

        let req = cmd.into_request();
        assert_eq!(req.command, Command::Play);
        assert_eq!(req.user_id, UserId::new("U1"));
    }

    #[test]
    fn test_slash_command_missing_field_is_parse_error() {
        let err = SlashCommand::from_form(b"command=%2Fplay&user_name=alice").unwrap_err();
        assert!(matches!(err, ProtocolError::Parse(_)));
        assert!(err.to_string().contains("user_id"));
    }

    #[test]
    fn test_slash_command_blank_user_id_is_parse_error() {
        let err = SlashCommand::from_form(b"command=%2Fplay&user_name=alice&user_id=").unwrap_err();
        assert!(matches!(err, ProtocolError::Parse(_)));
    }

    // =====================================================================
    // Reply / SlackMessage
    // =====================================================================

    #[test]
    fn test_reply_with_detail_preserves_order() {
        let reply = Reply::new("head").with_detail("one").with_detail("two");
        assert_eq!(reply.details, vec!["one", "two"]);
    }

    #[test]
    fn test_slack_message_json_shape() {
        let msg = SlackMessage {
            response_type: "in_channel".into(),
            text: "hi".into(),
            attachments: vec![Attachment { text: "a".into() }],
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["response_type"], "in_channel");
        assert_eq!(json["text"], "hi");
        assert_eq!(json["attachments"][0]["text"], "a");
    }
}

//! Canned chat replies keyed by conversation mode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Study,
    Tasks,
    Mentor,
    Motivation,
    Default,
}

const REPLIES: [(ChatMode, &str); 5] = [
    (
        ChatMode::Study,
        "Focus for 25–50 minutes. Ask me for a 7-day study plan anytime.",
    ),
    (
        ChatMode::Tasks,
        "I can help you organize and prioritize your tasks.",
    ),
    (
        ChatMode::Mentor,
        "As your mentor: Break goals into tiny steps and stay consistent.",
    ),
    (
        ChatMode::Motivation,
        "You are stronger than you think — keep going!",
    ),
    (
        ChatMode::Default,
        "Hello! Ask me about tasks, study plan, mood, or productivity.",
    ),
];

impl ChatMode {
    /// Parse a mode name; anything unrecognized is [`ChatMode::Default`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "study" => ChatMode::Study,
            "tasks" => ChatMode::Tasks,
            "mentor" => ChatMode::Mentor,
            "motivation" => ChatMode::Motivation,
            _ => ChatMode::Default,
        }
    }

    pub fn reply(self) -> &'static str {
        REPLIES
            .iter()
            .find(|(mode, _)| *mode == self)
            .map_or(REPLIES[4].1, |(_, reply)| reply)
    }
}

/// A chat message. The text itself does not influence the reply.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Echo of the requested mode, present on mode-aware replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Reply in the default mode.
pub fn respond(_message: &str) -> ChatReply {
    ChatReply {
        reply: ChatMode::Default.reply().to_string(),
        mode: None,
    }
}

/// Reply in `mode`, echoing the mode string back (`"default"` if absent).
pub fn respond_in_mode(_message: &str, mode: Option<&str>) -> ChatReply {
    let mode = mode.unwrap_or("default");
    ChatReply {
        reply: ChatMode::from_name(mode).reply().to_string(),
        mode: Some(mode.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_a_reply() {
        for mode in [
            ChatMode::Study,
            ChatMode::Tasks,
            ChatMode::Mentor,
            ChatMode::Motivation,
            ChatMode::Default,
        ] {
            assert!(!mode.reply().is_empty());
        }
        assert!(ChatMode::Study.reply().contains("study plan"));
    }

    #[test]
    fn unknown_mode_falls_back_to_default() {
        assert_eq!(ChatMode::from_name("poetry"), ChatMode::Default);
        assert_eq!(ChatMode::from_name(" Mentor "), ChatMode::Mentor);

        let reply = respond_in_mode("hi", Some("poetry"));
        assert_eq!(reply.reply, ChatMode::Default.reply());
        assert_eq!(reply.mode.as_deref(), Some("poetry"));
    }

    #[test]
    fn plain_chat_uses_default_greeting() {
        let reply = respond("what should I do?");
        assert!(reply.reply.starts_with("Hello!"));
        assert!(reply.mode.is_none());
        assert_eq!(respond_in_mode("x", None).mode.as_deref(), Some("default"));
    }
}

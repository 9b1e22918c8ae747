// SPDX-FileCopyrightText: 2026 Autoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Autoroute workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Coarse complexity tier of a conversation, also used to describe which
/// tier a model is suited for in the capability table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    /// Any role this gateway does not know about (e.g. legacy `function`).
    #[serde(other)]
    Other,
}

/// A single part of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Message body: plain text or an array of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Returns the textual content, joining text parts with a single space.
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter(|p| p.kind == "text")
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// A chat message as it appears in an OpenAI-style `messages` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl ChatMessage {
    /// Convenience constructor for a plain-text message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(MessageContent::Text(content.into())),
        }
    }

    /// Convenience constructor for a plain-text user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Textual content, empty when the message carries none.
    pub fn text(&self) -> String {
        self.content.as_ref().map(MessageContent::text).unwrap_or_default()
    }
}

/// A request handed to a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Serialized JSON body, already rewritten by the interception point.
    pub body: Vec<u8>,
    /// Caller's `Authorization` header, forwarded verbatim.
    pub authorization: Option<String>,
}

/// Raw provider response returned by a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone)]
pub struct DispatchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

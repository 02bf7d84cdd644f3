// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the lead engine and channel adapters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a conversation (a Telegram chat, a test fixture, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for ConversationId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Opaque identifier of a lead record, the only external reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LeadId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Transport-assigned identifier of a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is not operational.
    Unhealthy(String),
}

/// What the user sent: free text typed into the chat, or the payload of a
/// button they pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    Text(String),
    Action(String),
}

/// An inbound event received from a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub conversation_id: ConversationId,
    pub payload: EventPayload,
}

impl InboundEvent {
    /// Builds a free-text event.
    pub fn text(conversation_id: impl Into<ConversationId>, text: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            payload: EventPayload::Text(text.into()),
        }
    }

    /// Builds a structured-action (button press) event.
    pub fn action(conversation_id: impl Into<ConversationId>, payload: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            payload: EventPayload::Action(payload.into()),
        }
    }
}

/// A single pressable button: the label shown to the user and the action
/// payload sent back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Buttons attached to one message, grouped into rows. Rendering is up to
/// the channel adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSet {
    pub rows: Vec<Vec<Button>>,
}

impl ButtonSet {
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// Iterates over all buttons in row order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// Iterates over the action payloads of all buttons in row order.
    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.buttons().map(|b| b.payload.as_str())
    }
}

/// A persistent menu of free-text commands (a reply keyboard on Telegram).
/// Pressing an entry sends its label back as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLayout {
    pub rows: Vec<Vec<String>>,
}

/// Interactive options attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Markup {
    /// Per-message action buttons.
    Actions(ButtonSet),
    /// The top-level command menu.
    Menu(MenuLayout),
}

/// An outbound message to be sent via a channel adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub conversation_id: ConversationId,
    pub text: String,
    pub markup: Option<Markup>,
}

impl OutboundMessage {
    /// A plain text message without any options.
    pub fn text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            markup: None,
        }
    }

    /// A message carrying action buttons. An empty set is sent without markup.
    pub fn with_actions(
        conversation_id: ConversationId,
        text: impl Into<String>,
        buttons: ButtonSet,
    ) -> Self {
        let markup = (!buttons.is_empty()).then_some(Markup::Actions(buttons));
        Self {
            conversation_id,
            text: text.into(),
            markup,
        }
    }

    /// A message that (re)displays the command menu.
    pub fn with_menu(conversation_id: ConversationId, text: impl Into<String>, menu: MenuLayout) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            markup: Some(Markup::Menu(menu)),
        }
    }

    /// Returns the action buttons, if this message carries any.
    pub fn buttons(&self) -> Option<&ButtonSet> {
        match &self.markup {
            Some(Markup::Actions(set)) => Some(set),
            _ => None,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion of Telegram updates into channel-agnostic [`InboundEvent`]s.
//!
//! Text messages become [`EventPayload::Text`](leadflow_core::EventPayload::Text);
//! inline button presses become
//! [`EventPayload::Action`](leadflow_core::EventPayload::Action) carrying the
//! callback data. The conversation is always the chat id.

use leadflow_core::{ConversationId, InboundEvent};
use teloxide::prelude::*;
use teloxide::types::ChatId;

/// Converts a text message. Returns `None` for non-text messages
/// (stickers, photos, service messages).
pub fn to_inbound_event(msg: &Message) -> Option<InboundEvent> {
    let text = msg.text()?;
    Some(InboundEvent::text(conversation_of(msg.chat.id), text))
}

/// Converts an inline button press. Returns `None` when the query carries
/// no callback data (game buttons).
///
/// The chat comes from the message the button was attached to. If Telegram
/// did not include it, the presser's private chat is used.
pub fn callback_to_inbound_event(query: &CallbackQuery) -> Option<InboundEvent> {
    let data = query.data.as_deref()?;
    let chat_id = query
        .message
        .as_ref()
        .map(|message| message.chat().id)
        .unwrap_or_else(|| ChatId::from(query.from.id));
    Some(InboundEvent::action(conversation_of(chat_id), data))
}

/// Parses a conversation id back into a Telegram chat id.
pub fn chat_id_of(conversation: &ConversationId) -> Option<ChatId> {
    conversation.0.parse::<i64>().ok().map(ChatId)
}

fn conversation_of(chat_id: ChatId) -> ConversationId {
    ConversationId::from(chat_id.0)
}

// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of channel-agnostic markup onto Telegram keyboards.

use leadflow_core::{ButtonSet, Markup, MenuLayout};
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};

/// Action buttons become an inline keyboard under the message.
pub fn inline_keyboard(set: &ButtonSet) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(set.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(button.label.clone(), button.payload.clone()))
            .collect::<Vec<_>>()
    }))
}

/// The command menu becomes a persistent reply keyboard.
pub fn menu_keyboard(menu: &MenuLayout) -> KeyboardMarkup {
    KeyboardMarkup::new(menu.rows.iter().map(|row| {
        row.iter()
            .map(|label| KeyboardButton::new(label.clone()))
            .collect::<Vec<_>>()
    }))
    .resize_keyboard()
}

pub fn reply_markup(markup: &Markup) -> ReplyMarkup {
    match markup {
        Markup::Actions(set) => ReplyMarkup::InlineKeyboard(inline_keyboard(set)),
        Markup::Menu(menu) => ReplyMarkup::Keyboard(menu_keyboard(menu)),
    }
}

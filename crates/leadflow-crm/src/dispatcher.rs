// SPDX-FileCopyrightText: 2026 Leadflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes inbound events to the draft manager, the lifecycle, and the
//! reminder scheduler, and turns the results into outbound messages.
//!
//! Routing rules:
//! - free text in a conversation with an open draft goes to the draft;
//! - other free text is matched against the command vocabulary;
//! - button payloads always bypass drafts and are decoded as
//!   `action:leadId[:hours]`.

use std::sync::Arc;

use leadflow_config::LeadflowConfig;
use leadflow_core::{ConversationId, EventPayload, InboundEvent, OutboundMessage};
use tracing::debug;

use crate::action::ActionRequest;
use crate::command::Command;
use crate::draft::{DraftManager, DraftOutcome, DraftStep};
use crate::error::CrmError;
use crate::keyboard;
use crate::lead::LeadStatus;
use crate::lifecycle::Lifecycle;
use crate::presenter;
use crate::reminder::ReminderScheduler;
use crate::store::LeadStore;

/// Menu and naming settings the dispatcher needs from configuration.
#[derive(Debug, Clone)]
struct DispatchSettings {
    bot_name: String,
    delay_options_hours: Vec<u32>,
    options_per_row: usize,
}

/// Entry point for every inbound event.
pub struct Dispatcher {
    store: Arc<LeadStore>,
    drafts: DraftManager,
    lifecycle: Lifecycle,
    scheduler: ReminderScheduler,
    settings: DispatchSettings,
}

impl Dispatcher {
    pub fn new(config: &LeadflowConfig, store: Arc<LeadStore>, scheduler: ReminderScheduler) -> Self {
        Self {
            drafts: DraftManager::new(store.clone()),
            lifecycle: Lifecycle::new(store.clone(), config.reminder.default_delay()),
            store,
            scheduler,
            settings: DispatchSettings {
                bot_name: config.bot.name.clone(),
                delay_options_hours: config.reminder.delay_options_hours.clone(),
                options_per_row: config.reminder.options_per_row,
            },
        }
    }

    pub fn store(&self) -> &Arc<LeadStore> {
        &self.store
    }

    pub fn drafts(&self) -> &DraftManager {
        &self.drafts
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Handles one event and returns the replies, in send order.
    ///
    /// Never fails: every error becomes a reply to the originating conversation.
    pub fn handle(&self, event: InboundEvent) -> Vec<OutboundMessage> {
        let InboundEvent {
            conversation_id,
            payload,
        } = event;
        match payload {
            EventPayload::Text(text) => self.handle_text(conversation_id, &text),
            EventPayload::Action(payload) => self.handle_action(conversation_id, &payload),
        }
    }

    fn handle_text(&self, conv: ConversationId, text: &str) -> Vec<OutboundMessage> {
        if self.drafts.has_open_session(&conv) {
            return self.continue_draft(conv, text);
        }

        let Some(command) = Command::parse(text) else {
            debug!(conversation_id = %conv, "unrecognized command");
            return vec![OutboundMessage::with_menu(
                conv,
                presenter::unrecognized_command(),
                keyboard::main_menu(),
            )];
        };

        match command {
            Command::Start => vec![OutboundMessage::with_menu(
                conv,
                presenter::welcome(&self.settings.bot_name),
                keyboard::main_menu(),
            )],
            Command::Help => vec![OutboundMessage::with_menu(
                conv,
                presenter::help(),
                keyboard::main_menu(),
            )],
            Command::NewLead => {
                self.drafts.begin(&conv);
                vec![OutboundMessage::text(
                    conv,
                    presenter::prompt(DraftStep::AwaitingName),
                )]
            }
            Command::List(status) => self.list(conv, status),
        }
    }

    fn continue_draft(&self, conv: ConversationId, text: &str) -> Vec<OutboundMessage> {
        let reply = match self.drafts.advance(&conv, text) {
            DraftOutcome::NeedMore(step) => OutboundMessage::text(conv, presenter::prompt(step)),
            DraftOutcome::Completed(_) => {
                OutboundMessage::with_menu(conv, presenter::draft_saved(), keyboard::main_menu())
            }
            DraftOutcome::Reset(reason) => {
                debug!(conversation_id = %conv, ?reason, "lead draft reset");
                OutboundMessage::with_menu(conv, presenter::draft_reset(), keyboard::main_menu())
            }
        };
        vec![reply]
    }

    fn list(&self, conv: ConversationId, status: LeadStatus) -> Vec<OutboundMessage> {
        let leads = self.store.list_by_status(status);
        if leads.is_empty() {
            return vec![OutboundMessage::text(conv, presenter::empty_list(status))];
        }

        let mut replies = Vec::with_capacity(leads.len() + 1);
        replies.push(OutboundMessage::text(
            conv.clone(),
            presenter::list_header(status),
        ));
        replies.extend(leads.iter().map(|lead| {
            OutboundMessage::with_actions(
                conv.clone(),
                presenter::lead_card(lead),
                keyboard::lead_actions(lead),
            )
        }));
        replies
    }

    fn handle_action(&self, conv: ConversationId, payload: &str) -> Vec<OutboundMessage> {
        let reply = match payload
            .parse::<ActionRequest>()
            .and_then(|request| self.apply(&conv, request))
        {
            Ok(reply) => reply,
            Err(CrmError::NotFound(lead_id)) => {
                debug!(conversation_id = %conv, lead_id = %lead_id, "action for unknown lead");
                OutboundMessage::text(conv, presenter::not_found())
            }
            Err(CrmError::InvalidState { lead_id, .. }) => {
                let live = self.store.get(&lead_id).ok();
                OutboundMessage::text(conv, presenter::invalid_state(live.as_ref()))
            }
            Err(CrmError::Malformed(payload)) => {
                debug!(conversation_id = %conv, payload = %payload, "malformed action payload");
                OutboundMessage::text(conv, presenter::unrecognized_action())
            }
        };
        vec![reply]
    }

    fn apply(&self, conv: &ConversationId, request: ActionRequest) -> Result<OutboundMessage, CrmError> {
        match request {
            ActionRequest::RescheduleMenu { lead_id } => {
                self.lifecycle
                    .require(&lead_id, LeadStatus::Waiting, "remind_menu")?;
                Ok(OutboundMessage::with_actions(
                    conv.clone(),
                    presenter::reschedule_prompt(),
                    keyboard::reschedule_menu(
                        &lead_id,
                        &self.settings.delay_options_hours,
                        self.settings.options_per_row,
                    ),
                ))
            }
            ActionRequest::Transition { lead_id, action } => {
                let transition = self.lifecycle.apply(&lead_id, action)?;
                if let Some(delay) = transition.reminder {
                    self.scheduler.schedule(lead_id, conv.clone(), delay);
                }
                Ok(OutboundMessage::text(
                    conv.clone(),
                    presenter::transition_done(&transition),
                ))
            }
        }
    }
}

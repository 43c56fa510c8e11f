//! # Flow engine
//!
//! Transition function of the oracle conversation. One call to [`FlowEngine::dispatch`] consumes
//! one inbound message, performs its effects through [`Bot`] and [`CompletionGateway`], and
//! returns the state the user's session ends in.
//!
//! Valid input flushes the pending cleanup (triggering message, last prompt, queued ids) before the
//! next prompt is shown; invalid input re-prompts in place and queues both messages instead.

use std::sync::Arc;
use std::time::Duration;

use nikta_client::{parse_reply, CompletionGateway, GatewayError};
use tracing::{debug, error, info, instrument, warn};

use super::event::Event;
use super::report::compose_report;
use super::session::UserSession;
use super::state::ConversationState;
use super::store::SessionStore;
use super::texts::*;
use super::validators::{is_valid_email, is_valid_name, is_valid_phone};
use crate::core::{Bot, Chat, KeyButton, Message, OutgoingMessage, ReplyMarkup, Result};

pub const DEFAULT_REPORT_CHANNEL_ID: i64 = -1003126524033;
pub const DEFAULT_SEGMENT_DELAY_MS: u64 = 500;
pub const DEFAULT_GREETING_DELAY_MS: u64 = 1000;

/// Operator channel and pacing of the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub report_channel_id: i64,
    /// Pause between segments of one multi-part reply.
    pub segment_delay: Duration,
    /// Pause after the greeting and before the first action keyboard.
    pub greeting_delay: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            report_channel_id: DEFAULT_REPORT_CHANNEL_ID,
            segment_delay: Duration::from_millis(DEFAULT_SEGMENT_DELAY_MS),
            greeting_delay: Duration::from_millis(DEFAULT_GREETING_DELAY_MS),
        }
    }
}

pub struct FlowEngine {
    bot: Arc<dyn Bot>,
    gateway: Arc<dyn CompletionGateway>,
    settings: FlowSettings,
    store: SessionStore,
}

impl FlowEngine {
    pub fn new(bot: Arc<dyn Bot>, gateway: Arc<dyn CompletionGateway>, settings: FlowSettings) -> Self {
        Self {
            bot,
            gateway,
            settings,
            store: SessionStore::new(),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// Processes one inbound message. Returns the resulting state, or `None` when the message
    /// did not concern the flow (no session, unknown command, non-text update).
    #[instrument(skip(self, message), fields(user_id = message.user.id, message_id = %message.id))]
    pub async fn dispatch(&self, message: &Message) -> Result<Option<ConversationState>> {
        let event = Event::from_message(message);
        if event == Event::Start {
            return self.start(message).await.map(Some);
        }
        if event == Event::Ignored {
            debug!("step: event ignored");
            return Ok(None);
        }

        let Some(handle) = self.store.get(message.user.id) else {
            debug!("step: no session, message ignored");
            return Ok(None);
        };
        let mut session = handle.lock().await;
        let from = session.state;
        let to = self.step(&mut session, message, event).await?;
        session.state = to;
        if from != to {
            info!(from = %from, to = %to, dialog_id = %session.dialog_id, "step: state changed");
        }
        Ok(Some(to))
    }

    async fn start(&self, message: &Message) -> Result<ConversationState> {
        let handle = self.store.reset(message.user.id);
        let mut session = handle.lock().await;
        info!(dialog_id = %session.dialog_id, "step: session started");

        self.send(&message.chat, OutgoingMessage::new(GREETING)).await?;
        tokio::time::sleep(self.settings.greeting_delay).await;
        self.prompt(
            &mut session,
            &message.chat,
            OutgoingMessage::new(ASK_PREDICTION).with_markup(ReplyMarkup::single_column(&PREDICTIONS)),
        )
        .await?;

        session.state = ConversationState::ChoosingPrediction;
        Ok(session.state)
    }

    async fn step(
        &self,
        session: &mut UserSession,
        message: &Message,
        event: Event,
    ) -> Result<ConversationState> {
        use ConversationState::*;

        let state = session.state;
        if event == Event::Cancel {
            if !state.is_active() {
                return Ok(state);
            }
            self.send(&message.chat, OutgoingMessage::new(CANCELLED).remove_keyboard())
                .await?;
            info!(dialog_id = %session.dialog_id, "step: flow cancelled");
            return Ok(Ended);
        }

        let text = match event {
            Event::Text(text) => text,
            Event::Contact(phone) if state == WaitingPhone => {
                self.flush_cleanup(session, message).await;
                session.contact = Some(format!("Телефон: {}", phone));
                return self.finish(session, message).await;
            }
            _ => {
                debug!(state = %state, "step: event not accepted in state");
                return Ok(state);
            }
        };

        match state {
            ChoosingPrediction => {
                if !PREDICTIONS.contains(&text.as_str()) {
                    return self.reject(session, message, CHOOSING_OPTION).await;
                }
                self.flush_cleanup(session, message).await;
                session.prediction = Some(text);
                self.prompt(
                    session,
                    &message.chat,
                    OutgoingMessage::new(ASK_SPHERE).with_markup(ReplyMarkup::single_column(&SPHERES)),
                )
                .await?;
                Ok(ChoosingSphere)
            }
            ChoosingSphere => {
                if !SPHERES.contains(&text.as_str()) {
                    return self.reject(session, message, CHOOSING_SPHERE).await;
                }
                self.flush_cleanup(session, message).await;
                if text == OTHER_SPHERE {
                    self.prompt(
                        session,
                        &message.chat,
                        OutgoingMessage::new(ASK_CUSTOM_SPHERE).remove_keyboard(),
                    )
                    .await?;
                    return Ok(WaitingCustomSphere);
                }
                self.open_chat(session, message, text).await
            }
            WaitingCustomSphere => {
                let sphere = text.trim();
                if sphere.is_empty() {
                    return self.reject(session, message, ASK_CUSTOM_SPHERE).await;
                }
                self.flush_cleanup(session, message).await;
                self.open_chat(session, message, sphere.to_string()).await
            }
            InChatMode => match text.as_str() {
                ACTION_ANALYSIS => {
                    self.flush_cleanup(session, message).await;
                    self.prompt(
                        session,
                        &message.chat,
                        OutgoingMessage::new(ASK_NAME).remove_keyboard(),
                    )
                    .await?;
                    Ok(WaitingName)
                }
                ACTION_RESTART => {
                    self.flush_cleanup(session, message).await;
                    session.new_attempt();
                    info!(dialog_id = %session.dialog_id, "step: new attempt");
                    self.prompt(
                        session,
                        &message.chat,
                        OutgoingMessage::new(ASK_PREDICTION)
                            .with_markup(ReplyMarkup::single_column(&PREDICTIONS)),
                    )
                    .await?;
                    Ok(ChoosingPrediction)
                }
                _ => self.chat_turn(session, message, &text).await,
            },
            WaitingName => {
                let name = text.trim();
                if !is_valid_name(name) {
                    return self.reject(session, message, INVALID_NAME).await;
                }
                self.flush_cleanup(session, message).await;
                session.name = Some(name.to_string());
                self.prompt(
                    session,
                    &message.chat,
                    OutgoingMessage::new(ASK_CONTACT_TYPE)
                        .with_markup(ReplyMarkup::single_column(&CONTACT_TYPES)),
                )
                .await?;
                Ok(ChoosingContactType)
            }
            ChoosingContactType => match text.as_str() {
                CONTACT_PHONE => {
                    self.flush_cleanup(session, message).await;
                    let keyboard = ReplyMarkup::Keyboard(vec![
                        vec![KeyButton::contact(SHARE_PHONE)],
                        vec![KeyButton::text(MANUAL_PHONE)],
                    ]);
                    self.prompt(
                        session,
                        &message.chat,
                        OutgoingMessage::new(ASK_PHONE_METHOD).with_markup(keyboard),
                    )
                    .await?;
                    Ok(WaitingPhone)
                }
                CONTACT_EMAIL => {
                    self.flush_cleanup(session, message).await;
                    self.prompt(
                        session,
                        &message.chat,
                        OutgoingMessage::new(ASK_EMAIL).remove_keyboard(),
                    )
                    .await?;
                    Ok(WaitingEmail)
                }
                _ => self.reject(session, message, CHOOSING_OPTION).await,
            },
            WaitingPhone => {
                if text == MANUAL_PHONE {
                    self.flush_cleanup(session, message).await;
                    self.prompt(
                        session,
                        &message.chat,
                        OutgoingMessage::new(ASK_PHONE_MANUAL).remove_keyboard(),
                    )
                    .await?;
                    return Ok(WaitingPhone);
                }
                let phone = text.trim();
                if !is_valid_phone(phone) {
                    return self.reject(session, message, INVALID_PHONE).await;
                }
                self.flush_cleanup(session, message).await;
                session.contact = Some(format!("Телефон: {}", phone));
                self.finish(session, message).await
            }
            WaitingEmail => {
                let email = text.trim();
                if !is_valid_email(email) {
                    return self.reject(session, message, INVALID_EMAIL).await;
                }
                self.flush_cleanup(session, message).await;
                session.contact = Some(format!("Email: {}", email));
                self.finish(session, message).await
            }
            Ended => {
                if session.completed {
                    self.send(&message.chat, OutgoingMessage::new(RESTART_HINT)).await?;
                }
                Ok(Ended)
            }
        }
    }

    /// First completion of an attempt. The reply is followed by the action keyboard, then the pair
    /// joins the history; on failure the state is kept so the user can resend.
    async fn open_chat(
        &self,
        session: &mut UserSession,
        message: &Message,
        sphere: String,
    ) -> Result<ConversationState> {
        let prediction = session.prediction.clone().unwrap_or_default();
        let content = opening_request(&prediction, &sphere);

        match self.gateway.complete(&session.dialog_id, &content).await {
            Ok(payload) => {
                debug!(payload = %payload, "step: completion payload");
                self.deliver_reply(&message.chat, parse_reply(&payload)).await?;
                tokio::time::sleep(self.settings.greeting_delay).await;
                self.show_actions(session, &message.chat).await?;
                // Recorded only once the attempt is fully delivered.
                session.sphere = Some(sphere);
                session.record_attempt();
                Ok(ConversationState::InChatMode)
            }
            Err(e) => {
                let markup = if session.state == ConversationState::ChoosingSphere {
                    ReplyMarkup::single_column(&SPHERES)
                } else {
                    ReplyMarkup::Remove
                };
                self.report_gateway_error(session, &message.chat, &e, markup).await?;
                Ok(session.state)
            }
        }
    }

    /// Free text in chat mode: forwarded as is, answered, then the action keyboard is re-issued.
    async fn chat_turn(
        &self,
        session: &mut UserSession,
        message: &Message,
        text: &str,
    ) -> Result<ConversationState> {
        match self.gateway.complete(&session.dialog_id, text).await {
            Ok(payload) => {
                debug!(payload = %payload, "step: completion payload");
                self.deliver_reply(&message.chat, parse_reply(&payload)).await?;
                if let Some(previous) = session.last_prompt_id.take() {
                    self.delete_quietly(&message.chat, &previous).await;
                }
                self.show_actions(session, &message.chat).await?;
            }
            Err(e) => {
                self.report_gateway_error(session, &message.chat, &e, ReplyMarkup::Unchanged)
                    .await?;
            }
        }
        Ok(ConversationState::InChatMode)
    }

    async fn report_gateway_error(
        &self,
        session: &mut UserSession,
        chat: &Chat,
        err: &GatewayError,
        markup: ReplyMarkup,
    ) -> Result<()> {
        error!(error = %err, dialog_id = %session.dialog_id, "step: completion failed");
        let text = match err {
            GatewayError::Unauthorized => AUTH_ERROR,
            _ => REQUEST_ERROR,
        };
        let tracked = markup.is_keyboard();
        let id = self.send(chat, OutgoingMessage::new(text).with_markup(markup)).await?;
        if tracked {
            session.last_prompt_id = Some(id);
        }
        Ok(())
    }

    /// One message per segment, paced; only the last one hides the keyboard.
    async fn deliver_reply(&self, chat: &Chat, segments: Vec<String>) -> Result<()> {
        let last = segments.len().saturating_sub(1);
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.settings.segment_delay).await;
            }
            let mut outgoing = OutgoingMessage::new(segment);
            if i == last {
                outgoing = outgoing.remove_keyboard();
            }
            self.send(chat, outgoing).await?;
        }
        Ok(())
    }

    async fn show_actions(&self, session: &mut UserSession, chat: &Chat) -> Result<()> {
        self.prompt(
            session,
            chat,
            OutgoingMessage::new(ASK_ACTION).with_markup(ReplyMarkup::single_column(&ACTIONS)),
        )
        .await
    }

    /// Reports the lead to the operator channel, then thanks the user. Report failures are logged only.
    async fn finish(&self, session: &mut UserSession, message: &Message) -> Result<ConversationState> {
        let report = compose_report(session, &message.user);
        let channel = Chat::channel(self.settings.report_channel_id);
        match self.bot.send_message(&channel, &OutgoingMessage::new(report).html()).await {
            Ok(_) => info!(channel_id = channel.id, "step: report sent"),
            Err(e) => error!(error = %e, channel_id = channel.id, "step: report delivery failed"),
        }

        self.send(
            &message.chat,
            OutgoingMessage::new(FINAL).remove_keyboard().without_link_preview(),
        )
        .await?;
        session.completed = true;
        info!(dialog_id = %session.dialog_id, attempts = session.history.len(), "step: flow completed");
        Ok(ConversationState::Ended)
    }

    /// Re-prompts without advancing; both the rejected input and the re-prompt wait for cleanup.
    async fn reject(
        &self,
        session: &mut UserSession,
        message: &Message,
        text: &str,
    ) -> Result<ConversationState> {
        debug!(state = %session.state, "step: input rejected");
        session.queue_cleanup(message.id.clone());
        let id = self.send(&message.chat, OutgoingMessage::new(text)).await?;
        session.queue_cleanup(id);
        Ok(session.state)
    }

    /// Sends a prompt and makes it the session's last prompt.
    async fn prompt(
        &self,
        session: &mut UserSession,
        chat: &Chat,
        outgoing: OutgoingMessage,
    ) -> Result<()> {
        let id = self.send(chat, outgoing).await?;
        session.last_prompt_id = Some(id);
        Ok(())
    }

    /// Deletes the triggering message, the last prompt and every queued id.
    async fn flush_cleanup(&self, session: &mut UserSession, message: &Message) {
        let mut ids = vec![message.id.clone()];
        ids.extend(session.take_cleanup());
        for id in ids {
            self.delete_quietly(&message.chat, &id).await;
        }
    }

    async fn delete_quietly(&self, chat: &Chat, message_id: &str) {
        if let Err(e) = self.bot.delete_message(chat, message_id).await {
            warn!(error = %e, chat_id = chat.id, message_id, "step: delete_message failed");
        }
    }

    async fn send(&self, chat: &Chat, outgoing: OutgoingMessage) -> Result<String> {
        self.bot.send_message(chat, &outgoing).await
    }
}

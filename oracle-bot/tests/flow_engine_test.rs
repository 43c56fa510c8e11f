//! FlowEngine end-to-end tests with a recording bot and a scripted completion gateway.

use std::sync::Arc;
use std::time::Duration;

use nikta_client::GatewayError;
use oracle_bot::flow::texts::*;
use oracle_bot::{
    Chat, ConversationState, FlowEngine, FlowSettings, KeyButton, Message, ReplyMarkup, User,
    UserSession,
};
use serde_json::json;

mod common;
use common::mock_bot::{RecordingBot, ScriptedGateway};

const USER_ID: i64 = 42;
const CHANNEL_ID: i64 = -100777;

struct Harness {
    engine: FlowEngine,
    bot: Arc<RecordingBot>,
    gateway: Arc<ScriptedGateway>,
    next_message_id: u32,
}

impl Harness {
    fn new() -> Self {
        let bot = RecordingBot::new();
        let gateway = ScriptedGateway::new();
        let settings = FlowSettings {
            report_channel_id: CHANNEL_ID,
            segment_delay: Duration::ZERO,
            greeting_delay: Duration::ZERO,
        };
        let engine = FlowEngine::new(bot.clone(), gateway.clone(), settings);
        Self {
            engine,
            bot,
            gateway,
            next_message_id: 0,
        }
    }

    fn user() -> User {
        User {
            id: USER_ID,
            username: Some("anna_k".to_string()),
            first_name: Some("Anna".to_string()),
            last_name: None,
        }
    }

    fn next_id(&mut self) -> String {
        self.next_message_id += 1;
        self.next_message_id.to_string()
    }

    async fn send(&mut self, text: &str) -> Option<ConversationState> {
        self.try_send(text).await.unwrap()
    }

    async fn try_send(&mut self, text: &str) -> oracle_bot::Result<Option<ConversationState>> {
        let message = Message::text(self.next_id(), Self::user(), Chat::private(USER_ID), text);
        self.engine.dispatch(&message).await
    }

    async fn share_contact(&mut self, phone: &str) -> Option<ConversationState> {
        let message = Message::contact(self.next_id(), Self::user(), Chat::private(USER_ID), phone);
        self.engine.dispatch(&message).await.unwrap()
    }

    async fn session(&self) -> UserSession {
        self.engine
            .store()
            .get(USER_ID)
            .expect("session exists")
            .lock()
            .await
            .clone()
    }

    /// /start → prediction → sphere, ending in chat mode.
    async fn reach_chat(&mut self, prediction: &str, sphere: &str) {
        self.send("/start").await;
        assert_eq!(self.send(prediction).await, Some(ConversationState::ChoosingSphere));
        assert_eq!(self.send(sphere).await, Some(ConversationState::InChatMode));
    }

    fn reports(&self) -> Vec<String> {
        self.bot.texts_to(CHANNEL_ID)
    }
}

#[tokio::test]
async fn test_start_sends_greeting_then_prediction_keyboard() {
    let mut h = Harness::new();

    assert_eq!(h.send("/start").await, Some(ConversationState::ChoosingPrediction));

    let sent = h.bot.sent_to(USER_ID);
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].message.text, GREETING);
    assert_eq!(sent[0].message.markup, ReplyMarkup::Unchanged);
    assert_eq!(sent[1].message.text, ASK_PREDICTION);
    assert_eq!(sent[1].message.markup, ReplyMarkup::single_column(&PREDICTIONS));

    let session = h.session().await;
    assert_eq!(session.last_prompt_id.as_deref(), Some(sent[1].id.as_str()));
    assert!(!session.completed);
}

#[tokio::test]
async fn test_full_flow_with_email_produces_one_report() {
    let mut h = Harness::new();
    h.gateway.push(Ok(json!({"result": "<br>Первое</br><br>Второе</br>"})));

    h.reach_chat(PREDICTIONS[3], SPHERES[1]).await;

    let calls = h.gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "Предсказание: Х2 средний чек, Сфера: 🏭 Производство");
    assert_eq!(calls[0].0, h.session().await.dialog_id);

    assert_eq!(h.send(ACTION_ANALYSIS).await, Some(ConversationState::WaitingName));
    assert_eq!(h.send("Анна").await, Some(ConversationState::ChoosingContactType));
    assert_eq!(h.send(CONTACT_EMAIL).await, Some(ConversationState::WaitingEmail));
    assert_eq!(h.send(" anna@example.com ").await, Some(ConversationState::Ended));

    let reports = h.bot.sent_to(CHANNEL_ID);
    assert_eq!(reports.len(), 1);
    assert!(reports[0].message.html);
    assert!(reports[0].message.text.contains("👤 <b>Имя:</b> Анна"));
    assert!(reports[0].message.text.contains("📞 <b>Контакт:</b> Email: anna@example.com"));
    assert!(reports[0].message.text.contains("🆔 <b>Telegram ID:</b> 42"));
    assert!(reports[0].message.text.contains("@anna_k"));
    assert!(reports[0].message.text.contains("<b>Попытка 1:</b>"));
    assert!(!reports[0].message.text.contains("Попытка 2"));

    let last = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(last.message.text, FINAL);
    assert_eq!(last.message.markup, ReplyMarkup::Remove);
    assert!(!last.message.link_preview);

    let session = h.session().await;
    assert!(session.completed);
    assert_eq!(session.state, ConversationState::Ended);
    assert_eq!(session.contact.as_deref(), Some("Email: anna@example.com"));
}

#[tokio::test]
async fn test_report_contains_every_attempt_across_restarts() {
    let mut h = Harness::new();

    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    assert_eq!(h.send(ACTION_RESTART).await, Some(ConversationState::ChoosingPrediction));
    assert_eq!(h.send(PREDICTIONS[6]).await, Some(ConversationState::ChoosingSphere));
    assert_eq!(h.send(OTHER_SPHERE).await, Some(ConversationState::WaitingCustomSphere));
    assert_eq!(h.send("  Кофейни  ").await, Some(ConversationState::InChatMode));

    assert_eq!(
        h.gateway.calls()[1].1,
        "Предсказание: 90% рутины исчезло, Сфера: Кофейни"
    );

    h.send(ACTION_ANALYSIS).await;
    h.send("Анна-Мария").await;
    assert_eq!(h.send(CONTACT_PHONE).await, Some(ConversationState::WaitingPhone));
    assert_eq!(h.share_contact("+79990001122").await, Some(ConversationState::Ended));

    let reports = h.reports();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert!(report.contains("<b>Попытка 1:</b>\n🔮 Предсказание: +40% чистой прибыли\n🏢 Сфера: 🛍 Ритейл / eCom"));
    assert!(report.contains("<b>Попытка 2:</b>\n🔮 Предсказание: 90% рутины исчезло\n🏢 Сфера: Кофейни"));
    assert!(report.contains("Телефон: +79990001122"));
    assert_eq!(h.session().await.history.len(), 2);
}

#[tokio::test]
async fn test_dialog_id_changes_only_on_start_and_restart() {
    let mut h = Harness::new();

    h.reach_chat(PREDICTIONS[1], SPHERES[2]).await;
    let first = h.session().await.dialog_id;
    h.send("Расскажи подробнее").await;
    assert_eq!(h.session().await.dialog_id, first);

    h.send(ACTION_RESTART).await;
    let second = h.session().await.dialog_id;
    assert_ne!(second, first);
    h.send(PREDICTIONS[2]).await;
    h.send(SPHERES[3]).await;
    assert_eq!(h.session().await.dialog_id, second);

    h.send("/start").await;
    let third = h.session().await.dialog_id;
    assert_ne!(third, second);
    assert_ne!(third, first);

    let dialogs: Vec<String> = h.gateway.calls().into_iter().map(|(d, _)| d).collect();
    assert_eq!(dialogs, vec![first.clone(), first, second]);
}

#[tokio::test]
async fn test_invalid_option_reprompts_and_defers_cleanup() {
    let mut h = Harness::new();
    h.send("/start").await;
    let prompt_id = h.session().await.last_prompt_id.unwrap();

    assert_eq!(h.send("хочу всё и сразу").await, Some(ConversationState::ChoosingPrediction));

    let reprompt = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(reprompt.message.text, CHOOSING_OPTION);
    assert!(h.bot.deleted().is_empty());
    let session = h.session().await;
    assert_eq!(session.pending_cleanup, vec!["2".to_string(), reprompt.id.clone()]);
    assert_eq!(session.last_prompt_id.as_deref(), Some(prompt_id.as_str()));

    assert_eq!(h.send(PREDICTIONS[0]).await, Some(ConversationState::ChoosingSphere));

    assert_eq!(
        h.bot.deleted(),
        vec!["3".to_string(), prompt_id, "2".to_string(), reprompt.id]
    );
    let session = h.session().await;
    assert!(session.pending_cleanup.is_empty());
    assert_eq!(session.prediction.as_deref(), Some(PREDICTIONS[0]));
}

#[tokio::test]
async fn test_options_are_matched_exactly() {
    let mut h = Harness::new();
    h.send("/start").await;
    let padded = format!(" {}", PREDICTIONS[0]);
    assert_eq!(h.send(&padded).await, Some(ConversationState::ChoosingPrediction));

    h.send(PREDICTIONS[0]).await;
    assert_eq!(h.send("Ритейл").await, Some(ConversationState::ChoosingSphere));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, CHOOSING_SPHERE);
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_contact_type_rejects_free_text() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;
    h.send("Анна").await;

    assert_eq!(h.send("в телеграм").await, Some(ConversationState::ChoosingContactType));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, CHOOSING_OPTION);
}

#[tokio::test]
async fn test_start_mid_flow_discards_session() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;
    let old = h.session().await;

    assert_eq!(h.send("/start").await, Some(ConversationState::ChoosingPrediction));

    let session = h.session().await;
    assert_ne!(session.dialog_id, old.dialog_id);
    assert!(session.prediction.is_none());
    assert!(session.sphere.is_none());
    assert!(session.history.is_empty());
    assert!(session.pending_cleanup.is_empty());
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, ASK_PREDICTION);
}

#[tokio::test]
async fn test_auth_failure_keeps_state_and_allows_retry() {
    let mut h = Harness::new();
    h.gateway.push(Err(GatewayError::Unauthorized));

    h.send("/start").await;
    h.send(PREDICTIONS[4]).await;
    assert_eq!(h.send(SPHERES[4]).await, Some(ConversationState::ChoosingSphere));

    let error = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(error.message.text, AUTH_ERROR);
    assert_eq!(error.message.markup, ReplyMarkup::single_column(&SPHERES));
    let session = h.session().await;
    assert!(session.history.is_empty());
    assert!(session.sphere.is_none());
    assert_eq!(session.last_prompt_id.as_deref(), Some(error.id.as_str()));

    assert_eq!(h.send(SPHERES[4]).await, Some(ConversationState::InChatMode));
    assert_eq!(h.session().await.history.len(), 1);
    assert_eq!(h.gateway.calls().len(), 2);
}

#[tokio::test]
async fn test_reply_send_failure_records_attempt_once() {
    let mut h = Harness::new();
    h.send("/start").await;
    h.send(PREDICTIONS[5]).await;
    h.bot.fail_next_send_of("Оракул отвечает");

    assert!(h.try_send(SPHERES[2]).await.is_err());

    let session = h.session().await;
    assert_eq!(session.state, ConversationState::ChoosingSphere);
    assert!(session.history.is_empty());
    assert!(session.sphere.is_none());

    assert_eq!(h.send(SPHERES[2]).await, Some(ConversationState::InChatMode));
    let session = h.session().await;
    assert_eq!(session.history.len(), 1);
    assert_eq!(session.history[0].sphere, SPHERES[2]);
    assert_eq!(session.sphere.as_deref(), Some(SPHERES[2]));
    assert_eq!(h.gateway.calls().len(), 2);
}

#[tokio::test]
async fn test_completion_failure_for_custom_sphere_removes_keyboard() {
    let mut h = Harness::new();
    h.send("/start").await;
    h.send(PREDICTIONS[0]).await;
    h.send(OTHER_SPHERE).await;
    h.gateway
        .push(Err(GatewayError::Completion("HTTP status server error (503)".into())));

    assert_eq!(h.send("Кофейни").await, Some(ConversationState::WaitingCustomSphere));

    let error = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(error.message.text, REQUEST_ERROR);
    assert_eq!(error.message.markup, ReplyMarkup::Remove);
    assert!(h.session().await.history.is_empty());

    assert_eq!(h.send("Кофейни").await, Some(ConversationState::InChatMode));
    let session = h.session().await;
    assert_eq!(session.history.len(), 1);
    assert_eq!(session.history[0].sphere, "Кофейни");
    assert_eq!(h.gateway.calls().len(), 2);
}

#[tokio::test]
async fn test_blank_custom_sphere_is_rejected() {
    let mut h = Harness::new();
    h.send("/start").await;
    h.send(PREDICTIONS[0]).await;
    h.send(OTHER_SPHERE).await;

    assert_eq!(h.send("   ").await, Some(ConversationState::WaitingCustomSphere));

    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, ASK_CUSTOM_SPHERE);
    assert_eq!(h.session().await.pending_cleanup.len(), 2);
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_completion_failure_in_chat_mode_stays_in_chat() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.gateway
        .push(Err(GatewayError::Completion("HTTP status server error (502)".into())));

    assert_eq!(h.send("А что с ценами?").await, Some(ConversationState::InChatMode));

    let error = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(error.message.text, REQUEST_ERROR);
    assert_eq!(error.message.markup, ReplyMarkup::Unchanged);
}

#[tokio::test]
async fn test_reply_segments_only_last_removes_keyboard() {
    let mut h = Harness::new();
    h.gateway
        .push(Ok(json!({"response": "<br>Раз</br>\n<BR/>Два</br><br>  </br><br>Три</br>"})));

    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;

    let sent = h.bot.sent_to(USER_ID);
    let tail: Vec<_> = sent.iter().rev().take(4).rev().collect();
    assert_eq!(tail[0].message.text, "Раз");
    assert_eq!(tail[0].message.markup, ReplyMarkup::Unchanged);
    assert_eq!(tail[1].message.text, "Два");
    assert_eq!(tail[1].message.markup, ReplyMarkup::Unchanged);
    assert_eq!(tail[2].message.text, "Три");
    assert_eq!(tail[2].message.markup, ReplyMarkup::Remove);
    assert_eq!(tail[3].message.text, ASK_ACTION);
    assert_eq!(tail[3].message.markup, ReplyMarkup::single_column(&ACTIONS));
}

#[tokio::test]
async fn test_chat_text_is_forwarded_and_actions_reissued() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    let first_actions = h.session().await.last_prompt_id.unwrap();

    h.gateway.push(Ok(json!({"result": "Ответ без разметки"})));
    assert_eq!(h.send("Сколько это стоит?").await, Some(ConversationState::InChatMode));

    assert_eq!(h.gateway.calls().last().unwrap().1, "Сколько это стоит?");
    assert!(h.bot.deleted().contains(&first_actions));
    let texts = h.bot.texts_to(USER_ID);
    assert_eq!(texts[texts.len() - 2], "Ответ без разметки");
    let actions = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(actions.message.text, ASK_ACTION);
    assert_eq!(
        h.session().await.last_prompt_id.as_deref(),
        Some(actions.id.as_str())
    );
    assert_eq!(h.session().await.history.len(), 1);
}

#[tokio::test]
async fn test_manual_phone_entry() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;
    h.send("Пётр").await;
    h.send(CONTACT_PHONE).await;

    let keyboard = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(keyboard.message.text, ASK_PHONE_METHOD);
    assert_eq!(
        keyboard.message.markup,
        ReplyMarkup::Keyboard(vec![
            vec![KeyButton::contact(SHARE_PHONE)],
            vec![KeyButton::text(MANUAL_PHONE)],
        ])
    );

    assert_eq!(h.send(MANUAL_PHONE).await, Some(ConversationState::WaitingPhone));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, ASK_PHONE_MANUAL);
    assert!(h.bot.deleted().contains(&keyboard.id));

    assert_eq!(h.send("12-34+56-78-90").await, Some(ConversationState::WaitingPhone));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, INVALID_PHONE);

    assert_eq!(h.send("+7 123 456 78 90").await, Some(ConversationState::Ended));
    assert!(h.reports()[0].contains("📞 <b>Контакт:</b> Телефон: +7 123 456 78 90"));
}

#[tokio::test]
async fn test_invalid_name_and_email_reprompt() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;

    assert_eq!(h.send("J0hn").await, Some(ConversationState::WaitingName));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, INVALID_NAME);
    assert_eq!(h.session().await.pending_cleanup.len(), 2);

    h.send("John").await;
    h.send(CONTACT_EMAIL).await;
    assert_eq!(h.send("foo@bar").await, Some(ConversationState::WaitingEmail));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, INVALID_EMAIL);
    assert!(h.reports().is_empty());
}

#[tokio::test]
async fn test_contact_outside_phone_step_is_ignored() {
    let mut h = Harness::new();
    h.send("/start").await;
    let before = h.bot.sent_count();

    assert_eq!(
        h.share_contact("+79990001122").await,
        Some(ConversationState::ChoosingPrediction)
    );
    assert_eq!(h.bot.sent_count(), before);
}

#[tokio::test]
async fn test_message_after_completion_gets_restart_hint() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;
    h.send("Анна").await;
    h.send(CONTACT_EMAIL).await;
    h.send("anna@example.com").await;

    assert_eq!(h.send("привет").await, Some(ConversationState::Ended));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, RESTART_HINT);
    assert_eq!(h.reports().len(), 1);

    let before = h.bot.sent_count();
    h.send("/cancel").await;
    assert_eq!(h.bot.sent_count(), before);
}

#[tokio::test]
async fn test_cancel_ends_flow_and_later_text_is_inert() {
    let mut h = Harness::new();
    h.send("/start").await;
    h.send(PREDICTIONS[0]).await;

    assert_eq!(h.send("/cancel").await, Some(ConversationState::Ended));
    let cancelled = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(cancelled.message.text, CANCELLED);
    assert_eq!(cancelled.message.markup, ReplyMarkup::Remove);

    let before = h.bot.sent_count();
    assert_eq!(h.send(SPHERES[0]).await, Some(ConversationState::Ended));
    assert_eq!(h.bot.sent_count(), before);
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_no_session_and_unknown_commands_are_ignored() {
    let mut h = Harness::new();

    assert_eq!(h.send("привет").await, None);
    assert_eq!(h.send("/cancel").await, None);
    assert!(h.engine.store().is_empty());

    h.send("/start").await;
    let before = h.bot.sent_count();
    assert_eq!(h.send("/help").await, None);
    assert_eq!(h.bot.sent_count(), before);
}

#[tokio::test]
async fn test_delete_failures_do_not_block_transitions() {
    let mut h = Harness::new();
    h.bot.fail_deletes(true);

    h.send("/start").await;
    h.send("не то").await;
    assert_eq!(h.send(PREDICTIONS[0]).await, Some(ConversationState::ChoosingSphere));

    assert!(h.bot.deleted().is_empty());
    let session = h.session().await;
    assert!(session.pending_cleanup.is_empty());
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, ASK_SPHERE);
}

#[tokio::test]
async fn test_report_failure_does_not_block_final_message() {
    let mut h = Harness::new();
    h.bot.fail_sends_to(CHANNEL_ID);

    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;
    h.send("Анна").await;
    h.send(CONTACT_EMAIL).await;

    assert_eq!(h.send("anna@example.com").await, Some(ConversationState::Ended));
    assert!(h.reports().is_empty());
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, FINAL);
    assert!(h.session().await.completed);
}

#[tokio::test]
async fn test_cancel_from_chat_mode() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;

    assert_eq!(h.send("/cancel").await, Some(ConversationState::Ended));
    let cancelled = h.bot.last_to(USER_ID).unwrap();
    assert_eq!(cancelled.message.text, CANCELLED);
    assert_eq!(cancelled.message.markup, ReplyMarkup::Remove);

    let before = h.bot.sent_count();
    assert_eq!(h.send("ещё вопрос").await, Some(ConversationState::Ended));
    assert_eq!(h.bot.sent_count(), before);
    assert_eq!(h.gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_cancel_while_waiting_phone() {
    let mut h = Harness::new();
    h.reach_chat(PREDICTIONS[0], SPHERES[0]).await;
    h.send(ACTION_ANALYSIS).await;
    h.send("Анна").await;
    assert_eq!(h.send(CONTACT_PHONE).await, Some(ConversationState::WaitingPhone));

    assert_eq!(h.send("/cancel").await, Some(ConversationState::Ended));
    assert_eq!(h.bot.last_to(USER_ID).unwrap().message.text, CANCELLED);

    assert_eq!(h.share_contact("+79990001122").await, Some(ConversationState::Ended));
    assert!(h.reports().is_empty());
    assert!(!h.session().await.completed);
}

//! Conversation states, from the prediction card to contact collection.

use std::fmt;

/// Exactly one state is active per session.
///
/// `ChoosingPrediction` → `ChoosingSphere` → (`WaitingCustomSphere` →) `InChatMode` →
/// `WaitingName` → `ChoosingContactType` → `WaitingPhone` | `WaitingEmail` → `Ended`.
/// `InChatMode` may also loop back to `ChoosingPrediction` for another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationState {
    ChoosingPrediction,
    ChoosingSphere,
    WaitingCustomSphere,
    InChatMode,
    WaitingName,
    ChoosingContactType,
    WaitingPhone,
    WaitingEmail,
    /// Flow finished (completed or cancelled); only `/start` begins a new one.
    Ended,
}

impl ConversationState {
    pub fn is_active(self) -> bool {
        self != ConversationState::Ended
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationState::ChoosingPrediction => "choosing_prediction",
            ConversationState::ChoosingSphere => "choosing_sphere",
            ConversationState::WaitingCustomSphere => "waiting_custom_sphere",
            ConversationState::InChatMode => "in_chat_mode",
            ConversationState::WaitingName => "waiting_name",
            ConversationState::ChoosingContactType => "choosing_contact_type",
            ConversationState::WaitingPhone => "waiting_phone",
            ConversationState::WaitingEmail => "waiting_email",
            ConversationState::Ended => "ended",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Outbound message: text plus reply-keyboard directive and formatting flags.

/// One reply-keyboard button. `request_contact` asks the client to share the user's phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyButton {
    pub text: String,
    pub request_contact: bool,
}

impl KeyButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: false,
        }
    }

    pub fn contact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: true,
        }
    }
}

/// What to do with the user's reply keyboard when the message is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyMarkup {
    /// Leave whatever keyboard is showing.
    #[default]
    Unchanged,
    /// Show a resized one-time keyboard with these rows.
    Keyboard(Vec<Vec<KeyButton>>),
    /// Hide the keyboard.
    Remove,
}

impl ReplyMarkup {
    /// One button per row.
    pub fn single_column(options: &[&str]) -> Self {
        ReplyMarkup::Keyboard(
            options
                .iter()
                .map(|option| vec![KeyButton::text(*option)])
                .collect(),
        )
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, ReplyMarkup::Keyboard(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub markup: ReplyMarkup,
    /// Parse `text` as HTML.
    pub html: bool,
    pub link_preview: bool,
}

impl OutgoingMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: ReplyMarkup::Unchanged,
            html: false,
            link_preview: true,
        }
    }

    pub fn with_markup(mut self, markup: ReplyMarkup) -> Self {
        self.markup = markup;
        self
    }

    pub fn remove_keyboard(self) -> Self {
        self.with_markup(ReplyMarkup::Remove)
    }

    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.link_preview = false;
        self
    }
}

//! Lead report posted to the operator channel when a user finishes the flow.

use teloxide::utils::html::escape;

use super::session::UserSession;
use crate::core::User;

const NO_USERNAME: &str = "@не указан";

/// Renders the HTML report: name, contact, Telegram id, username and every attempt in order.
pub fn compose_report(session: &UserSession, user: &User) -> String {
    let username = user.handle().unwrap_or_else(|| NO_USERNAME.to_string());
    let mut lines = vec![
        "📊 <b>Новая заявка от пользователя</b>".to_string(),
        String::new(),
        format!("👤 <b>Имя:</b> {}", escape(session.name.as_deref().unwrap_or_default())),
        format!(
            "📞 <b>Контакт:</b> {}",
            escape(session.contact.as_deref().unwrap_or_default())
        ),
        format!("🆔 <b>Telegram ID:</b> {}", user.id),
        format!("👨‍💼 <b>Username:</b> {}", escape(&username)),
        String::new(),
        "<b>📈 История предсказаний:</b>".to_string(),
    ];

    for (i, record) in session.history.iter().enumerate() {
        lines.push(format!("\n<b>Попытка {}:</b>", i + 1));
        lines.push(format!("🔮 Предсказание: {}", escape(&record.prediction)));
        lines.push(format!("🏢 Сфера: {}", escape(&record.sphere)));
    }

    lines.join("\n")
}

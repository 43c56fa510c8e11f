//! Option sets and user-facing texts of the oracle flow.

pub const PREDICTIONS: [&str; 12] = [
    "+40% чистой прибыли",
    "+25% клиентов без рекламы",
    "Минус 30% затрат на персонал",
    "Х2 средний чек",
    "+15 часов в неделю свободы",
    "Рабочий день сокращён на 2 часа",
    "90% рутины исчезло",
    "Все отчёты собираются за 1 клик",
    "Новые рынки открыты для тебя",
    "+300% скорость обработки заказов",
    "Команда стала в 3 раза эффективнее",
    "Лояльность клиентов выросла до 95%",
];

pub const SPHERES: [&str; 6] = [
    "🛍 Ритейл / eCom",
    "🏭 Производство",
    "🧑‍🏫 Образование",
    "🧳 Туризм / Сервисы",
    "💼 IT / Маркетинг",
    OTHER_SPHERE,
];

/// Asks for a free-text sphere instead of calling the API.
pub const OTHER_SPHERE: &str = "🏗 Другое";

pub const ACTION_ANALYSIS: &str = "🔍 Хочу такой анализ для своего бизнеса";
pub const ACTION_RESTART: &str = "🔁 Посмотреть другое предсказание";
pub const ACTIONS: [&str; 2] = [ACTION_ANALYSIS, ACTION_RESTART];

pub const CONTACT_PHONE: &str = "📱 Отправить номер";
pub const CONTACT_EMAIL: &str = "📧 Указать e-mail";
pub const CONTACT_TYPES: [&str; 2] = [CONTACT_PHONE, CONTACT_EMAIL];

pub const SHARE_PHONE: &str = "📱 Поделиться номером Telegram";
pub const MANUAL_PHONE: &str = "✍️ Ввести номер вручную";

pub const GREETING: &str = "Привет!\n\
Я — Nikta Oracle, бизнес-оракул от Nikta.ai.\n\
За 60 секунд покажу, что ждёт твой бизнес в 2025 — и как сделать это реальностью с помощью автоматизации.";

pub const ASK_PREDICTION: &str = "Выбери то, что тебе выпало на карточке 🃏\n\
(или просто то, что ты хочешь притянуть в свой бизнес 👇)";

pub const ASK_SPHERE: &str = "Отличный выбор 😎\n\
Проверим, насколько твоё предсказание реально.\n\
В какой сфере работает твой бизнес? 👇";

pub const ASK_CUSTOM_SPHERE: &str = "Напиши в сообщении сферу, в которой работает твой бизнес";

pub const ASK_ACTION: &str = "Выбери дальнейшее действие";

pub const ASK_NAME: &str = "Круто 💪\n\
Я соберу для тебя персональный отчёт, где покажу реальные точки роста твоей компании.\n\
Напиши, как к тебе обращаться 👇";

pub const ASK_CONTACT_TYPE: &str = "Отлично!\n\
Куда прислать результат?\n\
Отправляя свои контактные данные, вы соглашаетесь на обработку данных согласно политике Nikta.ai";

pub const ASK_PHONE_METHOD: &str = "Выберите способ отправки номера телефона 👇";

pub const ASK_PHONE_MANUAL: &str = "Напишите свой номер телефона в любом удобном формате\n\
(например: +7 123 456 78 90 или 8 (123) 456-78-90)";

pub const ASK_EMAIL: &str = "Отправь свой e-mail";

pub const CHOOSING_OPTION: &str = "Пожалуйста, выберите один из вариантов, нажав на кнопку 👇";
pub const CHOOSING_SPHERE: &str = "Пожалуйста, выберите одну из сфер, нажав на кнопку 👇";

pub const INVALID_NAME: &str = "Пожалуйста, введите корректное имя.\n\
Имя может содержать только буквы, пробелы, дефисы, апострофы и точки.\n\
Цифры, смайлики и другие специальные символы не допускаются.";

pub const INVALID_PHONE: &str = "Пожалуйста, введите корректный номер телефона.\n\
Номер должен содержать от 10 до 15 цифр.\n\
Допустимые символы: цифры, пробелы, дефисы, скобки и + в начале.\n\n\
Примеры:\n\
+7 123 456 78 90\n\
8 (123) 456-78-90\n\
+1-234-567-8900";

pub const INVALID_EMAIL: &str = "Введите пожалуйста e-mail корректно";

pub const AUTH_ERROR: &str = "Извините, произошла ошибка авторизации. Попробуйте позже.";
pub const REQUEST_ERROR: &str = "Извините, произошла ошибка при обработке запроса. Попробуйте позже.";

pub const FINAL: &str = "🎯 Готово!\n\
Твоя заявка передана в штаб Nikta.ai 🚀\n\
А пока - загляни:\n\
🌐 nikta.ai - посмотри, как другие компании уже подтвердили свои предсказания.\n\
💬 @nikta_ai - наш Telegram-канал с кейсами и свежими идеями.";

pub const RESTART_HINT: &str = "Чтобы начать диалог заново, нажмите /start";
pub const CANCELLED: &str = "Диалог отменён. Используйте /start для начала.";

/// Content of the first completion request of an attempt.
pub fn opening_request(prediction: &str, sphere: &str) -> String {
    format!("Предсказание: {}, Сфера: {}", prediction, sphere)
}

//! Localized reminder text.

use serde::{Deserialize, Serialize};

use crate::models::DueNotice;

use super::notification::{EmailMessage, SmsMessage};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Language reminders are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Hebrew,
    English,
}

impl Locale {
    /// Converts to configuration string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Hebrew => "he",
            Locale::English => "en",
        }
    }

    /// Parses a language tag such as `he`, `he-IL` or `en`.
    pub fn parse(s: &str) -> Option<Self> {
        let lang = s.split(['-', '_']).next().unwrap_or_default();
        match lang.to_ascii_lowercase().as_str() {
            "he" | "iw" => Some(Locale::Hebrew),
            "en" => Some(Locale::English),
            _ => None,
        }
    }
}

/// Rendered reminder for one due notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
    pub sms_text: String,
}

impl ReminderMessage {
    /// Renders the reminder for a notice in the given locale.
    pub fn render(notice: &DueNotice, locale: Locale) -> Self {
        let number = &notice.vehicle_number;
        let date = notice.maintenance_date.format(DATE_FORMAT).to_string();
        let days = notice.days_until;
        let html_number = escape_html(number);

        match locale {
            Locale::Hebrew => Self {
                subject: format!("תזכורת: טיפול רכב בעוד {days} ימים"),
                body_text: format!("רכב מספר {number} מיועד לטיפול בתאריך {date}"),
                body_html: format!(
                    "<div dir=\"rtl\"><h2>תזכורת לטיפול רכב</h2>\
                     <p>רכב מספר <strong>{html_number}</strong> מיועד לטיפול בתאריך <strong>{date}</strong></p>\
                     <p>נותרו {days} ימים עד לטיפול</p></div>"
                ),
                sms_text: format!("תזכורת: רכב מספר {number} מיועד לטיפול בעוד {days} ימים ({date})"),
            },
            Locale::English => {
                let unit = if days == 1 { "day" } else { "days" };
                Self {
                    subject: format!("Reminder: vehicle maintenance in {days} {unit}"),
                    body_text: format!("Vehicle {number} is scheduled for maintenance on {date}"),
                    body_html: format!(
                        "<div><h2>Vehicle maintenance reminder</h2>\
                         <p>Vehicle <strong>{html_number}</strong> is scheduled for maintenance on <strong>{date}</strong></p>\
                         <p>{days} {unit} left until maintenance</p></div>"
                    ),
                    sms_text: format!(
                        "Reminder: vehicle {number} is due for maintenance in {days} {unit} ({date})"
                    ),
                }
            }
        }
    }

    /// Email message addressed to `to`.
    pub fn email(&self, to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: self.subject.clone(),
            body_text: self.body_text.clone(),
            body_html: Some(self.body_html.clone()),
        }
    }

    /// SMS message addressed to `to`.
    pub fn sms(&self, to: &str) -> SmsMessage {
        SmsMessage {
            to: to.to_string(),
            body: self.sms_text.clone(),
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn notice(number: &str, days_until: i64) -> DueNotice {
        DueNotice {
            vehicle_id: Uuid::nil(),
            vehicle_number: number.to_string(),
            maintenance_date: NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
            days_until,
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("he"), Some(Locale::Hebrew));
        assert_eq!(Locale::parse("he-IL"), Some(Locale::Hebrew));
        assert_eq!(Locale::parse("EN_us"), Some(Locale::English));
        assert_eq!(Locale::parse("fr"), None);
        assert_eq!(Locale::default(), Locale::Hebrew);
    }

    #[test]
    fn test_hebrew_message_contains_number_date_and_days() {
        let message = ReminderMessage::render(&notice("V1", 1), Locale::Hebrew);
        for part in [&message.body_text, &message.body_html, &message.sms_text] {
            assert!(part.contains("V1"));
            assert!(part.contains("2024-06-11"));
        }
        assert!(message.subject.contains('1'));
        assert!(message.body_html.contains("dir=\"rtl\""));
    }

    #[test]
    fn test_english_message_pluralization() {
        let one = ReminderMessage::render(&notice("V1", 1), Locale::English);
        assert_eq!(one.subject, "Reminder: vehicle maintenance in 1 day");
        let two = ReminderMessage::render(&notice("V1", 2), Locale::English);
        assert_eq!(two.subject, "Reminder: vehicle maintenance in 2 days");
        assert!(two.sms_text.contains("(2024-06-11)"));
    }

    #[test]
    fn test_html_escapes_vehicle_number() {
        let message = ReminderMessage::render(&notice("<b>7</b>", 2), Locale::English);
        assert!(message.body_html.contains("&lt;b&gt;7&lt;/b&gt;"));
        assert!(message.body_text.contains("<b>7</b>"));
    }

    #[test]
    fn test_channel_messages() {
        let message = ReminderMessage::render(&notice("V1", 1), Locale::Hebrew);
        let email = message.email("fleet@example.com");
        assert_eq!(email.to, "fleet@example.com");
        assert_eq!(email.body_html.as_deref(), Some(message.body_html.as_str()));
        let sms = message.sms("+972501234567");
        assert_eq!(sms.body, message.sms_text);
    }
}

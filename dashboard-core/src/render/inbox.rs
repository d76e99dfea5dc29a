use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::{model::EmailItem, time_format::relative_time};

const MAX_SUBJECT_CHARS: usize = 120;

/// Display name from a `From` header: the first `<address>` part is dropped.
pub fn sender_name(from: &str) -> String {
    let stripped = match from.find('<') {
        Some(open) => match from[open..].find('>') {
            Some(close) => format!("{}{}", &from[..open], &from[open + close + 1..]),
            None => from.to_string(),
        },
        None => from.to_string(),
    };
    stripped.trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailLine {
    pub id: Option<String>,
    pub account: Option<String>,
    pub subject: String,
    pub sender: String,
    /// Compact age, `5m`, empty when `received` is unreadable.
    pub age: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboxView {
    pub emails: Vec<EmailLine>,
}

pub fn inbox_view<Tz: TimeZone>(items: &[EmailItem], now: &DateTime<Tz>) -> InboxView {
    let emails = items
        .iter()
        .map(|it| EmailLine {
            id: it.id.clone(),
            account: it.account.clone(),
            subject: it
                .subject
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("(no subject)")
                .chars()
                .take(MAX_SUBJECT_CHARS)
                .collect(),
            sender: sender_name(it.from.as_deref().unwrap_or_default()),
            age: it.received.as_deref().map(|r| relative_time(r, now)).unwrap_or_default(),
        })
        .collect();

    InboxView { emails }
}

impl fmt::Display for InboxView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.emails.is_empty() {
            return writeln!(f, "Inbox empty");
        }
        for e in &self.emails {
            writeln!(f, "{}", e.subject)?;
            writeln!(f, "    {} • {}", e.sender, e.age)?;
        }
        Ok(())
    }
}

use futures::future::BoxFuture;
use teloxide::{
    prelude::*,
    types::{ChatId, Recipient},
};

use crate::config::Credentials;

/// Best-effort delivery of a text message. Implementations log failures and never return them.
pub trait Notifier: Send + Sync {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()>;
}

pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, credentials: &Credentials) -> Self {
        Self {
            bot,
            recipient: parse_recipient(&credentials.telegram_chat_id),
        }
    }

    pub async fn send_message(&self, text: &str) {
        tracing::info!(target: "telegram", recipient = ?self.recipient, "sending message");
        match self.bot.send_message(self.recipient.clone(), text).await {
            Ok(_) => {
                tracing::debug!(target: "telegram", recipient = ?self.recipient, "message sent");
            }
            Err(err) => {
                tracing::error!(
                    target: "telegram",
                    error = %err,
                    recipient = ?self.recipient,
                    "failed to send message"
                );
            }
        }
    }
}

impl Notifier for TelegramNotifier {
    fn notify<'a>(&'a self, text: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(self.send_message(text))
    }
}

/// Numeric destinations are chat ids, anything else is treated as a channel username.
pub fn parse_recipient(raw: &str) -> Recipient {
    let raw = raw.trim();
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw.to_string()),
    }
}

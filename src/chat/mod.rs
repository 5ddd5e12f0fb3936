//! Doctor-patient messaging.
//!
//! The hosted chat service is reached through [`ChatTransport`]; a
//! [`ChatSession`] owns one user's connection to one conversation for as
//! long as the conversation is on screen.

mod hub;
mod session;

pub use hub::InMemoryChatHub;
pub use session::ChatSession;

use std::future::Future;

use time::OffsetDateTime;
use tokio::sync::broadcast;

use crate::error::AppResult;

/// Deterministic channel id for a pair of users. Order of the ids does not
/// matter.
pub fn channel_id(prefix: &str, a: &str, b: &str) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    format!("{prefix}_{low}_{high}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    pub id: String,
    pub name: String,
}

impl ChatUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub channel: String,
    pub sender: String,
    pub text: String,
    pub sent_at: OffsetDateTime,
}

pub trait ChatTransport: Send + Sync {
    /// Register the user with the service and mark them online.
    fn connect_user(&self, user: &ChatUser) -> impl Future<Output = AppResult<()>> + Send;

    fn disconnect_user(&self, user_id: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// Create the channel if needed and return its history, oldest first.
    fn watch(
        &self,
        channel: &str,
        members: &[String],
    ) -> impl Future<Output = AppResult<Vec<ChatMessage>>> + Send;

    fn send(
        &self,
        channel: &str,
        sender: &str,
        text: &str,
    ) -> impl Future<Output = AppResult<ChatMessage>> + Send;

    fn subscribe(&self, channel: &str) -> AppResult<broadcast::Receiver<ChatMessage>>;
}

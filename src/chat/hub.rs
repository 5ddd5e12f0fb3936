use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use time::OffsetDateTime;
use tokio::sync::broadcast;
use tracing::debug;

use super::{ChatMessage, ChatTransport, ChatUser};
use crate::error::{AppError, AppResult};

const CHANNEL_CAPACITY: usize = 100;

struct Channel {
    members: Vec<String>,
    history: Vec<ChatMessage>,
    tx: broadcast::Sender<ChatMessage>,
}

#[derive(Default)]
struct HubState {
    users: HashMap<String, ChatUser>,
    online: HashSet<String>,
    channels: HashMap<String, Channel>,
}

/// In-process chat service. Every channel fans out through its own
/// broadcast sender.
#[derive(Default)]
pub struct InMemoryChatHub {
    state: Mutex<HubState>,
}

impl InMemoryChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.state().online.contains(user_id)
    }

    pub fn knows_user(&self, user_id: &str) -> bool {
        self.state().users.contains_key(user_id)
    }

    fn state(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatTransport for InMemoryChatHub {
    async fn connect_user(&self, user: &ChatUser) -> AppResult<()> {
        let mut state = self.state();
        state.users.insert(user.id.clone(), user.clone());
        state.online.insert(user.id.clone());
        debug!(user_id = %user.id, "Chat user connected");
        Ok(())
    }

    async fn disconnect_user(&self, user_id: &str) -> AppResult<()> {
        self.state().online.remove(user_id);
        Ok(())
    }

    async fn watch(&self, channel: &str, members: &[String]) -> AppResult<Vec<ChatMessage>> {
        let mut state = self.state();
        if let Some(unknown) = members.iter().find(|m| !state.users.contains_key(*m)) {
            return Err(AppError::Chat(format!("unknown chat user {unknown}")));
        }
        let entry = state.channels.entry(channel.to_string()).or_insert_with(|| {
            let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
            Channel {
                members: Vec::new(),
                history: Vec::new(),
                tx,
            }
        });
        for member in members {
            if !entry.members.contains(member) {
                entry.members.push(member.clone());
            }
        }
        Ok(entry.history.clone())
    }

    async fn send(&self, channel: &str, sender: &str, text: &str) -> AppResult<ChatMessage> {
        let mut state = self.state();
        if !state.online.contains(sender) {
            return Err(AppError::Chat(format!("{sender} is not connected")));
        }
        let entry = state
            .channels
            .get_mut(channel)
            .ok_or_else(|| AppError::Chat(format!("no channel {channel}")))?;
        if !entry.members.iter().any(|m| m == sender) {
            return Err(AppError::Chat(format!("{sender} is not a member of {channel}")));
        }

        let message = ChatMessage {
            id: uuid::Uuid::now_v7().to_string(),
            channel: channel.to_string(),
            sender: sender.to_string(),
            text: text.to_string(),
            sent_at: OffsetDateTime::now_utc(),
        };
        entry.history.push(message.clone());
        // No live subscribers is fine; history keeps the message.
        let _ = entry.tx.send(message.clone());
        Ok(message)
    }

    fn subscribe(&self, channel: &str) -> AppResult<broadcast::Receiver<ChatMessage>> {
        self.state()
            .channels
            .get(channel)
            .map(|c| c.tx.subscribe())
            .ok_or_else(|| AppError::Chat(format!("no channel {channel}")))
    }
}

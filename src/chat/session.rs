use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use super::{channel_id, ChatMessage, ChatTransport, ChatUser};
use crate::error::AppResult;

/// One user's open conversation with one peer.
///
/// Opening connects the user and watches the pair's channel; closing
/// disconnects. The live subscription goes away with the session.
pub struct ChatSession<T: ChatTransport> {
    transport: Arc<T>,
    user: ChatUser,
    channel: String,
    history: Vec<ChatMessage>,
    rx: broadcast::Receiver<ChatMessage>,
}

impl<T: ChatTransport> ChatSession<T> {
    pub async fn open(
        transport: Arc<T>,
        user: ChatUser,
        peer_id: &str,
        channel_prefix: &str,
    ) -> AppResult<Self> {
        transport.connect_user(&user).await?;
        let channel = channel_id(channel_prefix, &user.id, peer_id);
        let members = vec![user.id.clone(), peer_id.to_string()];

        let opened = async {
            let history = transport.watch(&channel, &members).await?;
            let rx = transport.subscribe(&channel)?;
            Ok::<_, crate::error::AppError>((history, rx))
        }
        .await;

        match opened {
            Ok((history, rx)) => {
                info!(user_id = %user.id, %channel, "Chat session opened");
                Ok(Self {
                    transport,
                    user,
                    channel,
                    history,
                    rx,
                })
            }
            Err(e) => {
                if let Err(disconnect) = transport.disconnect_user(&user.id).await {
                    warn!(error = %disconnect, "Failed to disconnect chat user after open failure");
                }
                Err(e)
            }
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Messages that existed when the session was opened.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Blank or whitespace-only text is not sent.
    pub async fn send(&self, text: &str) -> AppResult<Option<ChatMessage>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        self.transport
            .send(&self.channel, &self.user.id, text)
            .await
            .map(Some)
    }

    /// Next live message on the channel, including our own. `None` once the
    /// channel is gone.
    pub async fn next_message(&mut self) -> Option<ChatMessage> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, channel = %self.channel, "Chat subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub async fn close(self) -> AppResult<()> {
        self.transport.disconnect_user(&self.user.id).await?;
        info!(user_id = %self.user.id, channel = %self.channel, "Chat session closed");
        Ok(())
    }
}

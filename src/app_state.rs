use std::sync::Arc;

use crate::chat::ChatTransport;
use crate::config::ChatConfig;
use crate::http::ApiClient;
use crate::identity::IdentityProvider;

/// Everything a workflow needs: the backend client, the identity provider
/// and the chat service.
pub struct AppState<I, C> {
    pub api: ApiClient,
    pub identity: Arc<I>,
    pub chat: Arc<C>,
    pub chat_config: ChatConfig,
}

impl<I: IdentityProvider, C: ChatTransport> AppState<I, C> {
    pub fn new(api: ApiClient, identity: Arc<I>, chat: Arc<C>, chat_config: ChatConfig) -> Self {
        Self {
            api,
            identity,
            chat,
            chat_config,
        }
    }
}

impl<I, C> Clone for AppState<I, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            identity: Arc::clone(&self.identity),
            chat: Arc::clone(&self.chat),
            chat_config: self.chat_config.clone(),
        }
    }
}

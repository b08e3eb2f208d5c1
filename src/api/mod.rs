// src/api/mod.rs

pub mod cards;
pub mod chat;
pub mod health;
pub mod player;

use crate::config::Config;
use crate::integrations::GameDataSource;
use crate::services::ChatService;
use std::sync::Arc;

// AppState definition
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub game_data: Arc<dyn GameDataSource>,
    pub chat: ChatService,
}

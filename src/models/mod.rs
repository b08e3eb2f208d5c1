// src/models/mod.rs
pub mod chat;
pub mod requests;

pub use chat::ChatTurn;
pub use requests::{parse_lenient, ChatRequest, ChatResponse, PlayerRequest, StatusResponse};

pub mod chat;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod message;
pub mod resources;
pub mod segment;

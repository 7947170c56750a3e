// gemini-webchat - LLM handler plugin for Gemini web chat sessions

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod files;
pub mod gems;
pub mod handler;
pub mod history;
pub mod install;
pub mod models;
pub mod utils;

/// Identifier the host registry uses to select this handler.
pub const HANDLER_KEY: &str = "gemini-webchat";

/// Name of the gem this handler owns on the remote service.
pub const GEM_NAME: &str = "gemini-webchat";

// src/services/mod.rs
pub mod gemini;
pub mod interaction_log;
pub mod prompt;

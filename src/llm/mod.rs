pub mod classify;
pub mod client;
pub mod select;

pub use classify::{classify_failure, FailureClass};
pub use client::{GeminiClient, LlmError};
pub use select::choose_model;

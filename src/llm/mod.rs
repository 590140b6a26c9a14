//! Completion backend used to draft estimations and test cases.

pub mod client;
pub mod prompt;

pub use client::ChatClient;
pub use prompt::{estimation_prompt, test_case_prompt, Prompt};

use crate::errors::LlmError;

/// Anything that turns a prompt into raw model text.
///
/// Shared across the rayon pool during batch analysis, hence `Send + Sync`.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}

impl<T: CompletionBackend + ?Sized> CompletionBackend for &T {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        (**self).complete(prompt)
    }
}

impl<T: CompletionBackend + ?Sized> CompletionBackend for Box<T> {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        (**self).complete(prompt)
    }
}

//! In-process fake provider for unit and integration tests
//!
//! This module provides [`FakeProvider`], which replaces the real
//! generation backend in tests. Replies are queued ahead of time and
//! replayed in order; every transcript the handler sends is recorded so
//! tests can assert on the exact outbound conversation.
//!
//! # Example
//!
//! ```
//! use oravox::conversation::Transcript;
//! use oravox::providers::{FakeProvider, Provider};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = FakeProvider::new();
//! provider.enqueue_reply("A canned answer.");
//!
//! let transcript = Transcript::seeded("Answer briefly.", "Understood.");
//! let answer = provider.generate(&transcript).await.unwrap();
//! assert_eq!(answer, "A canned answer.");
//! assert_eq!(provider.recorded_transcripts().len(), 1);
//! # }
//! ```

use crate::conversation::Transcript;
use crate::error::{OravoxError, Result};
use crate::providers::Provider;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

enum ScriptedReply {
    Answer(String),
    Failure(String),
}

/// Scripted generation provider for tests
///
/// Not intended for production use; the factory never constructs it.
#[derive(Default)]
pub struct FakeProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    transcripts: Mutex<Vec<Transcript>>,
}

impl FakeProvider {
    /// Creates a fake provider with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply
    pub fn enqueue_reply(&self, text: impl Into<String>) {
        self.replies
            .lock()
            .expect("fake provider lock poisoned")
            .push_back(ScriptedReply::Answer(text.into()));
    }

    /// Queues a failure
    pub fn enqueue_failure(&self, message: impl Into<String>) {
        self.replies
            .lock()
            .expect("fake provider lock poisoned")
            .push_back(ScriptedReply::Failure(message.into()));
    }

    /// Transcripts received so far, in call order
    pub fn recorded_transcripts(&self) -> Vec<Transcript> {
        self.transcripts
            .lock()
            .expect("fake provider lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Provider for FakeProvider {
    async fn generate(&self, transcript: &Transcript) -> Result<String> {
        self.transcripts
            .lock()
            .expect("fake provider lock poisoned")
            .push(transcript.clone());

        let reply = self
            .replies
            .lock()
            .expect("fake provider lock poisoned")
            .pop_front();

        match reply {
            Some(ScriptedReply::Answer(text)) => Ok(text),
            Some(ScriptedReply::Failure(message)) => {
                Err(OravoxError::Provider(message).into())
            }
            None => Err(OravoxError::Provider("no scripted reply left".to_string()).into()),
        }
    }
}

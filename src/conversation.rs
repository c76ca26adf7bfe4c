//! Conversation transcript management
//!
//! This module implements the bounded conversation history kept in
//! session state: a fixed instruction pair followed by the most recent
//! exchanges. Trimming keeps the instruction pair plus the last
//! `2 * max_history_turns` turns; recency is the sole retention
//! criterion.

use serde::{Deserialize, Serialize};

/// Number of turns occupied by the instruction pair
const SEED_LEN: usize = 2;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The conversation initiator (the person speaking to the assistant)
    User,
    /// The responding model
    Model,
}

/// One role-tagged utterance in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced this turn
    pub role: Role,
    /// The utterance content
    pub text: String,
}

impl Turn {
    /// Creates a new user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use oravox::conversation::{Role, Turn};
    ///
    /// let turn = Turn::user("What is gravity?");
    /// assert_eq!(turn.role, Role::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Creates a new model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Ordered sequence of turns retained for conversational context
///
/// A transcript always begins with the instruction pair: a synthetic
/// user turn carrying the system instructions followed by a synthetic
/// model acknowledgment. The pair is never evicted by trimming.
///
/// Transcripts are values: they are passed in with the session, updated,
/// and returned, never mutated behind the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Creates an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript from existing turns
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// Creates a transcript holding only the instruction pair
    ///
    /// # Arguments
    ///
    /// * `system_prompt` - Instructions carried by the synthetic user turn
    /// * `system_ack` - Text of the synthetic model acknowledgment
    ///
    /// # Examples
    ///
    /// ```
    /// use oravox::conversation::{Role, Transcript};
    ///
    /// let transcript = Transcript::seeded("Answer briefly.", "Understood.");
    /// assert_eq!(transcript.len(), 2);
    /// assert_eq!(transcript.turns()[0].role, Role::User);
    /// assert_eq!(transcript.turns()[1].role, Role::Model);
    /// ```
    pub fn seeded(system_prompt: &str, system_ack: &str) -> Self {
        Self {
            turns: vec![Turn::user(system_prompt), Turn::model(system_ack)],
        }
    }

    /// Returns this transcript unchanged if non-empty, else the seeded
    /// instruction pair
    ///
    /// No validation of role alternation or pairing is performed on a
    /// non-empty transcript.
    pub fn get_or_init(self, system_prompt: &str, system_ack: &str) -> Self {
        if self.turns.is_empty() {
            Self::seeded(system_prompt, system_ack)
        } else {
            self
        }
    }

    /// Appends a user turn
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Appends a model turn
    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::model(text));
    }

    /// Bounds the transcript length, preserving the instruction pair
    ///
    /// If the transcript holds at most `2 + 2 * max_exchanges` turns it
    /// is returned unchanged. Otherwise the result is the first two
    /// turns followed by the last `2 * max_exchanges` turns; the middle
    /// of the transcript is dropped.
    ///
    /// # Arguments
    ///
    /// * `max_exchanges` - Number of recent user/model exchanges to retain
    ///
    /// # Examples
    ///
    /// ```
    /// use oravox::conversation::Transcript;
    ///
    /// let mut transcript = Transcript::seeded("Be brief.", "OK.");
    /// for i in 0..6 {
    ///     transcript.push_user(format!("question {i}"));
    ///     transcript.push_model(format!("answer {i}"));
    /// }
    /// let trimmed = transcript.trim(4);
    /// assert_eq!(trimmed.len(), 10);
    /// assert_eq!(trimmed.turns()[0].text, "Be brief.");
    /// assert_eq!(trimmed.turns()[2].text, "question 2");
    /// ```
    #[must_use]
    pub fn trim(mut self, max_exchanges: usize) -> Self {
        let recent = max_exchanges * 2;
        if self.turns.len() <= SEED_LEN + recent {
            return self;
        }
        let keep_from = self.turns.len() - recent;
        self.turns.drain(SEED_LEN..keep_from);
        self
    }

    /// Number of turns in the transcript
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if the transcript holds no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The turns in chronological order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }
}

//! Skill request handling for Oravox
//!
//! This module defines the platform-neutral request envelope delivered
//! by the voice platform and the handler that dispatches it: launch,
//! the main query intent, follow-ups, and the static intents (help,
//! cancel, stop, fallback). Every path, including failures, produces a
//! well-formed speech response; no error crosses the response boundary.

use crate::config::AssistantConfig;
use crate::error::{OravoxError, Result};
use crate::providers::Provider;
use crate::session::SessionAttributes;
use crate::speech::sanitize_for_speech;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Main query intent carrying the free-text `query` slot
pub const ASK_INTENT: &str = "AskIntent";
/// Intent asking the assistant to elaborate on its previous answer
pub const FOLLOW_UP_INTENT: &str = "FollowUpIntent";
/// Static usage help
pub const HELP_INTENT: &str = "HelpIntent";
/// Session cancel
pub const CANCEL_INTENT: &str = "CancelIntent";
/// Session stop
pub const STOP_INTENT: &str = "StopIntent";
/// Platform fallback for unrecognized utterances
pub const FALLBACK_INTENT: &str = "FallbackIntent";

/// Slot name carrying the user's question on the main query intent
pub const QUERY_SLOT: &str = "query";

/// Fixed user turn sent on behalf of a follow-up request
pub const FOLLOW_UP_PROMPT: &str = "Please elaborate on your previous answer with more detail.";

/// Spoken apology for a failed upstream call
pub const UPSTREAM_ERROR_SPEECH: &str = "Sorry, I had trouble getting an answer. Try again.";
/// Reprompt accompanying the upstream apology
pub const UPSTREAM_ERROR_REPROMPT: &str = "Ask me something else.";
/// Spoken apology for any other handling failure
pub const GENERIC_ERROR_SPEECH: &str = "Sorry, something went wrong. Try again.";
/// Reprompt accompanying the generic apology
pub const GENERIC_ERROR_REPROMPT: &str = "What would you like to ask?";

const LAUNCH_SPEECH: &str = "I'm ready. Ask me anything.";
const LAUNCH_REPROMPT: &str = "What would you like to know?";
const HELP_SPEECH: &str = "You can ask me anything. Say tell me about, or explain, \
    followed by your question. I remember our conversation so you can say \
    tell me more for follow-ups.";
const HELP_REPROMPT: &str = "What would you like to ask?";
const GOODBYE_SPEECH: &str = "Goodbye!";
const FALLBACK_SPEECH: &str =
    "I didn't quite catch that. Try saying tell me about something, or explain something.";
const FALLBACK_REPROMPT: &str = "What would you like to ask?";
const EMPTY_QUERY_SPEECH: &str = "What would you like to ask?";
const EMPTY_QUERY_REPROMPT: &str = "Ask me anything.";
const ANYTHING_ELSE_REPROMPT: &str = "Anything else?";

/// A slot value delivered with an intent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// The resolved slot text, if the platform captured one
    #[serde(default)]
    pub value: Option<String>,
}

/// An intent delivered by the voice platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name
    pub name: String,
    /// Slots keyed by slot name
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Returns the text of a slot, if present and non-null
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .and_then(|slot| slot.value.as_deref())
    }
}

/// The kind of inbound request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Session opened without an utterance
    #[serde(rename = "LaunchRequest")]
    Launch,
    /// An intent with optional slots
    #[serde(rename = "IntentRequest")]
    Intent {
        /// The delivered intent
        intent: Intent,
    },
    /// Session closed by the platform
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded,
}

/// A complete inbound request: session attributes plus the request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequest {
    /// Per-session attributes owned by the platform
    #[serde(default)]
    pub session: SessionAttributes,
    /// The request body
    pub request: Request,
}

/// The spoken response handed back to the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    /// Text for speech synthesis; absent for the session-end acknowledgment
    pub speech: Option<String>,
    /// Reprompt text if the user stays silent
    pub reprompt: Option<String>,
    /// Whether the platform should close the session
    pub end_session: bool,
    /// Updated session attributes for the platform to store
    pub session: SessionAttributes,
}

impl SkillResponse {
    fn speak(speech: &str, reprompt: &str, session: SessionAttributes) -> Self {
        Self {
            speech: Some(speech.to_string()),
            reprompt: Some(reprompt.to_string()),
            end_session: false,
            session,
        }
    }

    fn farewell(speech: &str, session: SessionAttributes) -> Self {
        Self {
            speech: Some(speech.to_string()),
            reprompt: None,
            end_session: true,
            session,
        }
    }

    fn silent(session: SessionAttributes) -> Self {
        Self {
            speech: None,
            reprompt: None,
            end_session: true,
            session,
        }
    }
}

/// Dispatches inbound skill requests to the generation provider
///
/// The handler is total: [`SkillHandler::handle`] never returns an
/// error. Upstream failures become a fixed apology; anything else that
/// goes wrong inside dispatch becomes a distinct generic apology with
/// the inbound session returned unchanged.
pub struct SkillHandler {
    provider: Arc<dyn Provider>,
    assistant: AssistantConfig,
}

impl SkillHandler {
    /// Creates a handler over the given provider and assistant settings
    pub fn new(provider: Arc<dyn Provider>, assistant: AssistantConfig) -> Self {
        Self {
            provider,
            assistant,
        }
    }

    /// Handles one inbound request and produces the spoken response
    ///
    /// # Arguments
    ///
    /// * `request` - The inbound envelope: session attributes + request body
    pub async fn handle(&self, request: SkillRequest) -> SkillResponse {
        let inbound_session = request.session.clone();
        match self.dispatch(request.session, request.request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("Request handling failed: {:#}", err);
                SkillResponse::speak(
                    GENERIC_ERROR_SPEECH,
                    GENERIC_ERROR_REPROMPT,
                    inbound_session,
                )
            }
        }
    }

    async fn dispatch(
        &self,
        session: SessionAttributes,
        request: Request,
    ) -> Result<SkillResponse> {
        match request {
            Request::Launch => Ok(self.handle_launch(session)),
            Request::SessionEnded => {
                tracing::debug!("Session ended");
                Ok(SkillResponse::silent(session))
            }
            Request::Intent { intent } => match intent.name.as_str() {
                ASK_INTENT => {
                    let query = intent
                        .slot_value(QUERY_SLOT)
                        .map(str::trim)
                        .filter(|query| !query.is_empty());
                    tracing::debug!("Ask intent, query: {:?}", query);

                    match query {
                        Some(query) => Ok(self.ask(session, query).await),
                        None => Ok(SkillResponse::speak(
                            EMPTY_QUERY_SPEECH,
                            EMPTY_QUERY_REPROMPT,
                            session,
                        )),
                    }
                }
                FOLLOW_UP_INTENT => {
                    tracing::debug!("Follow-up intent");
                    Ok(self.ask(session, FOLLOW_UP_PROMPT).await)
                }
                HELP_INTENT => Ok(SkillResponse::speak(HELP_SPEECH, HELP_REPROMPT, session)),
                CANCEL_INTENT | STOP_INTENT => {
                    Ok(SkillResponse::farewell(GOODBYE_SPEECH, session))
                }
                FALLBACK_INTENT => Ok(SkillResponse::speak(
                    FALLBACK_SPEECH,
                    FALLBACK_REPROMPT,
                    session,
                )),
                other => {
                    Err(OravoxError::Skill(format!("No handler for intent: {}", other)).into())
                }
            },
        }
    }

    fn handle_launch(&self, mut session: SessionAttributes) -> SkillResponse {
        tracing::debug!("Launch request");
        session.conversation_history = std::mem::take(&mut session.conversation_history)
            .get_or_init(&self.assistant.system_prompt, &self.assistant.system_ack);
        SkillResponse::speak(LAUNCH_SPEECH, LAUNCH_REPROMPT, session)
    }

    /// Runs the main query path: append the user turn, call the
    /// provider, sanitize and store
    ///
    /// On upstream failure the stored transcript keeps the appended,
    /// unanswered user turn; the next request's context will contain a
    /// user turn with no matching model turn.
    async fn ask(&self, mut session: SessionAttributes, user_text: &str) -> SkillResponse {
        let mut history = std::mem::take(&mut session.conversation_history)
            .get_or_init(&self.assistant.system_prompt, &self.assistant.system_ack);

        history.push_user(user_text);
        let mut history = history.trim(self.assistant.max_history_turns);

        tracing::debug!("Calling model with {} turns", history.len());

        match self.provider.generate(&history).await {
            Ok(answer) => {
                let speech = sanitize_for_speech(&answer, self.assistant.max_speech_chars);
                tracing::debug!("Model answered with {} chars of speech", speech.chars().count());

                history.push_model(answer);
                session.conversation_history = history.trim(self.assistant.max_history_turns);
                SkillResponse::speak(&speech, ANYTHING_ELSE_REPROMPT, session)
            }
            Err(err) => {
                tracing::error!("Generation request failed: {:#}", err);
                session.conversation_history = history;
                SkillResponse::speak(
                    UPSTREAM_ERROR_SPEECH,
                    UPSTREAM_ERROR_REPROMPT,
                    session,
                )
            }
        }
    }
}

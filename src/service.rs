use crate::client::TextGenerator;
use crate::facts::ensure_fact;
use crate::history::Role;
use crate::persona::{build_prompt, REMOTE_FALLBACK};
use crate::router::ReplyRouter;
use crate::sanitizer::sanitize;
use crate::session::{SessionStore, DEFAULT_SESSION_ID};
use crate::transcript::TranscriptLog;
use std::sync::Arc;
use tracing::{error, info};

/// Default number of history lines shown to the model.
pub const DEFAULT_HISTORY_WINDOW: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Scripted,
    Model,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
    router: ReplyRouter,
    sessions: SessionStore,
    history_window: usize,
    transcript: Option<Arc<TranscriptLog>>,
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>, router: ReplyRouter, sessions: SessionStore) -> Self {
        Self {
            generator,
            router,
            sessions,
            history_window: DEFAULT_HISTORY_WINDOW,
            transcript: None,
        }
    }

    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    pub fn with_transcript(mut self, transcript: Arc<TranscriptLog>) -> Self {
        self.transcript = Some(transcript);
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// One full turn. The session stays locked until the reply is recorded,
    /// so turns in the same conversation never interleave.
    pub async fn respond(&self, session_id: Option<&str>, user_text: &str) -> Reply {
        let label = session_id.unwrap_or(DEFAULT_SESSION_ID);
        let handle = self.sessions.get(session_id);
        let mut session = handle.lock().await;
        self.record(|t| t.log_user(label, user_text));

        if let Some(text) = self.router.route(&mut session, user_text) {
            info!(session = %label, "answered from script");
            self.record(|t| t.log_scripted(label, &text));
            return Reply {
                text,
                source: ReplySource::Scripted,
            };
        }

        let prompt = build_prompt(&session.history, self.history_window, user_text);
        let raw = match self.generator.generate(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(session = %label, "Remote model failed, sending fallback: {}", e);
                self.record(|t| t.log_error(label, &e.to_string()));
                self.record(|t| t.log_fallback(label, REMOTE_FALLBACK));
                return Reply {
                    text: REMOTE_FALLBACK.to_string(),
                    source: ReplySource::Fallback,
                };
            }
        };

        let text = ensure_fact(&sanitize(&raw, &prompt, user_text));
        info!(session = %label, raw_chars = raw.len(), "answered from model");
        self.record(|t| t.log_model(label, &text));

        session.history.push(Role::User, user_text);
        session.history.push(Role::Todd, text.as_str());
        Reply {
            text,
            source: ReplySource::Model,
        }
    }

    fn record(&self, f: impl FnOnce(&TranscriptLog)) {
        if let Some(transcript) = &self.transcript {
            f(transcript);
        }
    }
}

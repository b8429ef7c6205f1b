use tracing::{debug, info, instrument, warn};

use super::fallback;
use super::interpreter::{self, CommandResult, HELP_TEXT};
use super::transcript::{Transcript, TranscriptEntry};
use crate::Result;
use crate::llm::GenerativeModel;
use crate::ranking::SearchResults;

pub const GREETING: &str = "Hi! I can help you find places. Type 'help' to see what I can do!";

/// One interactive conversation over a finished search.
///
/// The session owns its results, model handle and transcript; dropping it
/// discards all three.
pub struct ChatSession<M: GenerativeModel> {
    results: SearchResults,
    model: M,
    transcript: Transcript,
}

impl<M: GenerativeModel> ChatSession<M> {
    pub fn new(results: SearchResults, model: M) -> Self {
        let mut transcript = Transcript::new();
        transcript.append(TranscriptEntry::assistant(GREETING));
        info!(
            destination = %results.destination.name,
            places = results.collection().len(),
            "Chat session started"
        );
        Self {
            results,
            model,
            transcript,
        }
    }

    /// Answer one utterance.
    ///
    /// On success the user turn and the answer are both recorded. On failure
    /// the transcript is left untouched and the error is returned.
    #[instrument(skip(self, utterance), fields(len = utterance.len()))]
    pub async fn submit(&mut self, utterance: &str) -> Result<String> {
        let answer = if interpreter::is_help(utterance) {
            debug!("Answering with help text");
            HELP_TEXT.to_string()
        } else {
            match interpreter::interpret(utterance, self.results.collection()) {
                CommandResult::Handled(text) => {
                    debug!("Answered by command interpreter");
                    text
                }
                CommandResult::Unhandled => {
                    debug!("Forwarding to generative model");
                    fallback::ask(&self.model, &self.results, utterance)
                        .await
                        .inspect_err(|e| warn!("Fallback failed: {}", e))?
                }
            }
        };

        self.transcript.append(TranscriptEntry::user(utterance));
        self.transcript.append(TranscriptEntry::assistant(answer.clone()));
        Ok(answer)
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn results(&self) -> &SearchResults {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoyageError;
    use crate::chat::transcript::Role;
    use crate::models::{Category, Location, PlaceRecord};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedModel {
        answer: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn answering(answer: &'static str) -> Self {
            Self {
                answer: Some(answer),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.answer
                .map(str::to_string)
                .ok_or_else(|| VoyageError::network("connection reset"))
        }
    }

    fn results() -> SearchResults {
        let mut hotel = PlaceRecord::empty(Category::Lodging);
        hotel.name = "Hotel Lux".to_string();
        hotel.rating = Some(4.5);
        hotel.rating_count = Some(120);
        SearchResults::new(
            Location::new(38.72, -9.14, "Lisbon".to_string()),
            vec![hotel],
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_new_session_has_greeting() {
        let session = ChatSession::new(results(), ScriptedModel::failing());
        let entries = session.transcript().all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, Role::Assistant);
        assert_eq!(entries[0].text, GREETING);
    }

    #[tokio::test]
    async fn test_help_short_circuits() {
        let mut session = ChatSession::new(results(), ScriptedModel::failing());
        let answer = session.submit(" HELP ").await.unwrap();
        assert_eq!(answer, HELP_TEXT);
        assert_eq!(session.transcript().len(), 3);
        assert!(session.model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_command_does_not_reach_model() {
        let mut session = ChatSession::new(results(), ScriptedModel::failing());
        let answer = session.submit("rating lux").await.unwrap();
        assert_eq!(answer, "Rating for Hotel Lux: 4.5 (120 reviews)");
        assert!(session.model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fallback_answer_is_recorded() {
        let mut session = ChatSession::new(results(), ScriptedModel::answering("Stay at Hotel Lux."));
        let answer = session.submit("where should I sleep?").await.unwrap();
        assert_eq!(answer, "Stay at Hotel Lux.");

        let entries = session.transcript().all();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1], TranscriptEntry::user("where should I sleep?"));
        assert_eq!(entries[2], TranscriptEntry::assistant("Stay at Hotel Lux."));

        let prompts = session.model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Hotels: Hotel Lux (Rating: 4.5)"));
    }

    #[tokio::test]
    async fn test_failed_fallback_leaves_transcript_untouched() {
        let mut session = ChatSession::new(results(), ScriptedModel::failing());
        session.submit("popular places").await.unwrap();
        let before = session.transcript().all().to_vec();

        let err = session.submit("anything nice nearby?").await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(session.transcript().all(), before.as_slice());
    }
}

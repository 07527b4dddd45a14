//! Intent resolution and context tracking for the movie chatbot.
//!
//! This crate is the adapter-agnostic core: given one conversational turn
//! (the raw user utterance, the classifier's free-form text, and the
//! remembered movie-of-interest) it decides which movie query to issue,
//! with which parameters, or which corrective prompt to emit when a
//! required slot is missing.
//!
//! The two external collaborators (the language-model classifier and the
//! movie database) sit behind the [`ClassifierGateway`] and
//! [`MovieQueryService`] traits so adapters can inject real clients and
//! tests can inject doubles.

pub mod context;
pub mod dispatcher;
pub mod gateway;
pub mod intent;

pub use context::ConversationContext;
pub use dispatcher::{Dispatcher, TurnOutcome};
pub use gateway::{ClassifierError, ClassifierGateway, MovieQueryService, QueryError};
pub use intent::{ActionRequest, Intent, QueryAction, Resolution};

/// Keywords that end an interactive session, checked case-insensitively
/// against the whole (trimmed) utterance.
pub const EXIT_COMMANDS: [&str; 3] = ["sair", "exit", "quit"];

/// Returns true when the utterance is one of the quit keywords.
pub fn is_exit_command(input: &str) -> bool {
    let lowered = input.trim().to_lowercase();
    EXIT_COMMANDS.contains(&lowered.as_str())
}

//! Gateway traits and error types for the two external collaborators.
//!
//! The dispatcher only ever sees these traits; the concrete `reqwest`
//! clients live in their own crates and the tests inject doubles. Errors
//! are typed values rather than error strings posing as replies, so
//! adapters can branch without string-matching.

use async_trait::async_trait;
use thiserror::Error;

use crate::intent::ActionRequest;

/// Failure of the language-model classifier call.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("falha na chamada ao classificador: {0}")]
    Transport(String),

    #[error("classificador respondeu {status}: {message}")]
    Api { status: u16, message: String },

    #[error("classificador retornou uma resposta vazia")]
    EmptyResponse,
}

/// Failure of a movie-database lookup.
///
/// "Not found" is not represented here: a lookup that succeeds
/// transport-wise but matches nothing produces a normal textual reply.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("falha na chamada à API de filmes: {0}")]
    Transport(String),

    #[error("API de filmes respondeu com status {status}")]
    Api { status: u16 },

    #[error("parâmetro obrigatório ausente: {0}")]
    MissingParameter(&'static str),
}

/// The language-model service that turns an utterance into
/// intent-bearing text.
#[async_trait]
pub trait ClassifierGateway: Send + Sync {
    /// Classify one utterance, returning the model's free-form text.
    async fn classify(&self, utterance: &str) -> Result<String, ClassifierError>;
}

/// The movie-database service behind the dispatcher.
#[async_trait]
pub trait MovieQueryService: Send + Sync {
    /// Run one query and return a formatted, user-facing reply.
    /// Lookups that match nothing return a "not found" reply, not an error.
    async fn query(&self, request: &ActionRequest) -> Result<String, QueryError>;
}

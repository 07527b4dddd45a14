//! Per-turn orchestration: context update, classification, resolution,
//! and at most one movie query.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::ConversationContext;
use crate::gateway::{ClassifierError, ClassifierGateway, MovieQueryService};
use crate::intent::{resolve, ActionRequest, Intent, Resolution};

/// The result of one turn.
///
/// `reply` is `None` on the passthrough path: the classifier text itself
/// is the answer. Adapters decide how to render that (the CLI prints the
/// classifier text every turn anyway; the HTTP adapter returns it as the
/// response body).
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// What the classifier said for this turn.
    pub classifier_text: String,
    /// The dispatched reply: query result or corrective prompt.
    pub reply: Option<String>,
}

impl TurnOutcome {
    /// The single reply text an adapter without its own echo of the
    /// classifier text should return.
    pub fn response_text(&self) -> &str {
        self.reply.as_deref().unwrap_or(&self.classifier_text)
    }
}

/// Routes one conversational turn to the right movie query.
///
/// Holds its collaborators as injected trait objects; adapters construct
/// one dispatcher per process and share it freely (`Clone` is cheap).
#[derive(Clone)]
pub struct Dispatcher {
    classifier: Arc<dyn ClassifierGateway>,
    movies: Arc<dyn MovieQueryService>,
}

impl Dispatcher {
    pub fn new(classifier: Arc<dyn ClassifierGateway>, movies: Arc<dyn MovieQueryService>) -> Self {
        Self { classifier, movies }
    }

    /// Handle one turn.
    ///
    /// Order matters: the context slot is updated from the raw utterance
    /// before the classifier is consulted, so naming a movie always
    /// refreshes the slot even when the turn's intent ignores it.
    ///
    /// A classifier failure propagates to the caller; a movie-query
    /// failure is converted into a user-facing error reply and the turn
    /// still succeeds.
    pub async fn handle_turn(
        &self,
        ctx: &mut ConversationContext,
        utterance: &str,
    ) -> Result<TurnOutcome, ClassifierError> {
        ctx.observe_utterance(utterance);

        let classifier_text = self.classifier.classify(utterance).await?;
        let intent = Intent::from_classifier_text(&classifier_text);
        debug!(?intent, movie = ?ctx.current_movie(), "resolved turn intent");

        let reply = match resolve(intent, ctx) {
            Resolution::Passthrough => None,
            Resolution::Prompt(message) => Some(message),
            Resolution::Query(request) => Some(self.run_query(&request).await),
            Resolution::QueryWithNotice { request, notice } => {
                let answer = self.run_query(&request).await;
                Some(format!("{notice}\n{answer}"))
            }
        };

        Ok(TurnOutcome {
            classifier_text,
            reply,
        })
    }

    async fn run_query(&self, request: &ActionRequest) -> String {
        match self.movies.query(request).await {
            Ok(text) => text,
            Err(err) => {
                warn!(action = ?request.action, error = %err, "movie query failed");
                format!("Erro ao buscar informações: {err}")
            }
        }
    }
}

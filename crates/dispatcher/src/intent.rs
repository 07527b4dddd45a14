//! Intent classification and slot resolution.
//!
//! The classifier returns free-form text; intent is recovered from it by
//! an ordered rule table of case-insensitive substring triggers. The first
//! matching rule wins, so a text containing several keywords fires only
//! the highest-priority one. The result is an explicit [`Intent`] value,
//! which [`resolve`] then combines with the conversation context into a
//! single [`Resolution`].

use std::sync::LazyLock;

use regex::Regex;

use crate::context::ConversationContext;

/// Extracts the requested genre from the classifier's own text, e.g.
/// "o usuário demonstrou gosto por terror". Applied to the lowercased
/// text, so the captured genre is lowercase. Genre is never remembered
/// across turns.
static GENRE_PREFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gosto por\s*(.+)").expect("valid genre pattern"));

/// The read-only movie-database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryAction {
    Cast,
    Synopsis,
    Rating,
    Popular,
    Recommend,
    Similar,
}

/// One fully-parameterized movie query, handed to the [`MovieQueryService`].
///
/// [`MovieQueryService`]: crate::gateway::MovieQueryService
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub action: QueryAction,
    pub movie_name: Option<String>,
    pub genre: Option<String>,
}

impl ActionRequest {
    /// A query about one named movie (cast, synopsis, rating, similar).
    pub fn for_movie(action: QueryAction, movie_name: impl Into<String>) -> Self {
        Self {
            action,
            movie_name: Some(movie_name.into()),
            genre: None,
        }
    }

    /// The parameterless popular-movies query.
    pub fn popular() -> Self {
        Self {
            action: QueryAction::Popular,
            movie_name: None,
            genre: None,
        }
    }

    /// A recommendation query for one genre.
    pub fn recommend(genre: impl Into<String>) -> Self {
        Self {
            action: QueryAction::Recommend,
            movie_name: None,
            genre: Some(genre.into()),
        }
    }
}

/// Intent recovered from one classifier text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Cast,
    Synopsis,
    Rating,
    Popular,
    /// Genre comes from the classifier text itself, when present.
    Recommend { genre: Option<String> },
    Similar,
    /// "fale mais sobre este filme": synopsis of the remembered movie,
    /// prefixed with a consulting notice.
    TellMeMore,
    /// No trigger matched; the classifier text is the reply.
    Passthrough,
}

impl Intent {
    /// Classify one classifier text against the ordered trigger table.
    pub fn from_classifier_text(text: &str) -> Self {
        let lowered = text.to_lowercase();

        // Priority order matters: when several triggers co-occur, the
        // first one in this chain wins.
        if lowered.contains("elenco") {
            Intent::Cast
        } else if lowered.contains("sinopse") {
            Intent::Synopsis
        } else if lowered.contains("avaliação") {
            Intent::Rating
        } else if lowered.contains("filmes populares") {
            Intent::Popular
        } else if lowered.contains("recomendação") {
            let genre = GENRE_PREFERENCE
                .captures(&lowered)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string());
            Intent::Recommend { genre }
        } else if lowered.contains("similar") {
            Intent::Similar
        } else if lowered.contains("fale mais sobre este filme") {
            Intent::TellMeMore
        } else {
            Intent::Passthrough
        }
    }
}

/// What the dispatcher decided to do with one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Issue exactly this movie query and reply with its result.
    Query(ActionRequest),
    /// Issue the query, but prefix the reply with a notice line.
    QueryWithNotice {
        request: ActionRequest,
        notice: String,
    },
    /// A required slot is missing; reply with this corrective prompt
    /// and issue no query.
    Prompt(String),
    /// No trigger matched; the classifier text is returned verbatim.
    Passthrough,
}

pub const PROMPT_MOVIE_FOR_CAST: &str =
    "Por favor, forneça o nome do filme para buscar o elenco.";
pub const PROMPT_MOVIE_FOR_SYNOPSIS: &str =
    "Por favor, forneça o nome do filme para buscar a sinopse.";
pub const PROMPT_MOVIE_FOR_RATING: &str =
    "Por favor, forneça o nome do filme para buscar a avaliação.";
pub const PROMPT_GENRE_FOR_RECOMMEND: &str =
    "Por favor, forneça o gênero para recomendações.";
pub const PROMPT_MOVIE_FOR_SIMILAR: &str =
    "Por favor, forneça o nome do filme para buscar similares.";
pub const PROMPT_MOVIE_FOR_MORE: &str =
    "Não há um filme no contexto atual. Por favor, especifique o nome do filme.";

/// Combine an intent with the context into one resolution.
///
/// Actions that need a movie name read the context slot; the genre for a
/// recommendation comes only from the classifier text, independent of any
/// remembered movie.
pub fn resolve(intent: Intent, ctx: &ConversationContext) -> Resolution {
    match intent {
        Intent::Cast => movie_query(QueryAction::Cast, ctx, PROMPT_MOVIE_FOR_CAST),
        Intent::Synopsis => movie_query(QueryAction::Synopsis, ctx, PROMPT_MOVIE_FOR_SYNOPSIS),
        Intent::Rating => movie_query(QueryAction::Rating, ctx, PROMPT_MOVIE_FOR_RATING),
        Intent::Popular => Resolution::Query(ActionRequest::popular()),
        Intent::Recommend { genre } => match genre {
            Some(genre) => Resolution::Query(ActionRequest::recommend(genre)),
            None => Resolution::Prompt(PROMPT_GENRE_FOR_RECOMMEND.to_string()),
        },
        Intent::Similar => movie_query(QueryAction::Similar, ctx, PROMPT_MOVIE_FOR_SIMILAR),
        Intent::TellMeMore => match ctx.current_movie() {
            Some(movie) => Resolution::QueryWithNotice {
                request: ActionRequest::for_movie(QueryAction::Synopsis, movie),
                notice: format!("Consultando mais informações sobre '{movie}'."),
            },
            None => Resolution::Prompt(PROMPT_MOVIE_FOR_MORE.to_string()),
        },
        Intent::Passthrough => Resolution::Passthrough,
    }
}

fn movie_query(action: QueryAction, ctx: &ConversationContext, prompt: &str) -> Resolution {
    match ctx.current_movie() {
        Some(movie) => Resolution::Query(ActionRequest::for_movie(action, movie)),
        None => Resolution::Prompt(prompt.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_with(movie: &str) -> ConversationContext {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance(&format!("filme {movie}"));
        ctx
    }

    #[test]
    fn each_trigger_maps_to_its_intent() {
        assert_eq!(Intent::from_classifier_text("o elenco é..."), Intent::Cast);
        assert_eq!(Intent::from_classifier_text("a sinopse do filme"), Intent::Synopsis);
        assert_eq!(Intent::from_classifier_text("a avaliação é boa"), Intent::Rating);
        assert_eq!(
            Intent::from_classifier_text("os filmes populares do momento"),
            Intent::Popular
        );
        assert_eq!(
            Intent::from_classifier_text("quer algo similar"),
            Intent::Similar
        );
        assert_eq!(
            Intent::from_classifier_text("fale mais sobre este filme"),
            Intent::TellMeMore
        );
    }

    #[test]
    fn triggers_are_case_insensitive() {
        assert_eq!(Intent::from_classifier_text("ELENCO"), Intent::Cast);
        assert_eq!(Intent::from_classifier_text("Avaliação"), Intent::Rating);
    }

    #[test]
    fn cast_beats_synopsis_when_both_present() {
        let intent = Intent::from_classifier_text("segue a sinopse e o elenco do filme");
        assert_eq!(intent, Intent::Cast);
    }

    #[test]
    fn priority_order_holds_across_the_table() {
        // "similar" loses to everything above it in the table.
        assert_eq!(
            Intent::from_classifier_text("avaliação de um filme similar"),
            Intent::Rating
        );
        assert_eq!(
            Intent::from_classifier_text("recomendação de algo similar"),
            Intent::Recommend { genre: None }
        );
    }

    #[test]
    fn recommendation_extracts_lowercased_genre() {
        let intent =
            Intent::from_classifier_text("Recomendação: o usuário demonstrou gosto por Terror");
        assert_eq!(
            intent,
            Intent::Recommend {
                genre: Some("terror".to_string())
            }
        );
    }

    #[test]
    fn recommendation_without_genre_marker_has_no_genre() {
        let intent = Intent::from_classifier_text("o usuário quer uma recomendação");
        assert_eq!(intent, Intent::Recommend { genre: None });
    }

    #[test]
    fn unmatched_text_is_passthrough() {
        let intent = Intent::from_classifier_text("Olá! Como posso ajudar com filmes hoje?");
        assert_eq!(intent, Intent::Passthrough);
    }

    #[test]
    fn movie_actions_use_the_context_slot() {
        let resolution = resolve(Intent::Cast, &ctx_with("Dune"));
        assert_eq!(
            resolution,
            Resolution::Query(ActionRequest::for_movie(QueryAction::Cast, "Dune"))
        );
    }

    #[test]
    fn missing_movie_yields_the_action_specific_prompt() {
        let ctx = ConversationContext::new();
        assert_eq!(
            resolve(Intent::Cast, &ctx),
            Resolution::Prompt(PROMPT_MOVIE_FOR_CAST.to_string())
        );
        assert_eq!(
            resolve(Intent::Synopsis, &ctx),
            Resolution::Prompt(PROMPT_MOVIE_FOR_SYNOPSIS.to_string())
        );
        assert_eq!(
            resolve(Intent::Rating, &ctx),
            Resolution::Prompt(PROMPT_MOVIE_FOR_RATING.to_string())
        );
        assert_eq!(
            resolve(Intent::Similar, &ctx),
            Resolution::Prompt(PROMPT_MOVIE_FOR_SIMILAR.to_string())
        );
        assert_eq!(
            resolve(Intent::TellMeMore, &ctx),
            Resolution::Prompt(PROMPT_MOVIE_FOR_MORE.to_string())
        );
    }

    #[test]
    fn popular_needs_no_slot() {
        let ctx = ConversationContext::new();
        assert_eq!(
            resolve(Intent::Popular, &ctx),
            Resolution::Query(ActionRequest::popular())
        );
    }

    #[test]
    fn recommendation_genre_is_independent_of_remembered_movie() {
        let resolution = resolve(
            Intent::Recommend {
                genre: Some("terror".to_string()),
            },
            &ctx_with("Dune"),
        );
        assert_eq!(resolution, Resolution::Query(ActionRequest::recommend("terror")));
    }

    #[test]
    fn tell_me_more_queries_synopsis_with_notice() {
        let resolution = resolve(Intent::TellMeMore, &ctx_with("Dune"));
        assert_eq!(
            resolution,
            Resolution::QueryWithNotice {
                request: ActionRequest::for_movie(QueryAction::Synopsis, "Dune"),
                notice: "Consultando mais informações sobre 'Dune'.".to_string(),
            }
        );
    }
}

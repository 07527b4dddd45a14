//! Single-slot conversation context.
//!
//! The only thing remembered between turns is the movie the user last
//! mentioned. The slot starts empty, is overwritten whenever an utterance
//! names a movie, and is never cleared automatically.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the token "filme" followed by an optional quoted or unquoted
/// name running to the end of the utterance. The capture is everything
/// between the marker and the closing quote (if any).
static MOVIE_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)filme\s*['"]?(.+?)['"]?$"#).expect("valid movie pattern"));

/// Per-session conversational state: the "current movie" slot.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    current_movie: Option<String>,
}

impl ConversationContext {
    /// Create a context with an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered movie name, if any.
    pub fn current_movie(&self) -> Option<&str> {
        self.current_movie.as_deref()
    }

    /// Update the slot from a raw utterance.
    ///
    /// Runs unconditionally at the start of every turn, before intent is
    /// known: mentioning a movie always updates the slot, even when the
    /// classifier output turns out to be unrelated to it. An utterance
    /// with no movie mention leaves the slot untouched.
    pub fn observe_utterance(&mut self, utterance: &str) {
        if let Some(captures) = MOVIE_MENTION.captures(utterance) {
            if let Some(name) = captures.get(1) {
                let name = name.as_str().trim();
                if !name.is_empty() {
                    self.current_movie = Some(name.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_mention_is_stripped_and_trimmed() {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("Quero saber sobre o filme 'Interstellar'");
        assert_eq!(ctx.current_movie(), Some("Interstellar"));
    }

    #[test]
    fn double_quoted_mention_is_stripped() {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("me fale do filme \"Cidade de Deus\"");
        assert_eq!(ctx.current_movie(), Some("Cidade de Deus"));
    }

    #[test]
    fn unquoted_mention_runs_to_end_of_utterance() {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("qual a sinopse do filme Mad Max: Fury Road");
        assert_eq!(ctx.current_movie(), Some("Mad Max: Fury Road"));
    }

    #[test]
    fn marker_is_case_insensitive() {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("FILME Dune");
        assert_eq!(ctx.current_movie(), Some("Dune"));
    }

    #[test]
    fn new_mention_overwrites_previous_one() {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("filme Dune");
        ctx.observe_utterance("agora o filme Interstellar");
        assert_eq!(ctx.current_movie(), Some("Interstellar"));
    }

    #[test]
    fn utterance_without_mention_keeps_slot() {
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("filme Dune");
        ctx.observe_utterance("quero uma recomendação");
        assert_eq!(ctx.current_movie(), Some("Dune"));
    }

    #[test]
    fn slot_starts_empty_and_is_never_cleared() {
        let mut ctx = ConversationContext::new();
        assert_eq!(ctx.current_movie(), None);
        ctx.observe_utterance("oi, tudo bem?");
        assert_eq!(ctx.current_movie(), None);
    }
}

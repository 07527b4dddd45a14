//! Per-session context registry.
//!
//! Contexts live in memory only and are keyed by an opaque client-chosen
//! session token. Nothing expires them; the registry lives as long as the
//! process.

use dashmap::DashMap;

use dispatcher::ConversationContext;

/// Keyed store of conversation contexts.
///
/// Concurrent requests on the same session each work on their own copy
/// of the context and the last writer wins; the single slot makes that
/// an acceptable trade against holding a map guard across await points.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, ConversationContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the session's context, or a fresh one for an unknown token.
    pub fn load(&self, session_id: &str) -> ConversationContext {
        self.sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Persist the context under the session token.
    pub fn store(&self, session_id: &str, ctx: ConversationContext) {
        self.sessions.insert(session_id.to_string(), ctx);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_session_yields_fresh_context() {
        let store = SessionStore::new();
        let ctx = store.load("nobody");
        assert_eq!(ctx.current_movie(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn stored_context_is_returned_for_its_token_only() {
        let store = SessionStore::new();
        let mut ctx = ConversationContext::new();
        ctx.observe_utterance("filme Dune");
        store.store("alice", ctx);

        assert_eq!(store.load("alice").current_movie(), Some("Dune"));
        assert_eq!(store.load("bob").current_movie(), None);
        assert_eq!(store.len(), 1);
    }
}

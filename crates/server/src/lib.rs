//! HTTP adapter for the movie chatbot.
//!
//! Exposes the dispatcher as a request/reply surface: one chat operation
//! plus direct popular-movies and recommendation lookups. Each chat
//! request without a session token runs against a fresh context; clients
//! that send a `session_id` get a persistent context, so the remembered
//! movie actually carries across their requests.

pub mod api;
pub mod sessions;

pub use api::{create_router, AppState};
pub use sessions::SessionStore;

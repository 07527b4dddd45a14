//! Response types for the TMDb v3 endpoints this client consumes.
//!
//! Only the fields the replies need are decoded; everything else in the
//! TMDb payloads is ignored.

use serde::Deserialize;

/// Unique identifier of a movie in TMDb.
pub type TmdbMovieId = u64;

/// One movie as returned by `/search/movie`, `/discover/movie`,
/// `/movie/popular` and `/movie/{id}/similar`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: TmdbMovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Paged movie list shared by the search/discover/popular/similar endpoints.
#[derive(Debug, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

/// One credited cast member from `/movie/{id}/credits`.
#[derive(Debug, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// One entry of `/genre/movie/list`.
#[derive(Debug, Deserialize)]
pub struct GenreEntry {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<GenreEntry>,
}

//! TMDb lookup client, the [`MovieQueryService`] implementation.
//!
//! Each movie query maps to one or two dependent TMDb v3 calls: the
//! per-movie actions (cast, synopsis, rating, similar) search by name
//! first and then fetch details for the best hit; recommendations map
//! the genre name to a TMDb genre id and then run a filtered discovery
//! query. Replies come back as formatted Portuguese text, with "not
//! found" phrasing when a lookup matches nothing.

pub mod reply;
pub mod types;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use dispatcher::{ActionRequest, MovieQueryService, QueryAction, QueryError};
use types::{CreditsResponse, GenreListResponse, MoviePage, MovieSummary, TmdbMovieId};

const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Client for the TMDb v3 API.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Read the API key from the `TMDB_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, QueryError> {
        let api_key = std::env::var("TMDB_API_KEY").map_err(|_| {
            QueryError::Transport("TMDB_API_KEY não definida no ambiente".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different endpoint (for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, QueryError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%path, "querying TMDb");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Api {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| QueryError::Transport(e.to_string()))
    }

    /// Best search hit for a movie name, if any.
    pub async fn search_movie(&self, name: &str) -> Result<Option<MovieSummary>, QueryError> {
        let page: MoviePage = self.get("/search/movie", &[("query", name)]).await?;
        Ok(page.results.into_iter().next())
    }

    /// Credited cast names for a movie, in billing order.
    pub async fn movie_credits(&self, movie_id: TmdbMovieId) -> Result<Vec<String>, QueryError> {
        let credits: CreditsResponse = self
            .get(&format!("/movie/{movie_id}/credits"), &[])
            .await?;
        Ok(credits.cast.into_iter().map(|member| member.name).collect())
    }

    /// Currently popular movies.
    pub async fn popular_movies(&self) -> Result<Vec<MovieSummary>, QueryError> {
        let page: MoviePage = self.get("/movie/popular", &[]).await?;
        Ok(page.results)
    }

    /// TMDb genre id for a genre name, matched case-insensitively.
    pub async fn genre_id(&self, genre: &str) -> Result<Option<u64>, QueryError> {
        let list: GenreListResponse = self.get("/genre/movie/list", &[]).await?;
        Ok(list
            .genres
            .into_iter()
            .find(|entry| entry.name.to_lowercase() == genre.to_lowercase())
            .map(|entry| entry.id))
    }

    /// Top discovery hit for a genre id, if any.
    pub async fn discover_by_genre(
        &self,
        genre_id: u64,
    ) -> Result<Option<MovieSummary>, QueryError> {
        let page: MoviePage = self
            .get("/discover/movie", &[("with_genres", &genre_id.to_string())])
            .await?;
        Ok(page.results.into_iter().next())
    }

    /// Movies similar to a given one.
    pub async fn similar_movies(
        &self,
        movie_id: TmdbMovieId,
    ) -> Result<Vec<MovieSummary>, QueryError> {
        let page: MoviePage = self
            .get(&format!("/movie/{movie_id}/similar"), &[])
            .await?;
        Ok(page.results)
    }

    async fn cast_reply(&self, movie_name: &str) -> Result<String, QueryError> {
        match self.search_movie(movie_name).await? {
            Some(movie) => {
                let cast = self.movie_credits(movie.id).await?;
                Ok(reply::cast(movie_name, &cast))
            }
            None => Ok(reply::movie_not_found(movie_name)),
        }
    }

    async fn synopsis_reply(&self, movie_name: &str) -> Result<String, QueryError> {
        match self.search_movie(movie_name).await? {
            Some(movie) => Ok(reply::synopsis(movie_name, &movie)),
            None => Ok(reply::movie_not_found(movie_name)),
        }
    }

    async fn rating_reply(&self, movie_name: &str) -> Result<String, QueryError> {
        match self.search_movie(movie_name).await? {
            Some(movie) => Ok(reply::rating(movie_name, &movie)),
            None => Ok(reply::movie_not_found(movie_name)),
        }
    }

    async fn popular_reply(&self) -> Result<String, QueryError> {
        let movies = self.popular_movies().await?;
        Ok(reply::popular(&movies))
    }

    async fn recommend_reply(&self, genre: &str) -> Result<String, QueryError> {
        match self.genre_id(genre).await? {
            Some(genre_id) => match self.discover_by_genre(genre_id).await? {
                Some(movie) => Ok(reply::recommendation(genre, &movie)),
                None => Ok(reply::no_movies_for_genre(genre)),
            },
            None => Ok(reply::genre_not_found(genre)),
        }
    }

    async fn similar_reply(&self, movie_name: &str) -> Result<String, QueryError> {
        match self.search_movie(movie_name).await? {
            Some(movie) => {
                let similar = self.similar_movies(movie.id).await?;
                Ok(reply::similar(movie_name, &similar))
            }
            None => Ok(reply::movie_not_found(movie_name)),
        }
    }
}

#[async_trait]
impl MovieQueryService for TmdbClient {
    async fn query(&self, request: &ActionRequest) -> Result<String, QueryError> {
        let movie_name = || {
            request
                .movie_name
                .as_deref()
                .ok_or(QueryError::MissingParameter("movie_name"))
        };

        match request.action {
            QueryAction::Cast => self.cast_reply(movie_name()?).await,
            QueryAction::Synopsis => self.synopsis_reply(movie_name()?).await,
            QueryAction::Rating => self.rating_reply(movie_name()?).await,
            QueryAction::Popular => self.popular_reply().await,
            QueryAction::Recommend => {
                let genre = request
                    .genre
                    .as_deref()
                    .ok_or(QueryError::MissingParameter("genre"))?;
                self.recommend_reply(genre).await
            }
            QueryAction::Similar => self.similar_reply(movie_name()?).await,
        }
    }
}

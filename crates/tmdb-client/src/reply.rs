//! User-facing reply formatting for each movie query.
//!
//! All replies are plain Portuguese text. "Not found" is a normal reply
//! here, never an error: a lookup that matched nothing still produces one
//! of these strings.

use crate::types::MovieSummary;

/// How many names/titles a list reply carries at most.
pub const LIST_LIMIT: usize = 5;

pub fn movie_not_found(movie_name: &str) -> String {
    format!("Não encontrei informações sobre o filme '{movie_name}'.")
}

pub fn cast(movie_name: &str, cast_names: &[String]) -> String {
    let names: Vec<&str> = cast_names
        .iter()
        .take(LIST_LIMIT)
        .map(String::as_str)
        .collect();
    format!(
        "O elenco principal de '{movie_name}' é: {}",
        names.join(", ")
    )
}

pub fn synopsis(movie_name: &str, movie: &MovieSummary) -> String {
    let overview = movie
        .overview
        .as_deref()
        .filter(|o| !o.is_empty())
        .unwrap_or("Sinopse não disponível.");
    format!("A sinopse do filme '{movie_name}' é: {overview}")
}

pub fn rating(movie_name: &str, movie: &MovieSummary) -> String {
    let rating = match movie.vote_average {
        Some(value) => value.to_string(),
        None => "Avaliação não disponível.".to_string(),
    };
    format!("A avaliação do filme '{movie_name}' é: {rating}/10.")
}

pub fn popular(movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return "Não encontrei filmes populares no momento.".to_string();
    }
    let titles: Vec<&str> = movies
        .iter()
        .take(LIST_LIMIT)
        .map(|m| m.title.as_str())
        .collect();
    format!(
        "Os filmes populares no momento são: {}",
        titles.join(", ")
    )
}

pub fn recommendation(genre: &str, movie: &MovieSummary) -> String {
    format!("Recomendo o filme '{}' para o gênero '{genre}'.", movie.title)
}

pub fn no_movies_for_genre(genre: &str) -> String {
    format!("Não encontrei filmes para o gênero '{genre}'.")
}

pub fn genre_not_found(genre: &str) -> String {
    format!("Não encontrei o gênero '{genre}'.")
}

pub fn similar(movie_name: &str, movies: &[MovieSummary]) -> String {
    if movies.is_empty() {
        return format!("Não encontrei filmes similares a '{movie_name}'.");
    }
    let titles: Vec<&str> = movies
        .iter()
        .take(LIST_LIMIT)
        .map(|m| m.title.as_str())
        .collect();
    format!("Filmes similares a '{movie_name}': {}", titles.join(", "))
}

//! Shaping of a merged metadata record into the published output.

use crate::error::TmdbError;
use crate::models::{FilteredOutput, MovieMetadata};

/// Poster size requested when the remote config offers it.
const PREFERRED_POSTER_SIZE: &str = "w154";

/// Decode a serialized merged record and produce the serialized published
/// shape: verbatim title, a fully-qualified artwork URL, and the release
/// year.
pub fn to_published(merged: &str) -> Result<String, TmdbError> {
    let record: MovieMetadata = serde_json::from_str(merged)?;

    let images = &record.config.images;
    let size = poster_size(&images.poster_sizes, PREFERRED_POSTER_SIZE);
    let artwork = format!(
        "{}{}{}",
        images.base_url,
        size,
        record.poster_path.as_deref().unwrap_or_default()
    );

    let release_date = record.release_date.unwrap_or_default();
    let published = FilteredOutput {
        title: record.title.unwrap_or_default(),
        artwork,
        year: truncate_year(&release_date).to_string(),
    };

    Ok(serde_json::to_string(&published)?)
}

/// Pick a poster size token: an empty list falls back to `"original"`, a
/// list missing the preferred token falls back to its first entry.
fn poster_size<'a>(sizes: &'a [String], preferred: &'a str) -> &'a str {
    if sizes.is_empty() {
        return "original";
    }
    if sizes.iter().any(|s| s == preferred) {
        return preferred;
    }
    &sizes[0]
}

/// First four bytes of the date string; anything four bytes or shorter
/// passes through untouched.
fn truncate_year(date: &str) -> &str {
    if date.len() > 4 {
        date.get(..4).unwrap_or(date)
    } else {
        date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sizes(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn poster_size_empty_list_falls_back_to_original() {
        assert_eq!(poster_size(&[], "w154"), "original");
    }

    #[test]
    fn poster_size_prefers_requested_token_anywhere_in_list() {
        let list = sizes(&["w92", "w154", "w500"]);
        assert_eq!(poster_size(&list, "w154"), "w154");
        let tail = sizes(&["w92", "w500", "w154"]);
        assert_eq!(poster_size(&tail, "w154"), "w154");
    }

    #[test]
    fn poster_size_missing_token_falls_back_to_first_entry() {
        let list = sizes(&["w92", "w185"]);
        assert_eq!(poster_size(&list, "w154"), "w92");
    }

    #[test]
    fn truncate_year_handles_short_and_empty_dates() {
        assert_eq!(truncate_year("1994-10-14"), "1994");
        assert_eq!(truncate_year("2010"), "2010");
        assert_eq!(truncate_year("99"), "99");
        assert_eq!(truncate_year(""), "");
    }

    #[test]
    fn to_published_builds_artwork_from_config_and_poster_path() {
        let merged = r#"{
            "id": 680,
            "media_type": "movie",
            "backdrop_path": null,
            "poster_path": "/poster.jpg",
            "credits": {"id": 680, "cast": [], "crew": []},
            "config": {"images": {"base_url": "http://img/", "poster_sizes": ["w154"]}},
            "imdb_id": "tt0110912",
            "overview": "The lives of two mob hitmen...",
            "title": "Pulp Fiction",
            "release_date": "1994-10-14"
        }"#;

        let published = to_published(merged).unwrap();
        let output: FilteredOutput = serde_json::from_str(&published).unwrap();
        assert_eq!(
            output,
            FilteredOutput {
                title: "Pulp Fiction".to_string(),
                artwork: "http://img/w154/poster.jpg".to_string(),
                year: "1994".to_string(),
            }
        );
    }

    #[test]
    fn to_published_keys_are_stable() {
        let merged = r#"{
            "id": 1,
            "media_type": "movie",
            "backdrop_path": null,
            "poster_path": null,
            "config": {"images": {"base_url": "http://img/"}},
            "imdb_id": null,
            "overview": null,
            "title": "Nameless",
            "release_date": null
        }"#;

        let published = to_published(merged).unwrap();
        let value: serde_json::Value = serde_json::from_str(&published).unwrap();
        assert_eq!(value["title"], "Nameless");
        assert_eq!(value["artwork"], "http://img/original");
        assert_eq!(value["year"], "");
    }

    #[test]
    fn to_published_rejects_record_without_config() {
        let merged = r#"{
            "id": 680,
            "media_type": "movie",
            "backdrop_path": null,
            "poster_path": "/poster.jpg",
            "imdb_id": null,
            "overview": null,
            "title": "Pulp Fiction",
            "release_date": "1994-10-14"
        }"#;

        assert_matches!(to_published(merged), Err(TmdbError::Decode(_)));
    }

    #[test]
    fn to_published_rejects_malformed_input() {
        assert_matches!(to_published("not json"), Err(TmdbError::Decode(_)));
    }
}

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Discriminator for TMDb search matches.
///
/// `/search/multi` labels every result; the single-kind search endpoints
/// omit the field entirely, which decodes as the default empty
/// [`MediaKind::Other`]. Unknown labels the service may add later are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
    Other(String),
}

impl Default for MediaKind {
    fn default() -> Self {
        MediaKind::Other(String::new())
    }
}

impl From<String> for MediaKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "movie" => MediaKind::Movie,
            "tv" => MediaKind::Tv,
            "person" => MediaKind::Person,
            _ => MediaKind::Other(value),
        }
    }
}

impl From<MediaKind> for String {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => "movie".to_string(),
            MediaKind::Tv => "tv".to_string(),
            MediaKind::Person => "person".to_string(),
            MediaKind::Other(s) => s,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => f.write_str("movie"),
            MediaKind::Tv => f.write_str("tv"),
            MediaKind::Person => f.write_str("person"),
            MediaKind::Other(s) => f.write_str(s),
        }
    }
}

/// One page of search results, in the service's order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

/// A single search match. Movies carry `title`/`release_date`, TV shows
/// carry `name`/`first_air_date`, persons carry `name`/`profile_path`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub media_type: MediaKind,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl SearchResult {
    /// Kind-independent display title: movie `title` or TV/person `name`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}

/// Remote image-serving configuration, fetched from `/configuration` once
/// per [`Client`](crate::tmdb::Client) and cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub images: ImageConfig,
}

impl Config {
    /// The cache treats a config as populated once a base URL is present.
    pub fn is_populated(&self) -> bool {
        !self.images.base_url.is_empty()
    }
}

/// Base URLs plus the size tokens the image CDN accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub secure_base_url: String,
    #[serde(default)]
    pub backdrop_sizes: Vec<String>,
    #[serde(default)]
    pub logo_sizes: Vec<String>,
    #[serde(default)]
    pub poster_sizes: Vec<String>,
    #[serde(default)]
    pub profile_sizes: Vec<String>,
    #[serde(default)]
    pub still_sizes: Vec<String>,
}

/// Wire shape of `/movie/{id}` and `/tv/{id}`. TV field names are folded
/// onto the movie ones via aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
}

/// Cast and crew for one movie or show, in billing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub cast: Vec<Cast>,
    #[serde(default)]
    pub crew: Vec<Crew>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cast {
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Crew {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Fully merged record: details + credits + the shared image config.
///
/// `config` is attached as an `Arc` shared with the client's cache, and it
/// is a required field on decode, so a serialized record that lost its
/// configuration fails to parse instead of producing broken artwork URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub id: i64,
    pub media_type: MediaKind,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub credits: Credits,
    pub config: Arc<Config>,
    pub imdb_id: Option<String>,
    pub overview: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<String>,
}

/// The published shape handed to external consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilteredOutput {
    pub title: String,
    pub artwork: String,
    pub year: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_decodes_known_and_unknown_labels() {
        let known: MediaKind = serde_json::from_str("\"person\"").unwrap();
        assert_eq!(known, MediaKind::Person);

        let unknown: MediaKind = serde_json::from_str("\"collection\"").unwrap();
        assert_eq!(unknown, MediaKind::Other("collection".to_string()));
        assert_eq!(
            serde_json::to_string(&unknown).unwrap(),
            "\"collection\"".to_string()
        );
    }

    #[test]
    fn search_result_without_media_type_defaults_to_empty_other() {
        let result: SearchResult = serde_json::from_str(r#"{"id": 680}"#).unwrap();
        assert_eq!(result.media_type, MediaKind::Other(String::new()));
        assert_eq!(result.id, 680);
    }

    #[test]
    fn search_result_tolerates_null_paths() {
        let result: SearchResult = serde_json::from_str(
            r#"{"id": 1, "media_type": "tv", "name": "Fargo", "poster_path": null}"#,
        )
        .unwrap();
        assert_eq!(result.media_type, MediaKind::Tv);
        assert_eq!(result.display_title(), "Fargo");
        assert_eq!(result.poster_path, None);
    }

    #[test]
    fn tv_details_fold_onto_movie_field_names() {
        let details: MovieDetails = serde_json::from_str(
            r#"{"id": 60622, "name": "Fargo", "first_air_date": "2014-04-15"}"#,
        )
        .unwrap();
        assert_eq!(details.title.as_deref(), Some("Fargo"));
        assert_eq!(details.release_date.as_deref(), Some("2014-04-15"));
    }

    #[test]
    fn config_populated_predicate_tracks_base_url() {
        let mut config = Config::default();
        assert!(!config.is_populated());
        config.images.base_url = "http://image.tmdb.org/t/p/".to_string();
        assert!(config.is_populated());
    }
}

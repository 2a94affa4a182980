//! TMDb client: gateway, config cache, search, disambiguation, assembly.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::TmdbError;
use crate::models::{Config, Credits, MediaKind, MovieDetails, MovieMetadata, SearchResponse};
use crate::output;

const TMDB_BASE: &str = "https://api.themoviedb.org/3";

/// Handle to the remote metadata service.
///
/// Holds the API credential and a one-entry cache for the image-serving
/// configuration. The cache is guarded by a mutex so concurrent first
/// lookups against one client still fetch `/configuration` exactly once.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    config: Mutex<Option<Arc<Config>>>,
}

/// Remote operations exposed to consumers, kept behind a trait so callers
/// can substitute a fake in their own tests.
#[async_trait]
pub trait TmdbApi: Send + Sync {
    /// Combined movie/TV/person title search (`/search/multi`).
    async fn search_multi(&self, title: &str) -> Result<SearchResponse, TmdbError>;
    /// Movie title search (`/search/movie`).
    async fn search_movie(&self, title: &str) -> Result<SearchResponse, TmdbError>;
    /// TV title search (`/search/tv`).
    async fn search_tv(&self, title: &str) -> Result<SearchResponse, TmdbError>;
    /// Resolve a movie title into a serialized merged metadata record.
    async fn movie_data(&self, title: &str) -> Result<String, TmdbError>;
    /// Resolve a TV title into a serialized merged metadata record.
    async fn tv_data(&self, title: &str) -> Result<String, TmdbError>;
}

impl Client {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, TMDB_BASE)
    }

    /// Client pointed at a custom base URL (for tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            config: Mutex::new(None),
        }
    }

    /// GET an endpoint and return the raw body. Query values are
    /// percent-encoded; any non-2xx status is surfaced with its code.
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, TmdbError> {
        let mut url = format!("{}{}?api_key={}", self.base_url, path, self.api_key);
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        debug!(%path, "TMDb request");
        let res = self.http.get(&url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(TmdbError::RemoteStatus(status.as_u16()));
        }
        Ok(res.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let body = self.get(path, params).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Image configuration, fetched from `/configuration` on first use and
    /// reused for the lifetime of the client.
    ///
    /// The mutex is held across the fetch: the check and the store are one
    /// critical section, so two racing callers cannot both miss.
    pub async fn get_config(&self) -> Result<Arc<Config>, TmdbError> {
        let mut cached = self.config.lock().await;
        if let Some(config) = cached.as_ref() {
            if config.is_populated() {
                debug!("image config served from cache");
                return Ok(Arc::clone(config));
            }
        }

        let config: Arc<Config> = Arc::new(self.get_json("/configuration", &[]).await?);
        debug!(base_url = %config.images.base_url, "image config fetched");
        *cached = Some(Arc::clone(&config));
        Ok(config)
    }

    /// Resolve a movie title into its merged metadata record.
    ///
    /// Only the first search result is consulted. A `person` match is
    /// unsupported outright; a `tv` match means the caller wanted
    /// [`resolve_tv`](Self::resolve_tv).
    pub async fn resolve_movie(&self, title: &str) -> Result<MovieMetadata, TmdbError> {
        let found = self.search_movie(title).await?;
        if found.total_results == 0 {
            return Err(TmdbError::NoResults);
        }
        let top = found.results.first().ok_or(TmdbError::NoResults)?;
        match top.media_type {
            MediaKind::Person => Err(TmdbError::UnsupportedMedia(MediaKind::Person)),
            MediaKind::Tv => Err(TmdbError::WrongEndpoint(MediaKind::Tv)),
            _ => self.assemble(top.id, MediaKind::Movie).await,
        }
    }

    /// Resolve a TV title into its merged metadata record. Mirror of
    /// [`resolve_movie`](Self::resolve_movie) over the `/tv` endpoints.
    pub async fn resolve_tv(&self, title: &str) -> Result<MovieMetadata, TmdbError> {
        let found = self.search_tv(title).await?;
        if found.total_results == 0 {
            return Err(TmdbError::NoResults);
        }
        let top = found.results.first().ok_or(TmdbError::NoResults)?;
        match top.media_type {
            MediaKind::Person => Err(TmdbError::UnsupportedMedia(MediaKind::Person)),
            MediaKind::Movie => Err(TmdbError::WrongEndpoint(MediaKind::Movie)),
            _ => self.assemble(top.id, MediaKind::Tv).await,
        }
    }

    /// Fetch details, credits, and the image configuration for `id`, in
    /// that order, and merge them. Any failed fetch aborts the merge; no
    /// partial record is ever returned.
    async fn assemble(&self, id: i64, kind: MediaKind) -> Result<MovieMetadata, TmdbError> {
        let prefix = match kind {
            MediaKind::Tv => "tv",
            _ => "movie",
        };

        let details: MovieDetails = self.get_json(&format!("/{prefix}/{id}"), &[]).await?;
        let credits: Credits = self
            .get_json(&format!("/{prefix}/{id}/credits"), &[])
            .await?;
        let config = self.get_config().await?;

        // Id and kind come from disambiguation, not from the details
        // payload, so the discriminator stays consistent downstream.
        Ok(MovieMetadata {
            id,
            media_type: kind,
            backdrop_path: details.backdrop_path,
            poster_path: details.poster_path,
            credits,
            config,
            imdb_id: details.imdb_id,
            overview: details.overview,
            title: details.title,
            release_date: details.release_date,
        })
    }

    /// Shape a serialized merged record into the published output.
    pub fn to_json(&self, merged: &str) -> Result<String, TmdbError> {
        output::to_published(merged)
    }
}

#[async_trait]
impl TmdbApi for Client {
    async fn search_multi(&self, title: &str) -> Result<SearchResponse, TmdbError> {
        self.get_json("/search/multi", &[("query", title)]).await
    }

    async fn search_movie(&self, title: &str) -> Result<SearchResponse, TmdbError> {
        self.get_json("/search/movie", &[("query", title)]).await
    }

    async fn search_tv(&self, title: &str) -> Result<SearchResponse, TmdbError> {
        self.get_json("/search/tv", &[("query", title)]).await
    }

    async fn movie_data(&self, title: &str) -> Result<String, TmdbError> {
        let metadata = self.resolve_movie(title).await?;
        Ok(serde_json::to_string(&metadata)?)
    }

    async fn tv_data(&self, title: &str) -> Result<String, TmdbError> {
        let metadata = self.resolve_tv(title).await?;
        Ok(serde_json::to_string(&metadata)?)
    }
}

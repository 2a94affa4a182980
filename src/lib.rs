//! Resolve free-text movie and TV titles into normalized TMDb metadata.
//!
//! The pipeline behind [`TmdbApi::movie_data`] is: title search, media-kind
//! disambiguation of the first match, enrichment with details and credits,
//! and attachment of the image configuration (fetched once per client and
//! cached). [`Client::to_json`] then shapes the merged record into the
//! published `{title, artwork, year}` form.
//!
//! ```no_run
//! use cinemeta::{Client, TmdbApi};
//!
//! # async fn demo() -> Result<(), cinemeta::TmdbError> {
//! let client = Client::new("api-key");
//! let record = client.movie_data("Pulp Fiction").await?;
//! let published = client.to_json(&record)?;
//! println!("{published}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod output;
pub mod tmdb;

pub use error::TmdbError;
pub use models::{
    Cast, Config, Credits, Crew, FilteredOutput, ImageConfig, MediaKind, MovieDetails,
    MovieMetadata, SearchResponse, SearchResult,
};
pub use output::to_published;
pub use tmdb::{Client, TmdbApi};

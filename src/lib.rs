//! # movie-discovery
//!
//! Asynchronous movie-discovery client library: queries a third-party movie
//! metadata API and exposes the results through a reusable async
//! fetch-state container.
//!
//! ## Design Philosophy
//!
//! movie-discovery is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Explicitly configured** - Credentials and base URL are passed in
//!   once at construction, never read from global state
//! - **Event-driven** - Consumers subscribe to fetch-state transitions,
//!   no polling required
//! - **Fail-fast** - Multi-page aggregation returns everything or the
//!   first error, never a partial list
//!
//! ## Quick Start
//!
//! ```no_run
//! use movie_discovery::{Config, MovieClient, MovieId, QueryRequest, RegionTag};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MovieClient::new(Config::new("tmdb-api-token"))?;
//!
//!     // Free-text search: one request, results returned verbatim
//!     let hits = client.fetch_movies(&QueryRequest::search("batman")).await?;
//!
//!     // Regional catalogue: two pages joined in page order, capped at 40
//!     let desi = client
//!         .fetch_movies(&QueryRequest::in_region(RegionTag::Bollywood))
//!         .await?;
//!
//!     // Full record for one movie
//!     let details = client.fetch_movie_details(MovieId::new(550)).await?;
//!
//!     println!("{} search hits, {} regional, {}", hits.len(), desi.len(), details.title);
//!     Ok(())
//! }
//! ```
//!
//! For the lifecycle container that wraps these calls (auto-trigger,
//! refetch, reset, teardown discard), see [`FetchHandle`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Movie metadata API client and query aggregation
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Generic asynchronous fetch-state container
pub mod fetch;
/// External trending-list provider interface
pub mod trending;
/// Core types
pub mod types;

// Re-export commonly used types
pub use client::MovieClient;
pub use config::{Config, DEFAULT_BASE_URL};
pub use error::{Error, ErrorInfo, Result};
pub use fetch::{FetchHandle, FetchState, Producer};
pub use trending::TrendingProvider;
pub use types::{
    Genre, MovieDetails, MovieId, MovieListPage, MovieSummary, QueryRequest, RegionTag,
    TrendingItem,
};

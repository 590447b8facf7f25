//! External trending-list provider interface
//!
//! The trending ranking lives in an external store this library does not
//! implement. Only the consumed surface is defined here; any implementation
//! plugs into a [`crate::FetchHandle`] exactly like the movie client does.

use crate::error::Result;
use crate::types::TrendingItem;
use async_trait::async_trait;

/// Source of the ranked trending-movies list
///
/// Implementations must return items in ranking order, each carrying a
/// unique `movie_id`.
#[async_trait]
pub trait TrendingProvider: Send + Sync {
    /// Fetches the current trending ranking, most popular first
    async fn get_trending(&self) -> Result<Vec<TrendingItem>>;
}

//! Movie metadata API client and query aggregation
//!
//! [`MovieClient`] turns one [`QueryRequest`] into the right set of paginated
//! HTTP requests, joins the pages in issuance order, and truncates to a fixed
//! cap:
//!
//! - **Search mode** (non-empty query): one search request, page 1, results
//!   returned verbatim with no truncation
//! - **Region mode** (mapped region filter): two concurrent discovery
//!   requests (pages 1-2) filtered by origin country, capped at 40
//! - **Default mode**: three concurrent unfiltered discovery requests
//!   (pages 1-3), capped at 60
//!
//! Multi-page modes are all-or-nothing: the first failing page fails the
//! whole call and no partial list is ever returned. The joined sequence
//! always reflects page order, not completion order.
//!
//! # Example
//!
//! ```no_run
//! use movie_discovery::{Config, MovieClient, QueryRequest, RegionTag};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MovieClient::new(Config::new("tmdb-api-token"))?;
//!
//! // Top popular movies, three pages joined and capped at 60
//! let popular = client.fetch_movies(&QueryRequest::default()).await?;
//!
//! // Regional catalogue, two pages capped at 40
//! let desi = client
//!     .fetch_movies(&QueryRequest::in_region(RegionTag::Bollywood))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{MovieDetails, MovieId, MovieListPage, MovieSummary, QueryRequest};
use futures::future::try_join_all;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

/// Result cap for region-filtered discovery (two pages)
const REGION_RESULT_CAP: usize = 40;

/// Result cap for unfiltered discovery (three pages)
const DEFAULT_RESULT_CAP: usize = 60;

/// Asynchronous client for the movie metadata API
///
/// Holds one `reqwest::Client` configured with the bearer token from an
/// explicit [`Config`]; construction is the only place credentials are read.
#[derive(Debug)]
pub struct MovieClient {
    http: reqwest::Client,
    base_url: String,
}

impl MovieClient {
    /// Creates a client from an explicit configuration.
    ///
    /// Validates the configuration and builds the underlying HTTP client
    /// with the bearer token and JSON accept header applied to every
    /// request.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| Error::Config {
                message: format!("api_token is not a valid header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches a movie list for the given request.
    ///
    /// Strategy selection in priority order: non-empty `query`, then mapped
    /// `region`, then unfiltered default discovery. See the module docs for
    /// the per-mode request sets and caps.
    pub async fn fetch_movies(&self, request: &QueryRequest) -> Result<Vec<MovieSummary>> {
        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            debug!(query, "searching movies");
            let url = format!(
                "{}/search/movie?query={}&page=1",
                self.base_url,
                urlencoding::encode(query)
            );
            let page: MovieListPage = self.get_json(&url).await?;
            return Ok(page.results);
        }

        if let Some(region) = request.region {
            let country = region.country_code();
            debug!(%region, country, "fetching region discovery pages");
            let pages =
                try_join_all((1..=2u32).map(|page| self.discover_page(Some(country), page)))
                    .await?;
            let mut movies: Vec<MovieSummary> = pages.into_iter().flatten().collect();
            movies.truncate(REGION_RESULT_CAP);
            return Ok(movies);
        }

        debug!("fetching default discovery pages");
        let pages = try_join_all((1..=3u32).map(|page| self.discover_page(None, page))).await?;
        let mut movies: Vec<MovieSummary> = pages.into_iter().flatten().collect();
        movies.truncate(DEFAULT_RESULT_CAP);
        Ok(movies)
    }

    /// Fetches the full record for a single movie.
    pub async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails> {
        debug!(%id, "fetching movie details");
        let url = format!("{}/movie/{id}", self.base_url);
        self.get_json(&url).await
    }

    /// One discovery page, optionally filtered by origin country
    async fn discover_page(&self, country: Option<&str>, page: u32) -> Result<Vec<MovieSummary>> {
        let url = match country {
            Some(cc) => format!(
                "{}/discover/movie?with_origin_country={cc}&sort_by=popularity.desc&page={page}",
                self.base_url
            ),
            None => format!(
                "{}/discover/movie?sort_by=popularity.desc&page={page}",
                self.base_url
            ),
        };
        let envelope: MovieListPage = self.get_json(&url).await?;
        Ok(envelope.results)
    }

    /// GET a URL and decode the JSON body, mapping non-2xx statuses to
    /// [`Error::Status`] with the response's status text.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%status, url, "upstream returned error status");
            return Err(Error::status(status));
        }
        Ok(response.json::<T>().await?)
    }
}

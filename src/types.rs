//! Core types for movie-discovery
//!
//! Movie records are pass-through data: the library deserializes what the
//! upstream API returns and hands it to consumers without interpreting the
//! fields. Nullable upstream fields are `Option`; fields the API sometimes
//! omits fall back to serde defaults so older or trimmed responses still
//! deserialize.

use serde::{Deserialize, Serialize};

/// Unique identifier for a movie
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub i64);

impl MovieId {
    /// Create a new MovieId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MovieId> for i64 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MovieId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Regional catalogue filter understood by the discovery endpoint
///
/// Each tag maps to a fixed country-of-origin code. Parsing an unknown tag
/// yields `None` (via [`RegionTag::from_tag`]) so callers fall through to
/// unfiltered discovery instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTag {
    /// Pakistani cinema (origin country PK)
    Pakistani,
    /// Bollywood (origin country IN)
    Bollywood,
    /// South Indian cinema (origin country IN)
    South,
    /// Hollywood (origin country US)
    Hollywood,
}

impl RegionTag {
    /// ISO 3166-1 country code used as the `with_origin_country` filter
    pub fn country_code(&self) -> &'static str {
        match self {
            Self::Pakistani => "PK",
            Self::Bollywood | Self::South => "IN",
            Self::Hollywood => "US",
        }
    }

    /// Parses a lowercase tag, returning `None` for unmapped values
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "pakistani" => Some(Self::Pakistani),
            "bollywood" => Some(Self::Bollywood),
            "south" => Some(Self::South),
            "hollywood" => Some(Self::Hollywood),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Pakistani => "pakistani",
            Self::Bollywood => "bollywood",
            Self::South => "south",
            Self::Hollywood => "hollywood",
        };
        write!(f, "{tag}")
    }
}

/// Input shape for a movie list query
///
/// Strategy selection happens in the client, in priority order: a non-empty
/// `query` wins, then a `region` filter, then unfiltered discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text search query; empty or absent means "no search"
    #[serde(default)]
    pub query: Option<String>,

    /// Regional catalogue filter
    #[serde(default)]
    pub region: Option<RegionTag>,
}

impl QueryRequest {
    /// Free-text search request
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            region: None,
        }
    }

    /// Region-filtered discovery request
    pub fn in_region(region: RegionTag) -> Self {
        Self {
            query: None,
            region: Some(region),
        }
    }
}

/// One movie as returned by the list endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Upstream movie identifier
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Title in the original language
    #[serde(default)]
    pub original_title: String,
    /// Plot synopsis
    #[serde(default)]
    pub overview: String,
    /// Poster image path fragment
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path fragment
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD), absent for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average vote on a 0-10 scale
    #[serde(default)]
    pub vote_average: f64,
    /// Number of votes
    #[serde(default)]
    pub vote_count: i64,
    /// Upstream popularity score
    #[serde(default)]
    pub popularity: f64,
    /// Genre identifiers
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    /// ISO 639-1 original language code
    #[serde(default)]
    pub original_language: String,
    /// Adult-content flag
    #[serde(default)]
    pub adult: bool,
    /// True if the entry is a video release rather than a theatrical movie
    #[serde(default)]
    pub video: bool,
}

/// Genre record embedded in movie details
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Upstream genre identifier
    pub id: i64,
    /// Genre display name
    pub name: String,
}

/// Full movie record returned by the details endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Upstream movie identifier
    pub id: MovieId,
    /// Display title
    pub title: String,
    /// Title in the original language
    #[serde(default)]
    pub original_title: String,
    /// Plot synopsis
    #[serde(default)]
    pub overview: String,
    /// Poster image path fragment
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path fragment
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD)
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average vote on a 0-10 scale
    #[serde(default)]
    pub vote_average: f64,
    /// Number of votes
    #[serde(default)]
    pub vote_count: i64,
    /// Upstream popularity score
    #[serde(default)]
    pub popularity: f64,
    /// Full genre records
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// ISO 639-1 original language code
    #[serde(default)]
    pub original_language: String,
    /// Adult-content flag
    #[serde(default)]
    pub adult: bool,
    /// True if the entry is a video release rather than a theatrical movie
    #[serde(default)]
    pub video: bool,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<i64>,
    /// Release status (e.g. "Released")
    #[serde(default)]
    pub status: Option<String>,
    /// Marketing tagline
    #[serde(default)]
    pub tagline: Option<String>,
    /// Production budget in US dollars
    #[serde(default)]
    pub budget: Option<i64>,
    /// Gross revenue in US dollars
    #[serde(default)]
    pub revenue: Option<i64>,
    /// IMDB cross-reference identifier
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Official homepage URL
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Paginated envelope wrapping every list endpoint response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieListPage {
    /// Page number this envelope covers
    #[serde(default)]
    pub page: i64,
    /// Movies on this page
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    /// Total number of pages available upstream
    #[serde(default)]
    pub total_pages: i64,
    /// Total number of matching movies upstream
    #[serde(default)]
    pub total_results: i64,
}

/// One entry of the external trending ranking
///
/// Produced by a [`crate::TrendingProvider`]; this library only consumes
/// the shape, never the provider's implementation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingItem {
    /// Movie this entry refers to (unique within one ranking)
    pub movie_id: MovieId,
    /// Display title
    pub title: String,
    /// Absolute poster URL, if the provider stores one
    #[serde(default)]
    pub poster_url: Option<String>,
    /// How often the movie was searched for
    #[serde(default)]
    pub search_count: i64,
}

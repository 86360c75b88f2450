use std::fmt::{self, Display, Formatter};

use crate::wire::RawCandidate;

/// TMDB image CDN prefix for poster thumbnails.
pub const TMDB_POSTER_BASE: &str = "https://image.tmdb.org/t/p/w200";
/// Locally served image shown when a candidate has no poster.
pub const PLACEHOLDER_POSTER: &str = "/static/img/no-poster.png";
/// Title shown when the backend sent neither `title` nor `name`.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Release year of a candidate, or the unknown sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseYear {
    Known(u16),
    Unknown,
}

impl ReleaseYear {
    /// Extracts a year from an ISO-ish date (`2017-12-01`) or a bare year.
    fn parse(raw: &str) -> Option<Self> {
        let head = raw.trim().split('-').next()?;
        if head.len() == 4 && head.bytes().all(|b| b.is_ascii_digit()) {
            head.parse().ok().map(ReleaseYear::Known)
        } else {
            None
        }
    }
}

impl Display for ReleaseYear {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseYear::Known(year) => write!(f, "{year:04}"),
            ReleaseYear::Unknown => f.write_str("????"),
        }
    }
}

/// Where a candidate's poster comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PosterRef {
    Remote(String),
    Placeholder,
}

impl PosterRef {
    fn from_path(path: Option<&str>) -> Self {
        let Some(path) = non_blank(path) else {
            return PosterRef::Placeholder;
        };
        if path.starts_with("http://") || path.starts_with("https://") {
            return PosterRef::Remote(path.to_string());
        }
        let path = path.trim_start_matches('/');
        PosterRef::Remote(format!("{TMDB_POSTER_BASE}/{path}"))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PosterRef::Remote(url) => url,
            PosterRef::Placeholder => PLACEHOLDER_POSTER,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PosterRef::Placeholder)
    }
}

/// One plausible title match, normalized for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    display_title: String,
    year: ReleaseYear,
    synopsis: String,
    poster: PosterRef,
    rating: Option<f32>,
}

impl Candidate {
    pub fn display_title(&self) -> &str {
        &self.display_title
    }

    pub fn year(&self) -> ReleaseYear {
        self.year
    }

    pub fn synopsis(&self) -> &str {
        &self.synopsis
    }

    pub fn poster(&self) -> &PosterRef {
        &self.poster
    }

    /// Average user rating on a 0-10 scale, when the backend reported one.
    pub fn rating(&self) -> Option<f32> {
        self.rating
    }

    /// `"Title (Year)"`, the line used in candidate lists.
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_title, self.year)
    }
}

impl From<RawCandidate> for Candidate {
    fn from(raw: RawCandidate) -> Self {
        let display_title = non_blank(raw.title.as_deref())
            .or_else(|| non_blank(raw.name.as_deref()))
            .unwrap_or(UNKNOWN_TITLE)
            .to_string();

        let year = [&raw.year, &raw.release_date, &raw.first_air_date]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .find_map(ReleaseYear::parse)
            .unwrap_or(ReleaseYear::Unknown);

        // A zero average means "no votes yet", not a terrible film.
        let rating = raw
            .vote_average
            .filter(|avg| avg.is_finite() && *avg > 0.0)
            .map(|avg| avg as f32);

        Self {
            display_title,
            year,
            synopsis: raw.overview.unwrap_or_default().trim().to_string(),
            poster: PosterRef::from_path(raw.poster_path.as_deref()),
            rating,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

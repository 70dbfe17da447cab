use crate::error::{Result, ShowCanvasError};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date and wall-clock time of a show.
///
/// The catalog sends RFC 3339 instants (usually UTC). They are shifted onto the
/// viewer's local clock, so an evening show in New York keeps its New York date.
/// Naive timestamps are taken as already local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShowDate(NaiveDateTime);

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

impl ShowDate {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// "Wednesday, March 5"
    pub fn poster_label(&self) -> String {
        self.0.format("%A, %B %-d").to_string()
    }

    /// "Mar 5"
    pub fn short_label(&self) -> String {
        self.0.format("%b %-d").to_string()
    }

    /// "Wednesday, March 5, 2025"
    pub fn long_label(&self) -> String {
        self.0.format("%A, %B %-d, %Y").to_string()
    }
}

impl ShowDate {
    /// Parse `s`, reading RFC 3339 instants on `tz`'s clock.
    pub fn parse_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<Self> {
        let s = s.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(at.with_timezone(tz).naive_local()));
        }

        for format in NAIVE_FORMATS {
            if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(at));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self)
            .ok_or_else(|| ShowCanvasError::Fetch(format!("unrecognized show date: {}", s)))
    }
}

impl FromStr for ShowDate {
    type Err = ShowCanvasError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_in(s, &Local)
    }
}

impl TryFrom<String> for ShowDate {
    type Error = ShowCanvasError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ShowDate> for String {
    fn from(date: ShowDate) -> Self {
        date.to_string()
    }
}

impl fmt::Display for ShowDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performer {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub stage_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Performer {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            stage_name: None,
            profile_image_url: None,
            bio: None,
        }
    }

    pub fn with_stage_name(mut self, stage_name: impl Into<String>) -> Self {
        self.stage_name = Some(stage_name.into());
        self
    }

    pub fn with_profile_image(mut self, url: impl Into<String>) -> Self {
        self.profile_image_url = Some(url.into());
        self
    }

    /// The name a performer is billed under: stage name when set, otherwise display name.
    pub fn billing_name(&self) -> &str {
        match self.stage_name.as_deref() {
            Some(stage) if !stage.is_empty() => stage,
            _ => &self.display_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: String,
    pub title: String,
    pub show_date: ShowDate,
    pub venue_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lineup: Vec<Performer>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

impl Show {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        show_date: ShowDate,
        venue_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            show_date,
            venue_name: venue_name.into(),
            description: None,
            lineup: Vec::new(),
            cover_image_url: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Case-insensitive substring match against title or venue.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.venue_name.to_lowercase().contains(&query)
    }
}

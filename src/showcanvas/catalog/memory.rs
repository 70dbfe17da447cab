use super::Catalog;
use crate::auth::BearerToken;
use crate::error::{Result, ShowCanvasError};
use crate::model::Show;
use std::cell::Cell;

/// In-memory catalog for testing and development.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    shows: Vec<Show>,
    accepted_token: Option<String>,
    fail: bool,
    fetches: Cell<usize>,
}

impl InMemoryCatalog {
    pub fn new(shows: Vec<Show>) -> Self {
        Self {
            shows,
            ..Self::default()
        }
    }

    /// Answer every fetch with an error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Only hand out shows to this token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.accepted_token = Some(token.into());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl Catalog for InMemoryCatalog {
    fn fetch_shows(&self, token: &BearerToken) -> Result<Vec<Show>> {
        self.fetches.set(self.fetches.get() + 1);

        if self.fail {
            return Err(ShowCanvasError::Fetch("catalog unavailable".to_string()));
        }
        if let Some(accepted) = &self.accepted_token
            && accepted != token.secret()
        {
            return Err(ShowCanvasError::Fetch("catalog answered HTTP 401".to_string()));
        }
        Ok(self.shows.clone())
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use crate::model::{Performer, Show, ShowDate};

    /// Builder for a show dated Wednesday 2025-03-05 at "The Lounge".
    pub struct ShowFixture {
        pub show: Show,
    }

    impl ShowFixture {
        pub fn new(title: &str) -> Self {
            let date: ShowDate = "2025-03-05T20:00:00".parse().expect("fixture date");
            let id = title.to_lowercase().replace(' ', "-");
            Self {
                show: Show::new(id, title, date, "The Lounge"),
            }
        }

        pub fn with_id(mut self, id: &str) -> Self {
            self.show.id = id.to_string();
            self
        }

        pub fn with_venue(mut self, venue: &str) -> Self {
            self.show.venue_name = venue.to_string();
            self
        }

        pub fn with_date(mut self, date: &str) -> Self {
            self.show.show_date = date.parse().expect("fixture date");
            self
        }

        pub fn with_description(mut self, description: &str) -> Self {
            self.show.description = Some(description.to_string());
            self
        }

        pub fn with_cover(mut self, url: &str) -> Self {
            self.show.cover_image_url = Some(url.to_string());
            self
        }

        /// Appends performers billed under their display names.
        pub fn with_performers(mut self, names: &[&str]) -> Self {
            let start = self.show.lineup.len();
            for (i, name) in names.iter().enumerate() {
                let id = format!("p{}", start + i + 1);
                self.show.lineup.push(Performer::new(id, *name));
            }
            self
        }

        pub fn with_performer(mut self, performer: Performer) -> Self {
            self.show.lineup.push(performer);
            self
        }
    }
}

use super::Catalog;
use crate::auth::BearerToken;
use crate::error::{Result, ShowCanvasError};
use crate::model::Show;
use tracing::debug;

const SHOWS_PATH: &str = "/api/shows";

/// Catalog client for the Dragvertising REST API.
pub struct HttpCatalog {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            agent: ureq::Agent::new(),
        }
    }

    pub fn shows_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SHOWS_PATH)
    }
}

impl Catalog for HttpCatalog {
    fn fetch_shows(&self, token: &BearerToken) -> Result<Vec<Show>> {
        let url = self.shows_url();
        debug!(%url, "fetching shows");

        let response = self
            .agent
            .get(&url)
            .set("Authorization", &token.header_value())
            .set("Accept", "application/json")
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => {
                    ShowCanvasError::Fetch(format!("catalog answered HTTP {}", code))
                }
                ureq::Error::Transport(transport) => ShowCanvasError::Fetch(transport.to_string()),
            })?;

        let body = response.into_string().map_err(ShowCanvasError::Io)?;
        let shows = parse_shows(&body)?;
        debug!(count = shows.len(), "fetched shows");
        Ok(shows)
    }
}

/// Decode the body of a show listing.
pub fn parse_shows(body: &str) -> Result<Vec<Show>> {
    serde_json::from_str(body)
        .map_err(|err| ShowCanvasError::Fetch(format!("unexpected catalog response: {}", err)))
}

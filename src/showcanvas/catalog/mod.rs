//! # Catalog Layer
//!
//! The catalog is the remote show-management API. The library only needs one thing
//! from it: the list of shows visible to a signed-in user.
//!
//! - [`http::HttpCatalog`]: `GET {api_url}/api/shows` with a bearer token
//! - [`memory::InMemoryCatalog`]: fixed list of shows for tests
//!
//! Catalog errors are reported, never retried.

use crate::auth::BearerToken;
use crate::error::Result;
use crate::model::Show;

pub mod http;
pub mod memory;

pub trait Catalog {
    /// Fetch the user's shows, in the order the catalog lists them.
    fn fetch_shows(&self, token: &BearerToken) -> Result<Vec<Show>>;
}

impl<T: Catalog + ?Sized> Catalog for &T {
    fn fetch_shows(&self, token: &BearerToken) -> Result<Vec<Show>> {
        (**self).fetch_shows(token)
    }
}

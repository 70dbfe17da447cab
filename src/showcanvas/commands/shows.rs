use crate::auth::{BearerToken, CredentialProvider};
use crate::catalog::Catalog;
use crate::error::{Result, ShowCanvasError};
use crate::model::Show;
use tracing::debug;

/// The stored token, or `NotAuthenticated`.
pub fn require_token<P: CredentialProvider>(credentials: &P) -> Result<BearerToken> {
    credentials.token().ok_or(ShowCanvasError::NotAuthenticated)
}

/// Fetch the signed-in user's shows.
pub fn load<C: Catalog, P: CredentialProvider>(catalog: &C, credentials: &P) -> Result<Vec<Show>> {
    let token = require_token(credentials)?;
    let shows = catalog.fetch_shows(&token)?;
    debug!(count = shows.len(), "loaded shows");
    Ok(shows)
}

pub fn performer_count_label(count: usize) -> String {
    if count == 1 {
        "1 performer".to_string()
    } else {
        format!("{} performers", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryCredentials;
    use crate::catalog::memory::InMemoryCatalog;
    use crate::catalog::memory::fixtures::ShowFixture;

    #[test]
    fn needs_a_token() {
        let catalog = InMemoryCatalog::new(vec![ShowFixture::new("A").show]);
        let err = load(&catalog, &InMemoryCredentials::new()).unwrap_err();
        assert!(matches!(err, ShowCanvasError::NotAuthenticated));
        assert_eq!(catalog.fetch_count(), 0);
    }

    #[test]
    fn loads_with_a_token() {
        let catalog = InMemoryCatalog::new(vec![ShowFixture::new("A").show]).with_token("tok");
        let shows = load(&catalog, &InMemoryCredentials::signed_in("tok")).unwrap();
        assert_eq!(shows.len(), 1);
    }

    #[test]
    fn pluralizes_performers() {
        assert_eq!(performer_count_label(0), "0 performers");
        assert_eq!(performer_count_label(1), "1 performer");
        assert_eq!(performer_count_label(7), "7 performers");
    }
}

//! # Credentials
//!
//! Sign-in happens out of band: the user opens [`authorize_url`] in a browser, the
//! service hands back a token, and the client passes it to
//! [`CredentialProvider::store`]. From then on the provider returns it on demand.
//!
//! The session token is the only thing this crate persists.

use crate::error::{Result, ShowCanvasError};
use std::fmt;
use std::fs;
use std::path::PathBuf;

const TOKEN_FILENAME: &str = "session.token";
const AUTHORIZE_PATH: &str = "/auth/canva/authorize";

pub const SIGNUP_URL: &str = "https://dragvertising.com/signup";

pub fn authorize_url(api_url: &str) -> String {
    format!("{}{}", api_url.trim_end_matches('/'), AUTHORIZE_PATH)
}

/// Opaque bearer token for the catalog API.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

pub trait CredentialProvider {
    /// The current token, if the user has signed in.
    fn token(&self) -> Option<BearerToken>;

    fn store(&mut self, token: &BearerToken) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

/// Keeps the session token in a file under the user data directory.
pub struct FileCredentials {
    dir: PathBuf,
}

impl FileCredentials {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILENAME)
    }
}

impl CredentialProvider for FileCredentials {
    fn token(&self) -> Option<BearerToken> {
        let content = fs::read_to_string(self.token_path()).ok()?;
        let secret = content.trim();
        if secret.is_empty() {
            None
        } else {
            Some(BearerToken::new(secret))
        }
    }

    fn store(&mut self, token: &BearerToken) -> Result<()> {
        if token.secret().trim().is_empty() {
            return Err(ShowCanvasError::InvalidState("empty token".to_string()));
        }
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(ShowCanvasError::Io)?;
        }
        fs::write(self.token_path(), token.secret().trim()).map_err(ShowCanvasError::Io)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            fs::remove_file(path).map_err(ShowCanvasError::Io)?;
        }
        Ok(())
    }
}

/// Holds the token in memory only.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    token: Option<BearerToken>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(secret: &str) -> Self {
        Self {
            token: Some(BearerToken::new(secret)),
        }
    }
}

impl CredentialProvider for InMemoryCredentials {
    fn token(&self) -> Option<BearerToken> {
        self.token.clone()
    }

    fn store(&mut self, token: &BearerToken) -> Result<()> {
        self.token = Some(token.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn authorize_url_is_under_the_api() {
        assert_eq!(
            authorize_url("https://api.dragvertising.com/"),
            "https://api.dragvertising.com/auth/canva/authorize"
        );
    }

    #[test]
    fn debug_hides_the_secret() {
        let token = BearerToken::new("s3cret");
        assert!(!format!("{:?}", token).contains("s3cret"));
        assert_eq!(token.header_value(), "Bearer s3cret");
    }

    #[test]
    fn file_credentials_roundtrip_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut creds = FileCredentials::new(dir.path().join("data"));
        assert!(creds.token().is_none());

        creds.store(&BearerToken::new("abc123\n")).unwrap();
        assert_eq!(creds.token(), Some(BearerToken::new("abc123")));

        creds.clear().unwrap();
        assert!(creds.token().is_none());
        // clearing twice is fine
        creds.clear().unwrap();
    }

    #[test]
    fn refuses_blank_tokens() {
        let dir = TempDir::new().unwrap();
        let mut creds = FileCredentials::new(dir.path());
        assert!(creds.store(&BearerToken::new("   ")).is_err());
    }
}

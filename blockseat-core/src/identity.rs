use blockseat_shared::Masked;

use crate::{CoreError, CoreResult};

/// Bearer credential for backend calls. Never printed.
pub type AuthToken = Masked<String>;

/// Where a token is read from when the request itself carries none.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<AuthToken>;
}

/// Source that never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTokenSource;

impl TokenSource for NoTokenSource {
    fn token(&self) -> Option<AuthToken> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct StaticTokenSource(AuthToken);

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Masked::new(token.into()))
    }
}

impl TokenSource for StaticTokenSource {
    fn token(&self) -> Option<AuthToken> {
        Some(self.0.clone())
    }
}

/// Pick the credential for one request: the `authToken` cookie first, then
/// the `Authorization: Bearer` header, then the fallback store. Blank values
/// are skipped.
pub fn resolve_token(
    cookie: Option<&str>,
    bearer: Option<&str>,
    fallback: &dyn TokenSource,
) -> CoreResult<AuthToken> {
    let from_request = [cookie, bearer]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(|value| Masked::new(value.to_string()));

    from_request
        .or_else(|| fallback.token().filter(|t| !t.expose().trim().is_empty()))
        .ok_or(CoreError::MissingCredential)
}

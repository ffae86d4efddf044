use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use blockseat_core::{resolve_token, AuthToken};

use crate::{error::AppError, state::AppState};

const TOKEN_COOKIE: &str = "authToken";

/// Bearer token for the backend, taken from the `authToken` cookie, the
/// `Authorization` header or the local token store, in that order.
pub struct Credential(pub AuthToken);

impl FromRequestParts<AppState> for Credential {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(TOKEN_COOKIE).map(|c| c.value().to_string());
        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_string());

        let token = resolve_token(cookie.as_deref(), bearer.as_deref(), state.token_source.as_ref())?;
        Ok(Credential(token))
    }
}

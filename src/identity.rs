//! Client identity carried in the session cookie.

use crate::session::SessionId;
use axum::http::header::{COOKIE, InvalidHeaderValue, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use tracing::{debug, instrument};

/// The session a request belongs to.
#[derive(Debug, Clone)]
pub struct ClientSession {
    id: SessionId,
    issued: bool,
}

impl ClientSession {
    /// Resolves the session id from the `cookie_name` cookie, minting a new
    /// id when the cookie is missing or malformed.
    #[instrument(skip(headers))]
    pub fn resolve(headers: &HeaderMap, cookie_name: &str) -> Self {
        match find_cookie(headers, cookie_name).and_then(SessionId::parse) {
            Some(id) => {
                debug!(session_id = %id, "Existing session");
                Self { id, issued: false }
            }
            None => {
                let id = SessionId::generate();
                debug!(session_id = %id, "Issued new session");
                Self { id, issued: true }
            }
        }
    }

    /// The session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// True when the id was minted for this request.
    pub fn issued(&self) -> bool {
        self.issued
    }

    /// Adds `Set-Cookie` to `response` if the id was minted for this request.
    pub fn attach(
        &self,
        mut response: Response,
        cookie_name: &str,
    ) -> Result<Response, InvalidHeaderValue> {
        if self.issued {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                cookie_name, self.id
            );
            response
                .headers_mut()
                .append(SET_COOKIE, HeaderValue::from_str(&cookie)?);
        }
        Ok(response)
    }
}

fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}

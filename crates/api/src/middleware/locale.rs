//! Per-request locale extractor.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use latchkey_core::i18n::{Locale, LocaleSource};
use serde::Deserialize;

use crate::state::AppState;

/// Name of both the query parameter and the cookie carrying the locale.
pub const LANG_PARAM: &str = "lang";

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

/// Locale resolved for the current request.
///
/// Resolution looks at the `lang` query parameter, then the `lang` cookie,
/// then the configured default. Extraction never fails.
///
/// Returning it as a response part remembers an explicitly requested locale
/// in the `lang` cookie:
///
/// ```ignore
/// async fn my_handler(locale: RequestLocale) -> impl IntoResponse {
///     (locale, Json(locale.locale))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLocale {
    pub locale: Locale,
    pub source: LocaleSource,
}

impl RequestLocale {
    /// `Set-Cookie` value remembering the locale, when it was chosen
    /// explicitly on this request.
    pub fn remember_cookie(&self) -> Option<HeaderValue> {
        if self.source != LocaleSource::Explicit {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{LANG_PARAM}={}; Path=/; SameSite=Lax",
            self.locale
        ))
        .ok()
    }
}

impl FromRequestParts<AppState> for RequestLocale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let explicit = Query::<LangQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.lang);
        let preference = lang_cookie(&parts.headers);

        let resolution = state
            .locales
            .resolve(explicit.as_deref(), preference.as_deref());

        if explicit.is_some() && resolution.source != LocaleSource::Explicit {
            tracing::debug!(
                requested = explicit.as_deref(),
                resolved = %resolution.locale,
                "Ignoring unregistered locale parameter"
            );
        }

        Ok(Self {
            locale: resolution.locale,
            source: resolution.source,
        })
    }
}

impl IntoResponseParts for RequestLocale {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.remember_cookie() {
            res.headers_mut().append(SET_COOKIE, cookie);
        }
        Ok(res)
    }
}

/// Value of the `lang` cookie, if the request carries one.
fn lang_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LANG_PARAM)
        .map(|(_, value)| value.trim().to_string())
}

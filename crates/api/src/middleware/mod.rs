//! Request extractors shared by the handlers.
//!
//! - [`locale::RequestLocale`] -- Resolves the locale of the current request.

pub mod locale;

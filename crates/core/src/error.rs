#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown command '{0}'")]
    InvalidCommand(String),

    #[error("Locale '{locale}' is missing translation key '{key}'")]
    MissingTranslationKey { locale: String, key: String },

    #[error("Locale '{0}' is not registered")]
    UnknownLocale(String),
}

//! Error types shared across the crate.
//!
//! Missing markup is never an error: controllers treat an absent element as
//! a normal no-op. Errors are reserved for malformed input (selectors,
//! configuration) and layout failures.

pub type FxResult<T> = Result<T, FxError>;

#[derive(thiserror::Error, Debug)]
pub enum FxError {
    #[error("selector error: {0}")]
    Selector(String),

    #[error("layout error: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error("config error: {0}")]
    Config(String),

    #[error("unknown node: {0}")]
    UnknownNode(usize),

    #[error("hierarchy error: {0}")]
    Hierarchy(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl FxError {
    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(FxError::selector("x").to_string().contains("selector error:"));
        assert!(FxError::config("x").to_string().contains("config error:"));
        assert_eq!(FxError::UnknownNode(7).to_string(), "unknown node: 7");
    }

    #[test]
    fn json_errors_convert() {
        let err: FxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, FxError::Json(_)));
    }
}

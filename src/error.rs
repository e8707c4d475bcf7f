pub type TourResult<T> = Result<T, TourError>;

#[derive(thiserror::Error, Debug)]
pub enum TourError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("dom error: {0}")]
    Dom(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TourError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TourError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(TourError::parse("x").to_string().contains("parse error:"));
        assert!(TourError::dom("x").to_string().contains("dom error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TourError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}

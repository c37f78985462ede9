use crate::cookies::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("Invalid cookie: {0}")]
    InvalidCookie(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{add_cookie, CookieSpec};
    use crate::net::BufferedResponse;

    fn set_login_cookie(name: &str, response: &mut BufferedResponse) -> Result<(), WebError> {
        add_cookie(&CookieSpec::new(name, "1", 60), response)?;
        Ok(())
    }

    #[test]
    fn validation_errors_convert() {
        let mut response = BufferedResponse::new();
        let err = set_login_cookie("", &mut response).unwrap_err();
        assert!(matches!(err, WebError::InvalidCookie(ValidationError::MissingName)));
        assert_eq!(err.to_string(), "Invalid cookie: cookie name can't be null/empty");
    }
}

#[derive(Debug, Clone)]
pub struct ImageFxConfig {
    pub cookie: String,
    pub session_url: Option<String>,
    pub api_url: Option<String>,
}

impl ImageFxConfig {
    pub fn new(cookie: impl Into<String>) -> Self {
        ImageFxConfig {
            cookie: cookie.into(),
            session_url: None,
            api_url: None,
        }
    }

    pub fn with_session_url(mut self, url: impl Into<String>) -> Self {
        self.session_url = Some(url.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ImageFxConfig::new("SID=abc").with_api_url("http://localhost:8080/generate");
        assert_eq!(config.cookie, "SID=abc");
        assert_eq!(
            config.api_url.as_deref(),
            Some("http://localhost:8080/generate")
        );
        assert!(config.session_url.is_none());
    }
}

use url::Url;

use crate::EndpointError;

/// Base URL used when no `api` override is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const API_QUERY_PARAM: &str = "api";

/// Location of the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base: String,
}

impl Default for ServiceEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ServiceEndpoint {
    /// Use an explicit base URL. Only `http` and `https` bases without a
    /// query or fragment are accepted.
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        let trimmed = base.trim().trim_end_matches('/');
        let invalid = |reason: String| EndpointError::InvalidBaseUrl {
            value: base.to_string(),
            reason,
        };
        let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme '{}' is not http or https",
                url.scheme()
            )));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("base must not carry a query or fragment".to_string()));
        }
        Ok(Self {
            base: trimmed.to_string(),
        })
    }

    /// Resolve the base URL from the `api` query parameter of a launch URL.
    ///
    /// Accepts a full URL (`http://host/page?api=...`), a bare query string
    /// (`?api=...` or `api=...`), or nothing. A missing or empty parameter
    /// falls back to [`DEFAULT_BASE_URL`].
    pub fn from_launch(launch: Option<&str>) -> Result<Self, EndpointError> {
        let Some(launch) = launch.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let query = match Url::parse(launch) {
            Ok(url) => url.query().unwrap_or_default().to_string(),
            Err(_) => launch.trim_start_matches('?').to_string(),
        };

        let api = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == API_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.trim().is_empty());

        match api {
            Some(value) => Self::new(&value),
            None => Ok(Self::default()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn generate_url(&self) -> String {
        format!("{}/generate", self.base)
    }

    pub fn health_url(&self) -> String {
        format!("{}/healthz", self.base)
    }
}

use thiserror::Error;
use url::Url;

/// Base URL used when no server is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8089";

const API_PREFIX: [&str; 2] = ["api", "v1"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("invalid server url: {0}")]
    InvalidBase(#[from] url::ParseError),
    #[error("server url cannot carry a path: {0}")]
    CannotBeABase(String),
    #[error("unsupported server url scheme: {0}")]
    UnsupportedScheme(String),
}

/// Builds the conversion service URLs from a single base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(base: &str) -> Result<Self, EndpointError> {
        let parsed = Url::parse(base.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if parsed.cannot_be_a_base() {
            return Err(EndpointError::CannotBeABase(base.to_string()));
        }
        Ok(Self {
            base: parsed.to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `POST {base}/api/v1/convert?outputFileName={name}`
    pub fn convert_url(&self, output_name: &str) -> Result<Url, EndpointError> {
        let mut url = self.api_url(&["convert"])?;
        url.query_pairs_mut()
            .append_pair("outputFileName", output_name);
        Ok(url)
    }

    /// `GET {base}/api/v1/download/{file_name}`; the name is percent-encoded as
    /// a single path segment.
    pub fn download_url(&self, file_name: &str) -> Result<Url, EndpointError> {
        self.api_url(&["download", file_name])
    }

    /// `GET {base}/api/v1/files`
    pub fn files_url(&self) -> Result<Url, EndpointError> {
        self.api_url(&["files"])
    }

    fn api_url(&self, segments: &[&str]) -> Result<Url, EndpointError> {
        let mut url = Url::parse(&self.base)?;
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| EndpointError::CannotBeABase(self.base.clone()))?;
            path.pop_if_empty();
            path.extend(API_PREFIX);
            path.extend(segments);
        }
        Ok(url)
    }
}

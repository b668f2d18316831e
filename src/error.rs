use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Error requesting {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Content API returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Error decoding response from {url}: {desc}")]
    Decode {
        url: String,
        desc: String,
    },

    #[error("Content API at {0} has no master ref")]
    NoMasterRef(String),

    #[error("Unable to parse publication date {0}")]
    Date(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Drops the query string, which may carry the API access token.
pub fn redact_url(url: &str) -> String {
    match url.find('?') {
        Some(pos) => format!("{}?…", &url[..pos]),
        None => url.to_string(),
    }
}

impl FetchError {
    pub fn http(url: &str, source: reqwest::Error) -> Self {
        FetchError::Http {
            url: redact_url(url),
            source: source.without_url(),
        }
    }

    pub fn status(url: &str, status: reqwest::StatusCode) -> Self {
        FetchError::Status { url: redact_url(url), status }
    }

    pub fn decode(url: &str, desc: String) -> Self {
        FetchError::Decode { url: redact_url(url), desc }
    }
}

impl From<FetchError> for std::io::Error {
    fn from(value: FetchError) -> Self {
        std::io::Error::other(value)
    }
}

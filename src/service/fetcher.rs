use super::cache::BodyCache;
use bytesize::ByteSize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum FetchError {
    UnableToQuery {
        url: String,
        cause: String,
    },
    UnableToRead {
        url: String,
        cause: String,
    },
    BadStatus {
        url: String,
        status: u16,
    },
    TooLarge {
        url: String,
        size: ByteSize,
        limit: ByteSize,
    },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnableToQuery { url, cause } => write!(f, "unable to query {url:?}: {cause}"),
            Self::UnableToRead { url, cause } => write!(f, "unable to read {url:?}: {cause}"),
            Self::BadStatus { url, status } => write!(f, "{url:?} responded with status {status}"),
            Self::TooLarge { url, size, limit } => {
                write!(f, "{url:?} is {size}, more than the {limit} limit")
            }
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, serde::Deserialize)]
pub struct FetcherConfig {
    #[serde(default = "FetcherConfig::default_user_agent")]
    pub user_agent: String,
    /// Seconds.
    #[serde(default = "FetcherConfig::default_timeout")]
    pub timeout: u64,
    #[serde(default = "FetcherConfig::default_max_body_size")]
    pub max_body_size: ByteSize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: Self::default_user_agent(),
            timeout: Self::default_timeout(),
            max_body_size: Self::default_max_body_size(),
        }
    }
}

impl FetcherConfig {
    fn default_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    fn default_timeout() -> u64 {
        30
    }

    fn default_max_body_size() -> ByteSize {
        ByteSize::mb(8)
    }

    pub fn build(self, cache: BodyCache) -> Result<Fetcher, String> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(Duration::from_secs(self.timeout))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Fetcher {
            client,
            cache,
            max_body_size: self.max_body_size,
        })
    }
}

/// HTTP GET with a body size limit, answered from cache when possible.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    cache: BodyCache,
    max_body_size: ByteSize,
}

impl Fetcher {
    fn too_large(&self, url: &str, size: u64) -> FetchError {
        FetchError::TooLarge {
            url: url.to_string(),
            size: ByteSize::b(size),
            limit: self.max_body_size,
        }
    }

    pub async fn fetch(&self, url: &str) -> Result<Arc<[u8]>, FetchError> {
        if let Some(found) = self.cache.get(url) {
            tracing::debug!("cache hit for {url:?}");
            return Ok(found);
        }

        tracing::debug!("fetching {url:?}");
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::UnableToQuery {
                url: url.to_string(),
                cause: err.to_string(),
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if let Some(length) = res.content_length() {
            if length > self.max_body_size.as_u64() {
                return Err(self.too_large(url, length));
            }
        }

        let body = res.bytes().await.map_err(|err| FetchError::UnableToRead {
            url: url.to_string(),
            cause: err.to_string(),
        })?;
        if body.len() as u64 > self.max_body_size.as_u64() {
            return Err(self.too_large(url, body.len() as u64));
        }
        tracing::debug!("fetched {} from {url:?}", ByteSize::b(body.len() as u64));

        let body: Arc<[u8]> = Arc::from(body.as_ref());
        self.cache.insert(url.to_string(), body.clone()).await;
        Ok(body)
    }
}

#[cfg(test)]
pub fn build(max_body_size: ByteSize) -> Fetcher {
    FetcherConfig {
        max_body_size,
        ..Default::default()
    }
    .build(super::cache::build())
    .unwrap()
}

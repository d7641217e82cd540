use bytesize::ByteSize;
pub use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Fetched documents, keyed by URL.
pub type BodyCache = Cache<String, Arc<[u8]>>;

#[derive(Debug, serde::Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: ByteSize,
    #[serde(default = "CacheConfig::default_ttl")]
    pub ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            ttl: Self::default_ttl(),
        }
    }
}

impl CacheConfig {
    fn default_capacity() -> ByteSize {
        ByteSize::mb(32)
    }

    fn default_ttl() -> u64 {
        300
    }

    pub fn build(self) -> BodyCache {
        tracing::info!(
            "building body cache of {} with a ttl of {}s",
            self.capacity,
            self.ttl
        );
        Cache::builder()
            .weigher(|key: &String, value: &Arc<[u8]>| {
                u32::try_from(key.len() + value.len()).unwrap_or(u32::MAX)
            })
            .max_capacity(self.capacity.as_u64())
            .time_to_live(Duration::from_secs(self.ttl))
            .build()
    }
}

#[cfg(test)]
pub fn build() -> BodyCache {
    CacheConfig::default().build()
}

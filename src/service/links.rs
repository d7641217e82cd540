use super::fetcher::{FetchError, Fetcher};
use remote_helper_extractor_prelude::LinkSet;

#[derive(Clone)]
pub struct LinkService {
    fetcher: Fetcher,
}

impl LinkService {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    pub fn extract(&self, html: &str) -> LinkSet {
        remote_helper_extractor_links::extract(html)
    }

    /// Pages scanned for links are rarely labelled correctly, bytes that are
    /// not UTF-8 are replaced rather than rejected.
    pub async fn fetch(&self, url: &str) -> Result<LinkSet, FetchError> {
        let body = self.fetcher.fetch(url).await?;
        let html = String::from_utf8_lossy(&body);
        Ok(self.extract(html.as_ref()))
    }
}

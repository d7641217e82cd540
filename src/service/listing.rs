use super::fetcher::{FetchError, Fetcher};
use remote_helper_extractor_prelude::{ExtractorError, Page, PageEntry, SourceEncoding};
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub enum ServiceError {
    Fetch(FetchError),
    Extract(ExtractorError),
}

impl From<FetchError> for ServiceError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<ExtractorError> for ServiceError {
    fn from(value: ExtractorError) -> Self {
        Self::Extract(value)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(inner) => inner.fmt(f),
            Self::Extract(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for ServiceError {}

#[derive(Debug, serde::Deserialize)]
pub struct ListingConfig {
    #[serde(default = "ListingConfig::default_max_pages")]
    pub max_pages: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_pages: Self::default_max_pages(),
        }
    }
}

impl ListingConfig {
    fn default_max_pages() -> usize {
        10
    }
}

/// Entries gathered while following next page links.
///
/// `next_page_url` is where a later walk should resume, it is `None` once
/// the last page was reached.
#[derive(Clone, Debug, Default)]
pub struct ListingResult {
    pub entries: Vec<PageEntry>,
    pub next_page_url: Option<String>,
    pub pages: usize,
    pub errors: Vec<ServiceError>,
}

#[derive(Clone)]
pub struct ListingService {
    fetcher: Fetcher,
    max_pages: usize,
}

impl ListingService {
    pub fn new(fetcher: Fetcher, config: ListingConfig) -> Self {
        Self {
            fetcher,
            max_pages: config.max_pages,
        }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub async fn page(&self, url: &str, encoding: SourceEncoding) -> Result<Page, ServiceError> {
        let body = self.fetcher.fetch(url).await?;
        let page = remote_helper_extractor_listing::parse(&body, url, encoding)?;
        Ok(page)
    }

    pub async fn walk(
        &self,
        url: &str,
        encoding: SourceEncoding,
        max_pages: Option<usize>,
    ) -> ListingResult {
        let max_pages = max_pages.unwrap_or(self.max_pages).min(self.max_pages);
        let mut result = ListingResult::default();
        let mut visited = HashSet::new();
        let mut next = Some(url.to_string());

        while let Some(current) = next.take() {
            if result.pages >= max_pages {
                result.next_page_url = Some(current);
                break;
            }
            if !visited.insert(current.clone()) {
                tracing::warn!("pagination loops back to {current:?}");
                break;
            }
            match self.page(current.as_str(), encoding).await {
                Ok(page) => {
                    result.pages += 1;
                    next = page.next_page_url().map(String::from);
                    result.entries.extend(page.into_entries());
                }
                Err(error) => {
                    tracing::debug!("stopping pagination: {error}");
                    result.next_page_url = Some(current);
                    result.errors.push(error);
                    break;
                }
            }
        }

        tracing::debug!(
            "walked {} pages from {url:?}, found {} entries",
            result.pages,
            result.entries.len()
        );
        result
    }
}

#[cfg(test)]
pub fn build(max_pages: usize) -> ListingService {
    ListingService::new(
        super::fetcher::build(bytesize::ByteSize::mb(1)),
        ListingConfig { max_pages },
    )
}

#[cfg(test)]
pub fn listing_page(entries: &[(&str, &str)], next: Option<&str>) -> String {
    let rows: String = entries
        .iter()
        .map(|(title, href)| {
            format!(r#"<tr><td><a class="ulink" href="{href}">{title}</a></td></tr>"#)
        })
        .collect();
    let pagination = next
        .map(|href| format!(r#"<a href="{href}">下一页</a>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body><div class="co_content8"><table>{rows}</table></div><div class="x">{pagination}</div></body></html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_fetch_single_page() {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/list/p1.html")
            .with_status(200)
            .with_body(listing_page(&[("第1集", "/ep1.html")], Some("p2.html")))
            .create_async()
            .await;

        let service = build(10);
        let url = format!("{}/list/p1.html", server.url());
        let result = service.page(&url, SourceEncoding::Utf8).await.unwrap();
        assert_eq!(result.entries(), &[PageEntry::new("第1集", "/ep1.html")]);
        assert_eq!(
            result.next_page_url(),
            Some(format!("{}/list/p2.html", server.url()).as_str())
        );

        page.assert_async().await;
    }

    #[tokio::test]
    async fn should_report_decode_failure() {
        let mut server = mockito::Server::new_async().await;
        let page = server
            .mock("GET", "/gbk.html")
            .with_status(200)
            .with_body([0xCF, 0xC2, 0xD2, 0xBB, 0xD2, 0xB3])
            .create_async()
            .await;

        let service = build(10);
        let url = format!("{}/gbk.html", server.url());
        let err = service.page(&url, SourceEncoding::Utf8).await.unwrap_err();
        assert!(matches!(err, ServiceError::Extract(_)));

        page.assert_async().await;
    }

    #[tokio::test]
    async fn should_walk_until_last_page() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/list/p1.html")
            .with_status(200)
            .with_body(listing_page(&[("第1集", "/ep1.html")], Some("p2.html")))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/list/p2.html")
            .with_status(200)
            .with_body(listing_page(
                &[("第2集", "/ep2.html"), ("第3集", "/ep3.html")],
                Some("/list/p3.html"),
            ))
            .create_async()
            .await;
        let third = server
            .mock("GET", "/list/p3.html")
            .with_status(200)
            .with_body(listing_page(&[("第4集", "/ep4.html")], None))
            .create_async()
            .await;

        let service = build(10);
        let url = format!("{}/list/p1.html", server.url());
        let result = service.walk(&url, SourceEncoding::Utf8, None).await;
        assert_eq!(result.pages, 3);
        assert!(result.errors.is_empty());
        assert_eq!(result.next_page_url, None);
        let titles: Vec<&str> = result.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["第1集", "第2集", "第3集", "第4集"]);

        first.assert_async().await;
        second.assert_async().await;
        third.assert_async().await;
    }

    #[tokio::test]
    async fn should_stop_at_page_limit() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/list/p1.html")
            .with_status(200)
            .with_body(listing_page(&[("第1集", "/ep1.html")], Some("p2.html")))
            .create_async()
            .await;

        let service = build(10);
        let url = format!("{}/list/p1.html", server.url());
        let result = service.walk(&url, SourceEncoding::Utf8, Some(1)).await;
        assert_eq!(result.pages, 1);
        assert_eq!(
            result.next_page_url,
            Some(format!("{}/list/p2.html", server.url()))
        );

        first.assert_async().await;
    }

    #[tokio::test]
    async fn should_stop_on_loop() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/list/p1.html")
            .with_status(200)
            .with_body(listing_page(&[("第1集", "/ep1.html")], Some("p2.html")))
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/list/p2.html")
            .with_status(200)
            .with_body(listing_page(&[("第2集", "/ep2.html")], Some("p1.html")))
            .expect(1)
            .create_async()
            .await;

        let service = build(10);
        let url = format!("{}/list/p1.html", server.url());
        let result = service.walk(&url, SourceEncoding::Utf8, None).await;
        assert_eq!(result.pages, 2);
        assert_eq!(result.entries.len(), 2);
        assert_eq!(result.next_page_url, None);

        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn should_keep_partial_result_on_error() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/list/p1.html")
            .with_status(200)
            .with_body(listing_page(&[("第1集", "/ep1.html")], Some("p2.html")))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/list/p2.html")
            .with_status(500)
            .create_async()
            .await;

        let service = build(10);
        let url = format!("{}/list/p1.html", server.url());
        let result = service.walk(&url, SourceEncoding::Utf8, None).await;
        assert_eq!(result.pages, 1);
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.next_page_url,
            Some(format!("{}/list/p2.html", server.url()))
        );

        first.assert_async().await;
        second.assert_async().await;
    }
}

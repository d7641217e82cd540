use remote_helper_extractor_prelude::LinkKind;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub enum DispatchError {
    UnsupportedLink { link: String },
    NoDownloader { kind: LinkKind },
    UnableToQuery { agent: &'static str, cause: String },
    Rejected { agent: &'static str, reason: String },
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLink { link } => write!(f, "{link:?} is not a downloadable link"),
            Self::NoDownloader { kind } => write!(f, "no downloader configured for {kind} links"),
            Self::UnableToQuery { agent, cause } => write!(f, "unable to reach {agent}: {cause}"),
            Self::Rejected { agent, reason } => write!(f, "{agent} rejected the link: {reason}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// External agent able to start a download from a link.
#[async_trait::async_trait]
pub trait Downloader {
    fn name(&self) -> &'static str;
    fn accepts(&self, kind: LinkKind) -> bool;
    async fn add(&self, link: &str) -> Result<(), DispatchError>;
}

#[derive(Clone, Default)]
pub struct DownloadManager(Arc<DownloadManagerInner>);

#[derive(Default)]
struct DownloadManagerInner {
    downloaders: Vec<Box<dyn Downloader + Send + Sync + 'static>>,
}

impl DownloadManager {
    pub fn with_downloader<D: Downloader + Send + Sync + 'static>(downloader: D) -> Self {
        Self(Arc::new(DownloadManagerInner {
            downloaders: vec![Box::new(downloader)],
        }))
    }

    /// Hands `link` to the first downloader accepting its scheme and
    /// returns that downloader's name.
    pub async fn dispatch(&self, link: &str) -> Result<&'static str, DispatchError> {
        let kind = LinkKind::detect(link).ok_or_else(|| DispatchError::UnsupportedLink {
            link: link.to_string(),
        })?;
        let downloader = self
            .0
            .downloaders
            .iter()
            .find(|item| item.accepts(kind))
            .ok_or(DispatchError::NoDownloader { kind })?;
        tracing::debug!("sending {kind} link to {}", downloader.name());
        downloader.add(link).await?;
        Ok(downloader.name())
    }
}

use remote_helper_site_manager::SiteManager;

pub mod cache;
pub mod download;
pub mod fetcher;
pub mod links;
pub mod listing;
pub mod transmission;

#[derive(Clone)]
pub struct AppState {
    pub listing: listing::ListingService,
    pub links: links::LinkService,
    pub sites: SiteManager,
    pub downloads: download::DownloadManager,
}

impl AppState {
    pub async fn from_config(config: crate::config::Config) -> Result<Self, String> {
        let fetcher = config.fetcher.build(config.cache.build())?;
        let sites = config.sites.build().await.map_err(|err| err.to_string())?;
        let downloads = match config.transmission {
            Some(inner) => download::DownloadManager::with_downloader(inner.build()),
            None => {
                tracing::info!("no downloader configured");
                download::DownloadManager::default()
            }
        };

        Ok(Self {
            listing: listing::ListingService::new(fetcher.clone(), config.listing),
            links: links::LinkService::new(fetcher),
            sites,
            downloads,
        })
    }
}

#[cfg(test)]
pub async fn build() -> AppState {
    AppState::from_config(crate::config::Config::default())
        .await
        .unwrap()
}

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ResourceSite {
    pub link: String,
    pub display_order: i64,
}

#[derive(Debug)]
pub enum SiteError {
    InvalidLink {
        link: String,
        cause: url::ParseError,
    },
    NotFound {
        index: usize,
        len: usize,
    },
    UnableToLoad {
        path: PathBuf,
        cause: String,
    },
    UnableToSave {
        path: PathBuf,
        cause: String,
    },
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLink { link, cause } => write!(f, "invalid link {link:?}: {cause}"),
            Self::NotFound { index, len } => {
                write!(f, "no site at index {index}, {len} sites available")
            }
            Self::UnableToLoad { path, cause } => {
                write!(f, "unable to load sites from {path:?}: {cause}")
            }
            Self::UnableToSave { path, cause } => {
                write!(f, "unable to save sites to {path:?}: {cause}")
            }
        }
    }
}

impl std::error::Error for SiteError {}

fn validate(link: &str) -> Result<(), SiteError> {
    Url::parse(link)
        .map(|_| ())
        .map_err(|cause| SiteError::InvalidLink {
            link: link.to_string(),
            cause,
        })
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct SiteFile {
    #[serde(default)]
    sites: Vec<ResourceSite>,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct SiteManagerConfig {
    /// Sites used when nothing was persisted yet.
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SiteManagerConfig {
    fn seed(links: Vec<String>) -> Vec<ResourceSite> {
        links
            .into_iter()
            .filter(|link| match validate(link) {
                Ok(_) => true,
                Err(error) => {
                    tracing::warn!("dropping configured site: {error}");
                    false
                }
            })
            .map(|link| ResourceSite {
                link,
                display_order: 0,
            })
            .collect()
    }

    async fn load(path: &PathBuf) -> Result<Option<Vec<ResourceSite>>, SiteError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(value) => value,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SiteError::UnableToLoad {
                    path: path.clone(),
                    cause: err.to_string(),
                })
            }
        };
        let mut file: SiteFile =
            toml::from_str(content.as_str()).map_err(|err| SiteError::UnableToLoad {
                path: path.clone(),
                cause: err.to_string(),
            })?;
        file.sites.sort_by_key(|site| site.display_order);
        Ok(Some(file.sites))
    }

    pub async fn build(self) -> Result<SiteManager, SiteError> {
        let sites = match self.path.as_ref() {
            Some(path) => match Self::load(path).await? {
                Some(found) => {
                    tracing::info!("loaded {} sites from {path:?}", found.len());
                    found
                }
                None => Self::seed(self.links),
            },
            None => Self::seed(self.links),
        };

        let mut inner = SiteManagerInner {
            sites: RwLock::new(Vec::new()),
            path: self.path,
        };
        inner.sites = RwLock::new(inner.commit(sites).await?);
        Ok(SiteManager(Arc::new(inner)))
    }
}

/// Ordered list of the sites the user browses.
///
/// Every mutation renumbers `display_order` from the list position and,
/// when a path is configured, writes the whole list back to disk. The
/// list in memory only changes once that write succeeded.
#[derive(Clone, Debug, Default)]
pub struct SiteManager(Arc<SiteManagerInner>);

#[derive(Debug, Default)]
struct SiteManagerInner {
    sites: RwLock<Vec<ResourceSite>>,
    path: Option<PathBuf>,
}

impl SiteManagerInner {
    async fn commit(
        &self,
        mut sites: Vec<ResourceSite>,
    ) -> Result<Vec<ResourceSite>, SiteError> {
        sites.iter_mut().enumerate().for_each(|(index, site)| {
            site.display_order = index as i64;
        });

        let Some(path) = self.path.as_ref() else {
            return Ok(sites);
        };
        let file = SiteFile { sites };
        let content = toml::to_string(&file).map_err(|err| SiteError::UnableToSave {
            path: path.clone(),
            cause: err.to_string(),
        })?;
        tokio::fs::write(path, content)
            .await
            .map_err(|err| SiteError::UnableToSave {
                path: path.clone(),
                cause: err.to_string(),
            })?;
        tracing::debug!("saved {} sites to {path:?}", file.sites.len());
        Ok(file.sites)
    }
}

impl SiteManager {
    pub async fn list(&self) -> Vec<ResourceSite> {
        self.0.sites.read().await.clone()
    }

    pub async fn add(&self, link: &str) -> Result<ResourceSite, SiteError> {
        validate(link)?;
        let mut sites = self.0.sites.write().await;
        let mut next = sites.clone();
        next.push(ResourceSite {
            link: link.to_string(),
            display_order: 0,
        });
        *sites = self.0.commit(next).await?;
        tracing::debug!("added site {link:?}");
        Ok(sites[sites.len() - 1].clone())
    }

    /// Inserts the valid links at `index`, the others are dropped.
    pub async fn import(&self, index: usize, links: Vec<String>) -> Result<usize, SiteError> {
        let mut sites = self.0.sites.write().await;
        let index = index.min(sites.len());
        let inserted: Vec<ResourceSite> = links
            .into_iter()
            .filter(|link| match validate(link) {
                Ok(_) => true,
                Err(error) => {
                    tracing::debug!("skipping imported link: {error}");
                    false
                }
            })
            .map(|link| ResourceSite {
                link,
                display_order: 0,
            })
            .collect();
        let count = inserted.len();
        let mut next = sites.clone();
        next.splice(index..index, inserted);
        *sites = self.0.commit(next).await?;
        Ok(count)
    }

    pub async fn remove(&self, index: usize) -> Result<ResourceSite, SiteError> {
        let mut sites = self.0.sites.write().await;
        if index >= sites.len() {
            return Err(SiteError::NotFound {
                index,
                len: sites.len(),
            });
        }
        let mut next = sites.clone();
        let removed = next.remove(index);
        *sites = self.0.commit(next).await?;
        tracing::debug!("removed site {:?}", removed.link);
        Ok(removed)
    }

    pub async fn reorder(&self, from: usize, to: usize) -> Result<(), SiteError> {
        let mut sites = self.0.sites.write().await;
        let len = sites.len();
        if from >= len || to >= len {
            return Err(SiteError::NotFound {
                index: from.max(to),
                len,
            });
        }
        let mut next = sites.clone();
        let site = next.remove(from);
        next.insert(to, site);
        *sites = self.0.commit(next).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(sites: &[ResourceSite]) -> Vec<(&str, i64)> {
        sites
            .iter()
            .map(|site| (site.link.as_str(), site.display_order))
            .collect()
    }

    async fn manager(seed: &[&str]) -> SiteManager {
        SiteManagerConfig {
            links: seed.iter().map(|link| link.to_string()).collect(),
            path: None,
        }
        .build()
        .await
        .unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "remote-helper-{name}-{}.toml",
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn should_seed_valid_links_only() {
        let manager = manager(&["http://a.example.com", "nope", "http://b.example.com"]).await;
        assert_eq!(
            links(&manager.list().await),
            vec![("http://a.example.com", 0), ("http://b.example.com", 1)]
        );
    }

    #[tokio::test]
    async fn should_add_and_reject() {
        let manager = manager(&[]).await;
        let site = manager.add("http://www.example.com/list/").await.unwrap();
        assert_eq!(site.display_order, 0);
        let site = manager.add("http://www.example.org/").await.unwrap();
        assert_eq!(site.display_order, 1);
        assert!(matches!(
            manager.add("www.example.org").await.unwrap_err(),
            SiteError::InvalidLink { .. }
        ));
        assert_eq!(manager.list().await.len(), 2);
    }

    #[tokio::test]
    async fn should_import_at_position() {
        let manager = manager(&["http://a.example.com", "http://d.example.com"]).await;
        let count = manager
            .import(
                1,
                vec![
                    "http://b.example.com".into(),
                    "not a link".into(),
                    "http://c.example.com".into(),
                ],
            )
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            links(&manager.list().await),
            vec![
                ("http://a.example.com", 0),
                ("http://b.example.com", 1),
                ("http://c.example.com", 2),
                ("http://d.example.com", 3),
            ]
        );

        manager
            .import(42, vec!["http://e.example.com".into()])
            .await
            .unwrap();
        assert_eq!(manager.list().await[4].link, "http://e.example.com");
    }

    #[tokio::test]
    async fn should_remove_and_renumber() {
        let manager = manager(&["http://a.example.com", "http://b.example.com"]).await;
        let removed = manager.remove(0).await.unwrap();
        assert_eq!(removed.link, "http://a.example.com");
        assert_eq!(links(&manager.list().await), vec![("http://b.example.com", 0)]);
        assert!(matches!(
            manager.remove(1).await.unwrap_err(),
            SiteError::NotFound { index: 1, len: 1 }
        ));
    }

    #[tokio::test]
    async fn should_reorder() {
        let manager = manager(&[
            "http://a.example.com",
            "http://b.example.com",
            "http://c.example.com",
        ])
        .await;
        manager.reorder(2, 0).await.unwrap();
        assert_eq!(
            links(&manager.list().await),
            vec![
                ("http://c.example.com", 0),
                ("http://a.example.com", 1),
                ("http://b.example.com", 2),
            ]
        );
        assert!(manager.reorder(0, 3).await.is_err());
    }

    #[tokio::test]
    async fn should_persist_between_builds() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let manager = SiteManagerConfig {
            links: vec!["http://a.example.com".into()],
            path: Some(path.clone()),
        }
        .build()
        .await
        .unwrap();
        manager.add("http://b.example.com").await.unwrap();
        manager.reorder(1, 0).await.unwrap();

        let reloaded = SiteManagerConfig {
            links: vec!["http://ignored.example.com".into()],
            path: Some(path.clone()),
        }
        .build()
        .await
        .unwrap();
        assert_eq!(
            links(&reloaded.list().await),
            vec![("http://b.example.com", 0), ("http://a.example.com", 1)]
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn should_keep_list_when_save_fails() {
        let path = temp_path("unwritable");
        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&path);

        let manager = SiteManagerConfig {
            links: vec!["http://a.example.com".into(), "http://b.example.com".into()],
            path: Some(path.clone()),
        }
        .build()
        .await
        .unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            manager.add("http://c.example.com").await.unwrap_err(),
            SiteError::UnableToSave { .. }
        ));
        assert!(manager
            .import(0, vec!["http://c.example.com".into()])
            .await
            .is_err());
        assert!(manager.remove(0).await.is_err());
        assert!(manager.reorder(1, 0).await.is_err());
        assert_eq!(
            links(&manager.list().await),
            vec![("http://a.example.com", 0), ("http://b.example.com", 1)]
        );

        let _ = std::fs::remove_dir(&path);
    }

    #[tokio::test]
    async fn should_fail_on_broken_file() {
        let path = temp_path("broken");
        std::fs::write(&path, "sites = 42").unwrap();

        let result = SiteManagerConfig {
            links: Vec::new(),
            path: Some(path.clone()),
        }
        .build()
        .await;
        assert!(matches!(result, Err(SiteError::UnableToLoad { .. })));

        let _ = std::fs::remove_file(&path);
    }
}

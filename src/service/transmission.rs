use super::download::{DispatchError, Downloader};
use remote_helper_extractor_prelude::LinkKind;
use tokio::sync::RwLock;

pub const NAME: &str = "transmission";
const SESSION_HEADER: &str = "X-Transmission-Session-Id";

#[derive(Debug, serde::Deserialize)]
pub struct TransmissionConfig {
    #[serde(default = "TransmissionConfig::default_url")]
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TransmissionConfig {
    fn default_url() -> String {
        "http://127.0.0.1:9091/transmission/rpc".into()
    }

    pub fn build(self) -> Transmission {
        tracing::info!("building {NAME} downloader for {:?}", self.url);
        Transmission {
            client: reqwest::Client::new(),
            url: self.url,
            username: self.username,
            password: self.password,
            session: RwLock::new(None),
        }
    }
}

#[derive(serde::Serialize)]
struct Request<'a> {
    method: &'static str,
    arguments: AddArguments<'a>,
}

#[derive(serde::Serialize)]
struct AddArguments<'a> {
    filename: &'a str,
}

#[derive(serde::Deserialize)]
struct Response {
    result: String,
}

/// Transmission RPC client, limited to `torrent-add`.
///
/// The daemon answers 409 with a fresh session id until the request
/// carries it, the id is kept for the following calls.
pub struct Transmission {
    client: reqwest::Client,
    url: String,
    username: Option<String>,
    password: Option<String>,
    session: RwLock<Option<String>>,
}

impl Transmission {
    async fn send(
        &self,
        body: &Request<'_>,
        session: Option<&str>,
    ) -> Result<reqwest::Response, DispatchError> {
        let mut req = self.client.post(self.url.as_str()).json(body);
        if let Some(id) = session {
            req = req.header(SESSION_HEADER, id);
        }
        if let Some(username) = self.username.as_ref() {
            req = req.basic_auth(username, self.password.as_ref());
        }
        req.send().await.map_err(|err| DispatchError::UnableToQuery {
            agent: NAME,
            cause: err.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl Downloader for Transmission {
    fn name(&self) -> &'static str {
        NAME
    }

    fn accepts(&self, kind: LinkKind) -> bool {
        kind == LinkKind::Magnet
    }

    async fn add(&self, link: &str) -> Result<(), DispatchError> {
        let body = Request {
            method: "torrent-add",
            arguments: AddArguments { filename: link },
        };

        let session = self.session.read().await.clone();
        let mut res = self.send(&body, session.as_deref()).await?;
        if res.status() == reqwest::StatusCode::CONFLICT {
            let id = res
                .headers()
                .get(SESSION_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
                .ok_or_else(|| DispatchError::Rejected {
                    agent: NAME,
                    reason: "conflict without session id".into(),
                })?;
            tracing::debug!("renewing {NAME} session");
            *self.session.write().await = Some(id.clone());
            res = self.send(&body, Some(id.as_str())).await?;
        }

        let status = res.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected {
                agent: NAME,
                reason: format!("status {status}"),
            });
        }
        let payload: Response = res.json().await.map_err(|err| DispatchError::UnableToQuery {
            agent: NAME,
            cause: err.to_string(),
        })?;
        if payload.result != "success" {
            return Err(DispatchError::Rejected {
                agent: NAME,
                reason: payload.result,
            });
        }
        tracing::info!("{NAME} accepted {link:?}");
        Ok(())
    }
}

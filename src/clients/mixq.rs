use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::clients::{
    entities::{ControlAction, CurrentTrack, Track},
    errors::{Error, Result},
};

/// Address the MixQ server listens on when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8085";
/// Environment variable holding the server address.
pub const SERVER_URL_ENV: &str = "MIXQ_SERVER_URL";

#[derive(Serialize, Debug)]
struct LoadPlaylistRequest<'a> {
    playlist: &'a str,
}

#[derive(Deserialize, Debug)]
struct LoadPlaylistResponse {
    #[serde(default)]
    queue: Vec<Track>,
}

#[derive(Serialize, Debug)]
struct ControlRequest {
    action: ControlAction,
}

#[derive(Serialize, Debug)]
struct PlaySpecificRequest<'a> {
    track_id: &'a str,
}

/// Outcome of `POST /play_specific`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CurrentTrackResponse {
    #[serde(default)]
    details: CurrentTrack,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<String>,
}

/// JSON client for the four MixQ player endpoints.
#[derive(Clone, Debug)]
pub struct MixqClient {
    http: reqwest::Client,
    base_url: String,
}

impl MixqClient {
    /// Client for the server at `base_url`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mixq/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::ConfigurationError("MixQ server URL is empty".into()));
        }
        Ok(Self { http, base_url })
    }

    // Create a client from MIXQ_SERVER_URL, falling back to the local default
    pub fn try_default() -> Result<Self> {
        let base_url = match std::env::var(SERVER_URL_ENV) {
            Ok(url) => url,
            Err(std::env::VarError::NotPresent) => DEFAULT_SERVER_URL.to_string(),
            Err(e) => return Err(Error::from(e)),
        };
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::server_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn server_error(status: StatusCode, body: &str) -> Error {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            });
        Error::ServerError {
            status: status.as_u16(),
            message,
        }
    }

    /// Ask the server for every track of `playlist`.
    pub async fn load_playlist(&self, playlist: &str) -> Result<Vec<Track>> {
        debug!("Loading playlist {playlist:?}");
        let response = self
            .http
            .post(self.url("/load_playlist"))
            .json(&LoadPlaylistRequest { playlist })
            .send()
            .await?;
        let data: LoadPlaylistResponse = Self::read_json(response).await?;
        debug!("Server returned {} tracks for {playlist:?}", data.queue.len());
        Ok(data.queue)
    }

    /// Send a transport action. The response body carries nothing we use.
    pub async fn control(&self, action: ControlAction) -> Result<()> {
        debug!("Sending control action {:?}", action.as_str());
        let response = self
            .http
            .post(self.url("/control"))
            .json(&ControlRequest { action })
            .send()
            .await?;
        let _: serde_json::Value = Self::read_json(response).await?;
        Ok(())
    }

    /// Start a specific track on the player. A `success: false` body is
    /// returned as is, only transport and HTTP failures are errors.
    pub async fn play_specific(&self, track_id: &str) -> Result<PlayResult> {
        debug!("Requesting playback of track {track_id}");
        let response = self
            .http
            .post(self.url("/play_specific"))
            .json(&PlaySpecificRequest { track_id })
            .send()
            .await?;
        Self::read_json(response).await
    }

    pub async fn current_track(&self) -> Result<CurrentTrack> {
        let response = self.http.get(self.url("/current_track")).send().await?;
        let data: CurrentTrackResponse = Self::read_json(response).await?;
        Ok(data.details)
    }
}

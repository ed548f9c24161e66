use crate::models::{CreateTripRequest, Trip};
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error};

/// Any way a round trip to the trip service can go wrong.
///
/// Views treat every variant the same; the variants only keep the cause for logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid trip service url: {0}")]
    Url(String),
    #[error("trip service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("trip service answered {0}")]
    Status(StatusCode),
    #[error("trip service sent an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Thin wrapper over the trip service. One request per call, no retries, no caching.
#[derive(Clone)]
pub struct TripClient {
    inner: reqwest::Client,
    base: Url,
}

impl TripClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self { inner, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn create_trip(&self, payload: &CreateTripRequest) -> Result<Trip, FetchError> {
        let url = self.endpoint("trips/")?;
        debug!(%url, "creating trip");
        let response = self
            .inner
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(FetchError::Transport)?;
        decode(response).await
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, FetchError> {
        let url = self.endpoint("trips/")?;
        debug!(%url, "listing trips");
        let response = self.inner.get(url).send().await.map_err(FetchError::Transport)?;
        decode(response).await
    }

    pub async fn get_trip(&self, id: &str) -> Result<Trip, FetchError> {
        if !is_safe_trip_id(id) {
            return Err(FetchError::Url(format!("unusable trip id {id:?}")));
        }
        let url = self.endpoint(&format!("trips/{id}/"))?;
        debug!(%url, "fetching trip");
        let response = self.inner.get(url).send().await.map_err(FetchError::Transport)?;
        decode(response).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::Url(format!("{path}: {err}")))
    }
}

/// Ids are placed in URL paths, so only plain tokens are allowed.
pub fn is_safe_trip_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    if !status.is_success() {
        error!(%status, url = %response.url(), "trip service rejected request");
        return Err(FetchError::Status(status));
    }
    response.json().await.map_err(FetchError::Decode)
}

//! The scoring server session client.
//!
//! [`SimulationClient`] wraps one `reqwest::Client` and the session token
//! returned by `/start`. Every later request carries the token in the
//! `X-Auth-Token` header. The client also implements
//! [`Transport`], so it can be handed straight to
//! [`run_simulation`](lift_core::runner::run_simulation).

use lift_core::runner::Transport;
use lift_types::{ActionRequest, Command, SessionResponse, Snapshot};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::LiftClientConfig;
use crate::error::ClientError;

/// Header carrying the session token.
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// HTTP session against the scoring server.
#[derive(Debug, Clone)]
pub struct SimulationClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl SimulationClient {
    /// Build a client from its configuration. No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &LiftClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_owned(),
            token: None,
        })
    }

    /// The session token, once [`start`](Self::start) has succeeded.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Open a session for `user` on `problem` with `elevator_count` cars.
    ///
    /// The returned token is kept for every later call.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the request fails, the server answers
    /// with an error status, or the body cannot be decoded.
    pub async fn start(
        &mut self,
        user: &str,
        problem: u32,
        elevator_count: usize,
    ) -> Result<SessionResponse, ClientError> {
        const ENDPOINT: &str = "/start";
        let url = format!("{}/start/{user}/{problem}/{elevator_count}", self.api_url);
        debug!(url = %url, "Starting session");

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        let session: SessionResponse = decode(ENDPOINT, response).await?;

        info!(
            user,
            problem,
            elevators = session.elevators.len(),
            timestamp = session.timestamp,
            is_end = session.is_end,
            "Session started"
        );
        self.token = Some(session.token.clone());
        Ok(session)
    }

    /// Fetch the current tick's world state.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotStarted`] before a session exists, or any
    /// request, status or decode failure.
    pub async fn on_calls(&self) -> Result<Snapshot, ClientError> {
        const ENDPOINT: &str = "/oncalls";
        let token = self.token.as_deref().ok_or(ClientError::NotStarted)?;

        let response = self
            .client
            .get(format!("{}/oncalls", self.api_url))
            .header(AUTH_HEADER, token)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        decode(ENDPOINT, response).await
    }

    /// Submit one tick's commands.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotStarted`] before a session exists, or any
    /// request, status or decode failure.
    pub async fn action(&self, request: &ActionRequest) -> Result<SessionResponse, ClientError> {
        const ENDPOINT: &str = "/action";
        let token = self.token.as_deref().ok_or(ClientError::NotStarted)?;

        let response = self
            .client
            .post(format!("{}/action", self.api_url))
            .header(AUTH_HEADER, token)
            .json(request)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                endpoint: ENDPOINT,
                source,
            })?;
        decode(ENDPOINT, response).await
    }
}

impl Transport for SimulationClient {
    type Error = ClientError;

    async fn fetch(&mut self) -> Result<Snapshot, ClientError> {
        self.on_calls().await
    }

    async fn submit(&mut self, commands: &[Command]) -> Result<bool, ClientError> {
        let request = ActionRequest {
            commands: commands.to_vec(),
        };
        let response = self.action(&request).await?;
        Ok(response.is_end)
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(ClientError::Status {
            endpoint,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| ClientError::Decode { endpoint, source })
}

use std::future::Future;

use reqwest::{header::CONTENT_TYPE, Client};

use crate::config::Credentials;
use crate::error::TransportError;
use crate::plan::PlannedCall;

use super::models::{CallResult, TlsMode};

/// Performs a single attempt of a planned call.
///
/// Any HTTP response, error statuses included, is a `CallResult`; only a
/// failure to obtain a response is a `TransportError`.
pub trait RequestExecutor {
    fn execute(
        &self,
        request: &PlannedCall,
    ) -> impl Future<Output = Result<CallResult, TransportError>>;
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    credentials: Credentials,
    tls: TlsMode,
}

impl HttpExecutor {
    pub fn new(credentials: Credentials, tls: TlsMode) -> Self {
        Self { credentials, tls }
    }

    fn client_for(&self, request: &PlannedCall) -> reqwest::Result<Client> {
        let timeout = request.call.client_conf.request_timeout;
        let insecure = self.tls == TlsMode::Insecure;

        Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .danger_accept_invalid_certs(insecure)
            .danger_accept_invalid_hostnames(insecure)
            .build()
    }
}

impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &PlannedCall) -> Result<CallResult, TransportError> {
        let transport = |e: reqwest::Error| TransportError::new(request.url.as_str(), e);

        let client = self.client_for(request).map_err(transport)?;
        let response = client
            .put(request.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .body(request.call.payload.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;

        Ok(CallResult { status, body })
    }
}

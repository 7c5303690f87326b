//! HTTP plumbing shared by the provider backends.

use medibot_application::ProviderError;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while constructing a backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Client with a per-request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client, BackendError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Send `request` and decode a JSON body, mapping failures to [`ProviderError`]
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(map_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::from_status(status.as_u16()));
    }

    response.json::<T>().await.map_err(map_reqwest_error)
}

fn map_reqwest_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_decode() {
        ProviderError::Unknown(format!("invalid response body: {}", e))
    } else {
        ProviderError::Unknown(e.without_url().to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Local stub servers for backend tests.

    use axum::Router;

    /// Serve `app` on an ephemeral port and return its base URL
    pub async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

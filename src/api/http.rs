//! Browser HTTP transport
//!
//! `gloo-net` backed implementation of [`ResourceClient`]. Outside wasm32 every
//! call fails with [`ApiError::Unsupported`]; tests use a scripted client.

use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use super::ResourceClient;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClient;

impl HttpClient {
    pub const fn new() -> Self {
        Self
    }
}

impl ResourceClient for HttpClient {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, ApiResult<Value>> {
        async move {
            #[cfg(target_arch = "wasm32")]
            {
                let response = transport::send(gloo_net::http::Request::get(url), None, url).await?;
                transport::read_json(response).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = url;
                Err(ApiError::Unsupported)
            }
        }
        .boxed_local()
    }

    fn post<'a>(&'a self, url: &'a str, body: Value) -> LocalBoxFuture<'a, ApiResult<Value>> {
        async move {
            #[cfg(target_arch = "wasm32")]
            {
                let response =
                    transport::send(gloo_net::http::Request::post(url), Some(&body), url).await?;
                transport::read_json(response).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (url, body);
                Err(ApiError::Unsupported)
            }
        }
        .boxed_local()
    }

    fn patch<'a>(&'a self, url: &'a str, body: Value) -> LocalBoxFuture<'a, ApiResult<Value>> {
        async move {
            #[cfg(target_arch = "wasm32")]
            {
                let response =
                    transport::send(gloo_net::http::Request::patch(url), Some(&body), url).await?;
                transport::read_json(response).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (url, body);
                Err(ApiError::Unsupported)
            }
        }
        .boxed_local()
    }

    fn delete<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, ApiResult<()>> {
        async move {
            #[cfg(target_arch = "wasm32")]
            {
                // Body, if any, carries nothing we use
                transport::send(gloo_net::http::Request::delete(url), None, url).await?;
                Ok(())
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = url;
                Err(ApiError::Unsupported)
            }
        }
        .boxed_local()
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) mod transport {
    use gloo_net::http::{RequestBuilder, Response};
    use serde_json::Value;

    use crate::error::{ApiError, ApiResult};

    /// Send a request, mapping transport failures and non-2xx statuses
    pub async fn send(
        builder: RequestBuilder,
        body: Option<&Value>,
        url: &str,
    ) -> ApiResult<Response> {
        let sent = match body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| ApiError::Encode(e.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(ApiError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    pub async fn read_json(response: Response) -> ApiResult<Value> {
        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

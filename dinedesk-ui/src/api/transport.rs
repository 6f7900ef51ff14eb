//! gloo-net Transport

use async_trait::async_trait;
use dinedesk::client::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use gloo_net::http::{Request, RequestBuilder};

/// Sends requests with the browser's `fetch`
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = match request.body {
            Some(body) => builder
                .body(body)
                .map_err(|e| TransportError::Network(format!("Request build error: {}", e)))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

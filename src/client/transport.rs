//! HTTP Transport Abstraction
//!
//! The client builds requests; a transport ships them. The browser build uses
//! `gloo-net`, the CLI uses `reqwest`, tests use an in-memory fake.

use async_trait::async_trait;

use super::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. Single-threaded: futures need not be `Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use std::time::Duration;

    /// `reqwest`-backed transport for native builds
    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok(Self { client })
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Patch => reqwest::Method::PATCH,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(map_reqwest_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(map_reqwest_error)?;
            Ok(HttpResponse { status, body })
        }
    }

    fn map_reqwest_error(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Network(e.to_string())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Replays canned responses and records every request
    #[derive(Clone, Default)]
    pub struct MockTransport {
        responses: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
        pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    }

    impl MockTransport {
        pub fn respond(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(&self, error: TransportError) -> &Self {
            self.responses.borrow_mut().push_back(Err(error));
            self
        }

        pub fn last_request(&self) -> HttpRequest {
            self.requests
                .borrow()
                .last()
                .cloned()
                .expect("no request recorded")
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("no canned response".into())))
        }
    }
}

//! The HTTP round-trip, kept behind the [`Transport`] trait.
//!
//! Requests and responses are plain data so that [`Client`](crate::Client) can be driven by any
//! HTTP stack, or by a stub in tests.

use derive_more::Display;

use crate::error::TransportError;

/// HTTP method of a request.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    #[display(fmt = "POST")]
    Post,
    #[display(fmt = "PATCH")]
    Patch,
}

/// An HTTP request described as plain data. `path` is relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs the actual network call.
///
/// Return `Err` only when no response was received (connection refused, timeout, etc.). Any HTTP
/// response, including non-2xx ones, must be returned as `Ok`.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>> Transport for T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

/// Default [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` is expected to be validated already, see
    /// [`Configuration::base_url`](crate::Configuration::base_url).
    pub fn new(base_url: &str) -> Self {
        HttpTransport {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self
            .client
            .request(method, self.url(&request.path))
            .body(request.body.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn joins_base_url_and_path() {
        let transport = HttpTransport::new("http://localhost:8080/");
        assert_eq!(transport.url("/v1/log"), "http://localhost:8080/v1/log");
    }

    #[test]
    fn closures_are_transports() {
        let transport = |request: &HttpRequest| {
            Ok::<_, TransportError>(HttpResponse {
                status: 201,
                body: request.body.clone(),
            })
        };
        let response = transport
            .send(&HttpRequest {
                method: Method::Post,
                path: "/v1/log".to_owned(),
                headers: vec![],
                body: "{}".to_owned(),
            })
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body, "{}");
    }
}

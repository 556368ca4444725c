use std::fmt;

use log::Level;
use serde::Serialize;
use serde_json::Value;

use crate::{
    event::Event,
    transport::{HttpRequest, HttpResponse, HttpTransport, Transport},
    Configuration, Outcome, Result,
};

const LOG_TARGET: &str = "logsnag";

/// A client for LogSnag API.
///
/// Every operation validates its input first and returns `Err` without making a request if the
/// input is invalid. Once a request is made, the operation always returns `Ok`: network failures
/// and error responses are reported through [`Outcome`].
///
/// # Examples
/// ```
/// # use logsnag::{Client, Configuration};
/// let client = Client::new(Configuration::new("api-token", "my-project").unwrap());
/// ```
pub struct Client {
    config: Configuration,
    transport: Box<dyn Transport + Send + Sync>,
}

impl Client {
    /// Create a new `Client` sending requests to the configured base URL.
    pub fn new(config: Configuration) -> Self {
        let transport = HttpTransport::new(config.get_base_url());
        Client::with_transport(config, transport)
    }

    /// Create a new `Client` that sends requests through `transport`.
    pub fn with_transport(
        config: Configuration,
        transport: impl Transport + Send + Sync + 'static,
    ) -> Self {
        Client {
            config,
            transport: Box::new(transport),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Send an event log.
    ///
    /// `data` must serialize to a map with `channel` and `event` keys, and may include `user_id`,
    /// `description`, `icon`, `notify`, `tags`, `parser` and `timestamp` (Unix seconds).
    ///
    /// See <https://docs.logsnag.com/api-reference/log>.
    pub fn log(&self, data: impl Serialize) -> Result<Outcome> {
        let event = Event::log(data, &self.config)?;
        self.execute(&event)
    }

    /// Add key-value properties to a user profile.
    ///
    /// `data` must serialize to a map with `user_id` and `properties` keys.
    ///
    /// See <https://docs.logsnag.com/api-reference/identify>.
    pub fn identify(&self, data: impl Serialize) -> Result<Outcome> {
        let event = Event::identify(data, &self.config)?;
        self.execute(&event)
    }

    /// Set the value of an insight.
    ///
    /// `data` must serialize to a map with `title` and `value` (string or number) keys, and may
    /// include `icon`.
    ///
    /// See <https://docs.logsnag.com/api-reference/insight>.
    pub fn insight(&self, data: impl Serialize) -> Result<Outcome> {
        let event = Event::insight(data, &self.config, false)?;
        self.execute(&event)
    }

    /// Increment a numeric insight by `value`.
    ///
    /// See <https://docs.logsnag.com/api-reference/insight-mutate>.
    pub fn mutate_insight(&self, data: impl Serialize) -> Result<Outcome> {
        let event = Event::insight(data, &self.config, true)?;
        self.execute(&event)
    }

    fn execute(&self, event: &Event) -> Result<Outcome> {
        let (api_token, _) = self.config.credentials()?;
        let (method, path) = event.kind().endpoint();

        let request = HttpRequest {
            method,
            path: path.to_owned(),
            headers: vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("Authorization".to_owned(), format!("Bearer {api_token}")),
            ],
            body: event.request_body().to_string(),
        };

        self.emit(Level::Debug, format_args!("sending {method} {path}"));

        let outcome = match self.transport.send(&request) {
            Ok(response) => self.handle_response(response),
            Err(err) => {
                self.emit(
                    Level::Warn,
                    format_args!("request to {path} failed: {err}"),
                );
                Outcome::transport_failure(err.to_string())
            }
        };

        Ok(outcome)
    }

    fn handle_response(&self, response: HttpResponse) -> Outcome {
        let HttpResponse { status, body } = response;
        let parsed = parse_body(&body);

        if (200..300).contains(&status) {
            self.emit(Level::Debug, format_args!("received {status}"));
            return Outcome::success(parsed, status);
        }

        let message = match parsed.as_ref().and_then(|parsed| parsed.get("message")) {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => body,
            Some(other) => other.to_string(),
        };
        self.emit(
            Level::Warn,
            format_args!("received non-2xx response {status}: {message}"),
        );
        Outcome::failure(message, status)
    }

    /// Send a diagnostic record to the configured logger, or the global one.
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let logger: &dyn log::Log = match &self.config.logger {
            Some(logger) => &**logger,
            None if level <= log::max_level() => log::logger(),
            None => return,
        };

        let record = log::Record::builder()
            .level(level)
            .target(LOG_TARGET)
            .module_path(Some(module_path!()))
            .args(args)
            .build();
        if logger.enabled(record.metadata()) {
            logger.log(&record);
        }
    }
}

/// JSON bodies are parsed, anything else is kept as a string. Empty bodies yield `None`.
fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned())))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::{transport::Method, TransportError};

    fn client_returning(
        response: std::result::Result<HttpResponse, TransportError>,
    ) -> (Client, Arc<Mutex<Vec<HttpRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let transport = {
            let requests = Arc::clone(&requests);
            move |request: &HttpRequest| {
                requests.lock().unwrap().push(request.clone());
                response.clone()
            }
        };
        let config = Configuration::new("123456", "p").unwrap();
        (Client::with_transport(config, transport), requests)
    }

    #[test]
    fn parses_bodies() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("  \n"), None);
        assert_eq!(parse_body(r#"{"message":"ok"}"#), Some(json!({"message": "ok"})));
        assert_eq!(parse_body("plain text"), Some(json!("plain text")));
    }

    #[test]
    fn sends_headers() {
        let (client, requests) = client_returning(Ok(HttpResponse {
            status: 200,
            body: String::new(),
        }));
        client.insight(json!({"title": "t", "value": 1})).unwrap();

        let requests = requests.lock().unwrap();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, "/v1/insight");
        assert_eq!(
            requests[0].headers,
            vec![
                ("Content-Type".to_owned(), "application/json".to_owned()),
                ("Authorization".to_owned(), "Bearer 123456".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_success_body_has_no_data() {
        let (client, _) = client_returning(Ok(HttpResponse {
            status: 204,
            body: String::new(),
        }));
        let outcome = client.log(json!({"channel": "c", "event": "e"})).unwrap();
        assert_eq!(outcome, Outcome::success(None, 204));
    }

    #[test]
    fn error_without_message_field_uses_raw_body() {
        let (client, _) = client_returning(Ok(HttpResponse {
            status: 502,
            body: "<html>Bad Gateway</html>".to_owned(),
        }));
        let outcome = client.log(json!({"channel": "c", "event": "e"})).unwrap();
        assert_eq!(outcome, Outcome::failure("<html>Bad Gateway</html>", 502));

        let (client, _) = client_returning(Ok(HttpResponse {
            status: 500,
            body: r#"{"error":"boom"}"#.to_owned(),
        }));
        let outcome = client.log(json!({"channel": "c", "event": "e"})).unwrap();
        assert_eq!(outcome.error_message(), Some(r#"{"error":"boom"}"#));
    }

    #[test]
    fn non_string_message_is_rendered() {
        let (client, _) = client_returning(Ok(HttpResponse {
            status: 422,
            body: r#"{"message":["title is required"]}"#.to_owned(),
        }));
        let outcome = client.log(json!({"channel": "c", "event": "e"})).unwrap();
        assert_eq!(outcome.error_message(), Some(r#"["title is required"]"#));
        assert_eq!(outcome.data(), None);
    }
}

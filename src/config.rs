use std::{fmt, sync::Arc};

use crate::{error::ConfigurationError, Client};

/// Configuration for [`Client`].
///
/// `api_token` and `project` are required. Setting either to an empty string fails immediately.
///
/// ```
/// # use logsnag::Configuration;
/// # fn main() -> Result<(), logsnag::ConfigurationError> {
/// let mut config = Configuration::default();
/// config.api_token("api-token")?.project("my-project")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Configuration {
    pub(crate) api_token: Option<String>,
    pub(crate) project: Option<String>,
    pub(crate) base_url: String,
    pub(crate) logger: Option<Arc<dyn log::Log>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            api_token: None,
            project: None,
            base_url: Configuration::DEFAULT_BASE_URL.to_owned(),
            logger: None,
        }
    }
}

impl Configuration {
    /// Default base URL for API calls.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.logsnag.com";

    /// Create a configuration with both required settings.
    ///
    /// ```
    /// # use logsnag::Configuration;
    /// let config = Configuration::new("api-token", "my-project").unwrap();
    /// assert_eq!(config.get_project(), Some("my-project"));
    /// ```
    pub fn new(
        api_token: impl Into<String>,
        project: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        let mut config = Configuration::default();
        config.api_token(api_token)?.project(project)?;
        Ok(config)
    }

    /// Set the API token used in the `Authorization` header.
    pub fn api_token(
        &mut self,
        api_token: impl Into<String>,
    ) -> Result<&mut Self, ConfigurationError> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(ConfigurationError::EmptyApiToken);
        }
        self.api_token = Some(api_token);
        Ok(self)
    }

    /// Set the project every event is attached to.
    pub fn project(&mut self, project: impl Into<String>) -> Result<&mut Self, ConfigurationError> {
        let project = project.into();
        if project.is_empty() {
            return Err(ConfigurationError::EmptyProject);
        }
        self.project = Some(project);
        Ok(self)
    }

    /// Override base URL for API calls. Clients should use the default setting in most cases.
    pub fn base_url(&mut self, base_url: impl Into<String>) -> Result<&mut Self, ConfigurationError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(ConfigurationError::InvalidBaseUrl)?;
        self.base_url = base_url;
        Ok(self)
    }

    /// Route client diagnostics to `logger` instead of the global [`log`] logger.
    pub fn logger(&mut self, logger: impl log::Log + 'static) -> &mut Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn get_api_token(&self) -> Option<&str> {
        self.api_token.as_deref()
    }

    pub fn get_project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get_logger(&self) -> Option<&Arc<dyn log::Log>> {
        self.logger.as_ref()
    }

    /// Both required settings, or [`ConfigurationError::NotConfigured`].
    pub(crate) fn credentials(&self) -> Result<(&str, &str), ConfigurationError> {
        match (self.api_token.as_deref(), self.project.as_deref()) {
            (Some(api_token), Some(project)) => Ok((api_token, project)),
            _ => Err(ConfigurationError::NotConfigured),
        }
    }

    /// Create a new [`Client`] sending requests over HTTPS.
    ///
    /// ```
    /// # use logsnag::{Client, Configuration};
    /// let client: Client = Configuration::new("api-token", "my-project").unwrap().to_client();
    /// ```
    pub fn to_client(self) -> Client {
        Client::new(self)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("project", &self.project)
            .field("base_url", &self.base_url)
            .field("logger", &self.logger.as_ref().map(|_| "<logger>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullLogger;
    impl log::Log for NullLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            false
        }
        fn log(&self, _record: &log::Record) {}
        fn flush(&self) {}
    }

    #[test]
    fn sets_api_token() {
        let mut config = Configuration::default();
        config.api_token("valid_token").unwrap();
        assert_eq!(config.get_api_token(), Some("valid_token"));
    }

    #[test]
    fn rejects_empty_api_token() {
        let mut config = Configuration::default();
        assert!(matches!(
            config.api_token(""),
            Err(ConfigurationError::EmptyApiToken)
        ));
        assert_eq!(config.get_api_token(), None);
    }

    #[test]
    fn sets_project() {
        let mut config = Configuration::default();
        config.project("valid_project").unwrap();
        assert_eq!(config.get_project(), Some("valid_project"));
    }

    #[test]
    fn rejects_empty_project_and_keeps_previous_value() {
        let mut config = Configuration::new("token", "first").unwrap();
        assert!(matches!(
            config.project(String::new()),
            Err(ConfigurationError::EmptyProject)
        ));
        assert_eq!(config.get_project(), Some("first"));
    }

    #[test]
    fn accepts_and_returns_logger() {
        let mut config = Configuration::default();
        assert!(config.get_logger().is_none());
        config.logger(NullLogger);
        assert!(config.get_logger().is_some());
    }

    #[test]
    fn validates_base_url() {
        let mut config = Configuration::default();
        assert_eq!(config.get_base_url(), Configuration::DEFAULT_BASE_URL);
        assert!(matches!(
            config.base_url("not a url"),
            Err(ConfigurationError::InvalidBaseUrl(_))
        ));
        config.base_url("http://localhost:8080").unwrap();
        assert_eq!(config.get_base_url(), "http://localhost:8080");
    }

    #[test]
    fn credentials_require_both_settings() {
        let mut config = Configuration::default();
        config.project("p").unwrap();
        assert_eq!(config.credentials(), Err(ConfigurationError::NotConfigured));
        config.api_token("t").unwrap();
        assert_eq!(config.credentials(), Ok(("t", "p")));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = Configuration::new("secret-token", "p").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}

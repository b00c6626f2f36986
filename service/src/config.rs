use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::time::Duration;
use zoom_api::{ClientConfig, Error, ZoomClient, ZoomUrls};

/// Default overall request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 90_000;

/// Default connect timeout in milliseconds.
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 20_000;

/// Loads the `.env` file, then parses the command line parameters and flags into `T`.
pub fn parse<T: Parser>() -> T {
    dotenv().ok();
    T::parse()
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The OAuth client ID of the Zoom app.
    #[arg(long, env, global = true)]
    zoom_app_id: Option<String>,

    /// The OAuth client secret of the Zoom app.
    #[arg(long, env, global = true, hide_env_values = true)]
    zoom_app_secret: Option<String>,

    /// The redirect URI registered with the Zoom app.
    #[arg(long, env, global = true)]
    zoom_redirect_uri: Option<String>,

    /// An access token to use for API calls. On its own it gives a read-only client.
    #[arg(long, env, global = true, hide_env_values = true)]
    zoom_access_token: Option<String>,

    /// Send every request to this server instead of Zoom (e.g. a local mock).
    #[arg(long, env, global = true)]
    zoom_server_url: Option<String>,

    /// Overall request timeout in milliseconds
    #[arg(long, env, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds for REST API calls
    #[arg(long, env, global = true, default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    pub connect_timeout_ms: u64,

    /// Skip TLS certificate verification. Only for talking to test servers.
    #[arg(long, env, global = true, default_value_t = false)]
    pub accept_invalid_certs: bool,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        global = true,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    fn urls(&self) -> ZoomUrls {
        self.zoom_server_url
            .as_deref()
            .map(ZoomUrls::for_server)
            .unwrap_or_default()
    }

    /// Builds a `ZoomClient` from the configured credentials.
    ///
    /// App credentials take precedence; an access token given alongside them is
    /// installed on the client. An access token on its own yields a read-only
    /// client. With neither, the missing app credentials are reported.
    pub fn zoom_client(&self) -> Result<ZoomClient, Error> {
        let has_app_credentials = self.zoom_app_id.is_some()
            || self.zoom_app_secret.is_some()
            || self.zoom_redirect_uri.is_some();

        if !has_app_credentials {
            if let Some(token) = &self.zoom_access_token {
                let mut client = ZoomClient::with_access_token(token.as_str()).with_urls(self.urls());
                client.set_timeout(self.timeout());
                client.set_connect_timeout(self.connect_timeout());
                client.set_accept_invalid_certs(self.accept_invalid_certs);
                return Ok(client);
            }
        }

        let client_config = ClientConfig::new(
            self.zoom_app_id.as_deref().unwrap_or_default(),
            self.zoom_app_secret.as_deref().unwrap_or_default(),
            self.zoom_redirect_uri.as_deref().unwrap_or_default(),
        )
        .with_timeout(self.timeout())
        .with_connect_timeout(self.connect_timeout())
        .with_accept_invalid_certs(self.accept_invalid_certs)
        .with_urls(self.urls());

        let mut client = ZoomClient::new(client_config)?;
        if let Some(token) = &self.zoom_access_token {
            client.set_access_token(token.as_str());
        }
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoom_api::error::ConfigurationErrorKind;
    use zoom_api::ErrorKind;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["zoom-client"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_timeout_defaults() {
        let config = config(&[]);
        assert_eq!(config.timeout(), Duration::from_millis(90_000));
        assert_eq!(config.connect_timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_zoom_client_from_app_credentials() {
        let config = config(&[
            "--zoom-app-id",
            "abc",
            "--zoom-app-secret",
            "secret",
            "--zoom-redirect-uri",
            "https://x.test/cb",
            "--timeout-ms",
            "5000",
        ]);
        let client = config.zoom_client().unwrap();
        assert_eq!(client.app_id(), Some("abc"));
        assert_eq!(client.timeout(), Duration::from_millis(5_000));
        assert!(client.access_token().is_none());
    }

    #[test]
    fn test_zoom_client_read_only() {
        let config = config(&["--zoom-access-token", "raw-token"]);
        let client = config.zoom_client().unwrap();
        assert_eq!(client.access_token().unwrap().secret(), "raw-token");
        assert!(client.app_id().is_none());
    }

    #[test]
    fn test_zoom_client_partial_credentials_fail() {
        let config = config(&[
            "--zoom-app-id",
            "abc",
            "--zoom-redirect-uri",
            "https://x.test/cb",
            "--zoom-access-token",
            "raw-token",
        ]);
        let err = config.zoom_client().unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::Configuration(ConfigurationErrorKind::MissingAppSecret)
        );
    }

    #[test]
    fn test_zoom_server_url_overrides_endpoints() {
        let config = config(&[
            "--zoom-access-token",
            "raw-token",
            "--zoom-server-url",
            "http://127.0.0.1:9000",
        ]);
        let client = config.zoom_client().unwrap();
        assert_eq!(client.urls().api_base, "http://127.0.0.1:9000/v2/");
    }

    #[test]
    fn test_zoom_client_without_credentials_fails() {
        let err = config(&[]).zoom_client().unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::Configuration(ConfigurationErrorKind::MissingAppId)
        );
    }

    #[test]
    fn test_log_level_filter_parses() {
        let config = config(&["--log-level-filter", "DEBUG"]);
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
    }
}

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use service::{config::Config, logging::Logger};
use zoom_api::api::{MeetingType, Page, DEFAULT_PAGE_SIZE};
use zoom_api::oauth::{generate_state, PkceVerifier, TokenResponse};
use zoom_api::{Error, ZoomClient};

#[derive(Debug, Parser)]
#[command(author, version, about = "Command line client for the Zoom OAuth and REST APIs", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the OAuth authorization URL to open in a browser
    LoginUrl {
        /// CSRF state to round-trip through the redirect. Generated when omitted.
        #[arg(long)]
        state: Option<String>,
        /// Add a PKCE challenge and print the matching code verifier
        #[arg(long)]
        pkce: bool,
    },
    /// Exchange an authorization code for tokens
    ExchangeCode {
        code: String,
        /// PKCE code verifier printed by `login-url --pkce`
        #[arg(long)]
        code_verifier: Option<String>,
    },
    /// Obtain a new access token with a refresh token
    Refresh { refresh_token: String },
    /// Revoke an access or refresh token
    Revoke { token: String },
    /// List a user's meetings
    Meetings {
        user_id: String,
        /// Meeting list type
        #[arg(long = "type", default_value = "live")]
        meeting_type: MeetingType,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List a user's webinars
    Webinars {
        user_id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a user's profile
    User {
        #[arg(default_value = "me")]
        user_id: String,
    },
}

#[derive(Debug, Args)]
struct PageArgs {
    /// Number of records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
    /// Page to fetch, starting at 1
    #[arg(long, default_value_t = 1)]
    page_number: u32,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page::new(args.page_size, args.page_number)
    }
}

#[tokio::main]
async fn main() {
    let cli: Cli = service::config::parse();
    if let Err(e) = Logger::init_logger(&cli.config) {
        eprintln!("Failed to start logger: {e}");
    }

    let client = match cli.config.zoom_client() {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid Zoom configuration: {e}");
            std::process::exit(1);
        }
    };

    match run(&client, cli.command).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("Failed to format output: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

async fn run(client: &ZoomClient, command: Command) -> Result<Value, Error> {
    match command {
        Command::LoginUrl { state, pkce } => {
            let state = state.unwrap_or_else(generate_state);
            if pkce {
                let verifier = PkceVerifier::generate();
                let url = client.login_url_with_pkce(Some(&state), &verifier.challenge())?;
                Ok(json!({ "url": url, "state": state, "code_verifier": verifier.as_str() }))
            } else {
                let url = client.login_url(Some(&state))?;
                Ok(json!({ "url": url, "state": state }))
            }
        }
        Command::ExchangeCode {
            code,
            code_verifier,
        } => {
            let tokens = match code_verifier {
                Some(verifier) => {
                    client
                        .oauth_token_with_pkce(&code, &verifier.parse::<PkceVerifier>()?)
                        .await?
                }
                None => client.oauth_token(&code).await?,
            };
            Ok(token_output(&tokens))
        }
        Command::Refresh { refresh_token } => {
            let tokens = client.refresh_token(&refresh_token).await?;
            Ok(token_output(&tokens))
        }
        Command::Revoke { token } => client.revoke_token(&token).await,
        Command::Meetings {
            user_id,
            meeting_type,
            page,
        } => {
            info!("Listing {meeting_type} meetings for {user_id}");
            client
                .user_meetings(&user_id, meeting_type, page.into())
                .await
        }
        Command::Webinars { user_id, page } => {
            info!("Listing webinars for {user_id}");
            client.user_webinars(&user_id, page.into()).await
        }
        Command::User { user_id } => client.user(&user_id).await,
    }
}

/// Token responses keep their secrets redacted; the command line prints them in full.
fn token_output(tokens: &TokenResponse) -> Value {
    let mut output = json!({
        "access_token": tokens.access_token.expose_secret(),
        "refresh_token": tokens.refresh_token.as_ref().map(|t| t.expose_secret()),
        "expires_in": tokens.expires_in,
        "expires_at": tokens.expires_at().map(|t| t.to_rfc3339()),
        "token_type": tokens.token_type,
        "scope": tokens.scope,
    });
    if let Some(fields) = output.as_object_mut() {
        for (key, value) in &tokens.extra {
            fields.insert(key.clone(), value.clone());
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_meetings_command() {
        let cli = Cli::try_parse_from([
            "zoom-client",
            "--zoom-access-token",
            "raw-token",
            "meetings",
            "u1",
            "--type",
            "upcoming",
            "--page-size",
            "50",
        ])
        .unwrap();

        match cli.command {
            Command::Meetings {
                user_id,
                meeting_type,
                page,
            } => {
                assert_eq!(user_id, "u1");
                assert_eq!(meeting_type, MeetingType::Upcoming);
                assert_eq!(Page::from(page), Page::new(50, 1));
            }
            other => panic!("Expected meetings command, got: {:?}", other),
        }
    }

    #[test]
    fn test_cli_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "zoom-client",
            "user",
            "--zoom-access-token",
            "raw-token",
        ])
        .unwrap();
        assert!(cli.config.zoom_client().is_ok());
    }

    #[test]
    fn test_token_output_includes_secrets_and_extra_fields() {
        let tokens = TokenResponse::from_value(json!({
            "access_token": "access",
            "refresh_token": "refresh",
            "expires_in": 3599,
            "token_type": "bearer",
            "api_url": "https://api.zoom.us"
        }))
        .unwrap();

        let output = token_output(&tokens);
        assert_eq!(output["access_token"], json!("access"));
        assert_eq!(output["refresh_token"], json!("refresh"));
        assert_eq!(output["api_url"], json!("https://api.zoom.us"));
        assert!(output["expires_at"].is_string());
    }

    #[tokio::test]
    async fn test_login_url_command_generates_state() {
        let client = ZoomClient::new(zoom_api::ClientConfig::new(
            "abc",
            "secret",
            "https://x.test/cb",
        ))
        .unwrap();

        let output = run(
            &client,
            Command::LoginUrl {
                state: None,
                pkce: true,
            },
        )
        .await
        .unwrap();

        let state = output["state"].as_str().unwrap();
        assert_eq!(state.len(), 64);
        let url = output["url"].as_str().unwrap();
        assert!(url.contains(&format!("&state={state}")));
        assert!(url.ends_with("&code_challenge_method=S256"));
        assert!(output["code_verifier"].is_string());
    }

    #[tokio::test]
    async fn test_exchange_code_rejects_malformed_verifier_before_calling_zoom() {
        let config = zoom_api::ClientConfig::new("abc", "secret", "https://x.test/cb")
            .with_urls(zoom_api::ZoomUrls::for_server("http://127.0.0.1:1"));
        let client = ZoomClient::new(config).unwrap();

        let err = run(
            &client,
            Command::ExchangeCode {
                code: "code123".to_string(),
                code_verifier: Some("too-short".to_string()),
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_configuration());
    }
}

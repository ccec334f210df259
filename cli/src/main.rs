use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use client::{AdapterConfig, AuthAdapter, AuthError, Credentials, SignupRequest};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("invalid --field {0:?}; expected key=value")]
    InvalidField(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway health check failed with status {0}")]
    Unhealthy(u16),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "silver-auth", about = "SilverConnect auth gateway CLI")]
struct Cli {
    #[arg(long, env = "AUTH_GATEWAY_URL", default_value = client::net::config::DEFAULT_GATEWAY_URL)]
    base_url: String,

    #[arg(long, env = "AUTH_GATEWAY_TIMEOUT_SECS", default_value_t = client::net::config::DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, env = "AUTH_GATEWAY_CONNECT_TIMEOUT_SECS", default_value_t = client::net::config::DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the gateway is up.
    Ping,
    Signup(SignupArgs),
    Login(LoginArgs),
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "SILVER_AUTH_PASSWORD", hide_env_values = true)]
    password: String,

    /// Extra profile field, repeatable. Values that parse as JSON are sent as JSON.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,

    #[arg(long, env = "SILVER_AUTH_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = adapter_config(&cli);

    match cli.command {
        Command::Ping => run_ping(&config).await,
        Command::Signup(args) => {
            let mut request = SignupRequest::new(args.email, args.password);
            for raw in &args.fields {
                let (key, value) = parse_field(raw)?;
                request = request.with_field(key, value);
            }
            let adapter = AuthAdapter::new(&config)?;
            report(adapter.signup(&request).await)
        }
        Command::Login(args) => {
            let adapter = AuthAdapter::new(&config)?;
            report(adapter.login(&Credentials::new(args.email, args.password)).await)
        }
        Command::ForgotPassword { email } => {
            let adapter = AuthAdapter::new(&config)?;
            report(adapter.forgot_password(&email).await)
        }
    }
}

fn adapter_config(cli: &Cli) -> AdapterConfig {
    AdapterConfig::new(cli.base_url.clone()).with_timeouts(
        Duration::from_secs(cli.timeout_secs.max(1)),
        Duration::from_secs(cli.connect_timeout_secs.max(1)),
    )
}

async fn run_ping(config: &AdapterConfig) -> Result<(), CliError> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .build()?;
    let url = format!("{}/healthz", config.base_url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}

/// Print the gateway's JSON either way; a failure still exits non-zero.
fn report(result: Result<Value, AuthError>) -> Result<(), CliError> {
    match result {
        Ok(body) => print_json(&body),
        Err(AuthError::RequestFailure { status, body }) => {
            print_json(&body)?;
            Err(AuthError::RequestFailure { status, body }.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn parse_field(raw: &str) -> Result<(String, Value), CliError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(CliError::InvalidField(raw.to_owned()));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidField(raw.to_owned()));
    }
    let value = serde_json::from_str::<Value>(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

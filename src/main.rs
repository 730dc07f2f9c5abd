use authrelay::api::{ApiResponse, Gateway};
use authrelay::cli::{Args, Command};
use authrelay::config::Config;
use authrelay::error::{AuthRelayError, Result};
use authrelay::models::AuthResponse;
use authrelay::session::{FilesystemCookieStore, KeyValueStore, SessionContext};
use authrelay::ui::{display_download, display_error, display_response, display_session, TerminalNavigator};
use authrelay::util::is_blank;
use chrono::Duration;
use clap::{CommandFactory, Parser};
use colored::*;
use serde_json::Value;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let Some(command) = args.command.clone() else {
        let _ = Args::command().print_help();
        process::exit(1);
    };

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    init_tracing(config.verbose);

    if let Err(e) = run(&config, command).await {
        display_error(&e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "authrelay=debug" } else { "authrelay=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_body(data: Option<&str>) -> Result<Value> {
    match data {
        Some(raw) if !is_blank(raw) => Ok(serde_json::from_str(raw)?),
        _ => Ok(Value::Null),
    }
}

async fn run(config: &Config, command: Command) -> Result<()> {
    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => Arc::new(FilesystemCookieStore::new(path)),
        None => Arc::new(FilesystemCookieStore::in_cache_dir()?),
    };
    let session = Arc::new(SessionContext::hydrate(
        store,
        Duration::days(config.session_expiry_days),
    )?);
    let gateway = Gateway::from_config(config, session.clone(), Arc::new(TerminalNavigator))?;

    match command {
        Command::Login {
            username,
            password,
            role,
        } => {
            if is_blank(&username) || is_blank(&password) {
                return Err(AuthRelayError::Other(
                    "username and password must not be blank".to_string(),
                ));
            }
            let response = gateway.authenticate(&username, &password).await?;
            let response = response.into_result()?;
            let auth: AuthResponse = response.json()?;
            session.establish(&username, &role, auth)?;
            println!("{}", format!("Logged in as {}", username).green());
        }
        Command::Logout => {
            gateway.logout()?;
            println!("{}", "Logged out.".green());
        }
        Command::Status => {
            display_session(&session.snapshot());
            gateway.auto_login();
        }
        Command::Get { path } => show(gateway.get(&path).await)?,
        Command::Delete { path } => show(gateway.delete(&path).await)?,
        Command::Post { path, data } => {
            let body = parse_body(data.as_deref())?;
            show(gateway.post(&path, body).await)?
        }
        Command::Put { path, data } => {
            let body = parse_body(data.as_deref())?;
            show(gateway.put(&path, body).await)?
        }
        Command::PostForm { path, data } => {
            let fields = parse_body(Some(data.as_str()))?;
            show(gateway.post_form(&path, fields).await)?
        }
        Command::Download { path, data } => {
            let body = parse_body(data.as_deref())?;
            let payload = (!body.is_null()).then_some(body);
            let file = gateway.download(&path, payload).await?;
            display_download(&file);
        }
    }

    Ok(())
}

fn show(result: Result<ApiResponse>) -> Result<()> {
    let response = result?;
    display_response(&response);
    Ok(())
}

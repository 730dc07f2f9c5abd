use crate::api::{ApiResponse, DownloadedFile};
use crate::error::AuthRelayError;
use crate::models::Session;
use colored::*;
use serde_json::Value;

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

/// Print a successful response: status line, then the body
pub fn display_response(response: &ApiResponse) {
    println!("{}", format!("HTTP {}", response.status).green());
    if !response.body.is_null() {
        println!("{}", pretty(&response.body));
    }
}

pub fn display_error(error: &AuthRelayError) {
    match error.status() {
        Some(status) => eprintln!("{}", format!("HTTP {}: {}", status, error).red()),
        None => eprintln!("{} {}", "Error:".red(), error),
    }
    if let Some(body) = error.body().filter(|b| !b.is_null()) {
        eprintln!("{}", pretty(body).dimmed());
    }
}

pub fn display_session(session: &Session) {
    if !session.logged_in {
        println!("{}", "Not logged in.".yellow());
        return;
    }
    println!(
        "{} {}",
        "Logged in as".green(),
        session.username.as_deref().unwrap_or("<unknown>").bold()
    );
    if let Some(role) = session.role.as_deref().filter(|r| !r.is_empty()) {
        println!("{}", format!("Role: {}", role).dimmed());
    }
    if !session.is_authenticated() {
        println!("{}", "No stored credentials; log in again.".yellow());
    }
}

pub fn display_download(file: &DownloadedFile) {
    println!(
        "{}",
        format!("Saved {} bytes to {}", file.bytes, file.path.display()).green()
    );
}

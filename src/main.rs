use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use myerp_client::api::{self, staff::LoginRequest, HttpClient};
use myerp_client::auth::{Permission, SessionStore};
use myerp_client::config;
use myerp_client::router::{self, NavigationDecision, Navigator, Notice};
use myerp_client::storage::FileStore;
use myerp_client::validators::LoginFormValidator;

#[derive(Parser)]
#[command(name = "myerp", version, about = "MyERP command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        account: String,
        #[arg(long, env = "MYERP_PASSWORD")]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current identity, role and permissions
    Whoami,
    /// Check whether the current session may open a route
    Navigate { route: String },
    /// List every route and whether it is reachable
    Routes,
    /// Change the password of the logged-in user
    ResetPassword {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
}

/// `RUST_LOG` plus info-level output from both the library and this binary.
fn log_filter() -> Result<tracing_subscriber::EnvFilter> {
    Ok(tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("myerp_client=info".parse()?)
        .add_directive("myerp=info".parse()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter()?)
        .init();

    let cli = Cli::parse();

    let cfg = config::load()?;
    info!("Session file: {}", cfg.session.path);

    let session = Arc::new(SessionStore::new(FileStore::new(&cfg.session.path)));
    let http = HttpClient::new(&cfg.api, session.clone())?;

    match cli.command {
        Command::Login { account, password } => {
            let req = LoginRequest { account, password };
            LoginFormValidator::new().validate(&req)?;

            let resp = api::staff::sign_in(&http, &session, &req).await?;
            if !resp.is_success() {
                anyhow::bail!(
                    "Login failed ({}): {}",
                    resp.status,
                    resp.detail().unwrap_or("no detail")
                );
            }
            let role = session.role().map(|r| r.to_string()).unwrap_or_default();
            println!("Logged in as {}", role);
        }
        Command::Logout => {
            session.clear_session()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let Some(flags) = session.role_flags() else {
                println!("Not logged in");
                return Ok(());
            };
            if let Some(name) = session.user().and_then(|u| u.field("name").cloned()) {
                println!("name:        {}", name);
            }
            println!("role:        {}", flags.primary_role());
            println!("boss:        {}", flags.boss);
            println!("manager:     {}", flags.manager);
            println!("storekeeper: {}", flags.storekeeper);
            for p in Permission::ALL {
                println!("{:<20} {}", p.as_str(), session.allows(p));
            }
        }
        Command::Navigate { route } => {
            let nav = Navigator::new(session.clone(), |n: Notice| eprintln!("{}", n));
            match nav.navigate(&route)? {
                NavigationDecision::Allow => println!("allow {}", route),
                NavigationDecision::Redirect { to, .. } => println!("redirect {} -> {}", route, to),
            }
        }
        Command::Routes => {
            let snapshot = session.snapshot();
            for r in router::ROUTES {
                let verdict = match router::evaluate(r, &snapshot) {
                    NavigationDecision::Allow => "allow",
                    NavigationDecision::Redirect { .. } => "deny",
                };
                println!("{:<28} {:<28} {}", r.name, r.path, verdict);
            }
        }
        Command::ResetPassword { old, new } => {
            if !session.is_authenticated() {
                anyhow::bail!("{}", Notice::LoginRequired);
            }
            let body = json!({ "old_password": old, "new_password": new });
            let resp = api::staff::reset_password(&http, &body).await?;
            if resp.is_unauthorized() {
                session.clear_session()?;
                anyhow::bail!("Session expired, please log in again");
            }
            if !resp.is_success() {
                anyhow::bail!("Reset failed ({}): {}", resp.status, resp.detail().unwrap_or("no detail"));
            }
            println!("{}", resp.data.get("message").and_then(|m| m.as_str()).unwrap_or("Password changed"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_covers_binary_target() {
        let filter = log_filter().unwrap().to_string();
        assert!(filter.contains("myerp=info"), "{}", filter);
        assert!(filter.contains("myerp_client=info"), "{}", filter);
    }
}

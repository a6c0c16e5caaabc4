//! Command-line portal for the scoring API.
//!
//! Each subcommand plays one page: it runs the page controller, saves the
//! session, and prints whatever the page would show.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rust_credit_portal::api_client::ApiClient;
use rust_credit_portal::config::{validate_base_url, PortalConfig};
use rust_credit_portal::controllers::{self, Navigation};
use rust_credit_portal::forms::{RegistrationForm, ScoreForm};
use rust_credit_portal::session::{Session, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "portal", version, about = "Digital trust score portal")]
struct Cli {
    /// Scoring API origin (overrides PORTAL_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Session file (overrides PORTAL_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a user and remember their id
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        job: String,
        #[arg(long)]
        months: String,
    },
    /// Calculate a score for the registered user and show the result
    Calculate {
        #[arg(long)]
        income: String,
        #[arg(long)]
        variance: String,
        #[arg(long)]
        upi: String,
        #[arg(long)]
        bill: String,
        #[arg(long)]
        withdrawal: String,
    },
    /// Show the registered user's profile
    Profile,
    /// Show the last calculated score
    Result,
    /// Check that the scoring API is reachable
    Health,
    /// Forget the stored user and result
    Logout,
}

fn show_dashboard(session: &Session) {
    println!(
        "Dashboard: signed in as {}",
        session.user_id().unwrap_or("(unknown)")
    );
    println!("Next: `portal calculate ...` or `portal profile`");
}

fn show_result(session: &Session) {
    let view = controllers::render_result(session);
    if view.is_empty() {
        tracing::debug!("No stored result to render");
        return;
    }
    print!("{}", view.to_html());
}

fn navigate(to: Navigation, session: &Session) {
    match to {
        Navigation::Dashboard => show_dashboard(session),
        Navigation::Result => show_result(session),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_credit_portal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = PortalConfig::from_env()?;
    if let Some(url) = cli.base_url {
        config.api_base_url = validate_base_url(url)?;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let client = ApiClient::from_config(&config)?;
    let store = SessionStore::new(&config.session_file);
    let mut session = store.load();

    match cli.command {
        Commands::Register {
            name,
            email,
            job,
            months,
        } => {
            let form = RegistrationForm {
                name,
                email,
                job,
                months,
            };
            let next = controllers::register(&client, &mut session, &form).await?;
            store.save(&session)?;
            navigate(next, &session);
        }
        Commands::Calculate {
            income,
            variance,
            upi,
            bill,
            withdrawal,
        } => {
            let form = ScoreForm {
                income,
                variance,
                upi,
                bill,
                withdrawal,
            };
            let next = controllers::calculate(&client, &mut session, &form).await?;
            store.save(&session)?;
            navigate(next, &session);
        }
        Commands::Profile => {
            let view = controllers::load_profile(&client, &session).await?;
            println!("{}", view.to_html());
        }
        Commands::Result => show_result(&session),
        Commands::Health => {
            let status = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Logout => {
            store.clear()?;
            tracing::info!("Session cleared: {}", store.path().display());
        }
    }

    Ok(())
}

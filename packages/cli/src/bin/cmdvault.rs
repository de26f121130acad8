use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use cmdvault_cli::{init_tracing, run_server, Config};
use cmdvault_config::constants::{CMDVAULT_SERVER_URL, DEFAULT_SERVER_URL};
use cmdvault_tui::{App, VaultClient};

#[derive(Parser)]
#[command(name = "cmdvault")]
#[command(about = "Command Vault - organize reusable shell commands by workspace and section")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database file (overrides DB_PATH)
        #[arg(long)]
        db_path: Option<PathBuf>,
        /// Built client bundle to serve for non-API paths (overrides CLIENT_DIST)
        #[arg(long)]
        client_dist: Option<PathBuf>,
    },
    /// Launch the terminal client against a running server
    Tui {
        /// Base URL of the Command Vault server
        #[arg(long, env = CMDVAULT_SERVER_URL, default_value = DEFAULT_SERVER_URL)]
        server_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            db_path,
            client_dist,
        } => {
            init_tracing();
            let config = Config::from_env()?.with_overrides(port, db_path, client_dist)?;

            println!("{}", "🚀 Starting Command Vault server...".green().bold());
            println!("{} {}", "🗄  Database:".cyan(), config.db_path.display());

            run_server(config).await
        }
        Commands::Tui { server_url } => start_tui(server_url).await,
    }
}

async fn start_tui(server_url: String) -> anyhow::Result<()> {
    use crossterm::{execute, terminal};

    let client = VaultClient::new(server_url.clone());
    if !client.health_check().await.unwrap_or(false) {
        eprintln!(
            "{} {}",
            "⚠️  Server not reachable at".yellow(),
            client.base_url()
        );
    }

    let mut app = App::new(client, server_url);

    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if there was an error
    let cleanup_result = (|| -> anyhow::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Failed to restore terminal: {}", cleanup_error);
    }

    result
}

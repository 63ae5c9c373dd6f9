use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing::{error, info};

use useradmin::{
    admin_tui::App,
    api::{HttpUserApi, LocalUserApi, SignupRequest, UserApi},
    cli::{format_user_table, Cli, Commands},
    config::Config,
    logging::{self, LogTarget},
    models::UserDraft,
    validation::validate_draft,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    config.validate()?;

    let target = match cli.command {
        None | Some(Commands::Tui) => LogTarget::Tui,
        Some(_) => LogTarget::Cli,
    };
    logging::init(&config.log_file, target)?;

    let api: Arc<dyn UserApi> = if cli.offline {
        info!("Using in-memory user backend");
        Arc::new(LocalUserApi::new())
    } else {
        Arc::new(HttpUserApi::new(&config)?)
    };

    match cli.command {
        None => run_tui(api, &config).await,
        Some(command) => handle_command(command, api, &config).await,
    }
}

/// Set up the terminal, run the app, and always restore the terminal
async fn run_tui(api: Arc<dyn UserApi>, config: &Config) -> Result<()> {
    info!("Starting useradmin TUI against {}", config.api_base());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api, config);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match result {
        Ok(()) => {
            info!("useradmin TUI exited");
            Ok(())
        }
        Err(e) => {
            error!("useradmin TUI encountered an error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run a subcommand; everything except `tui` prints output and exits
async fn handle_command(command: Commands, api: Arc<dyn UserApi>, config: &Config) -> Result<()> {
    match command {
        Commands::Tui => return run_tui(api, config).await,

        Commands::List { page, limit, json } => {
            let limit = limit.unwrap_or(config.page_limit);
            match api.list_users(page, limit).await {
                Ok(result) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result.users)?);
                    } else if result.users.is_empty() {
                        println!("No users found");
                    } else {
                        print!("{}", format_user_table(&result.users));
                        println!();
                        println!(
                            "Page {} | Limit {} | Total {}",
                            result.metadata.page, result.metadata.limit, result.metadata.total
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Can not load users: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Add(args) => {
            let draft = UserDraft::from(args);
            let errors = validate_draft(&draft);
            if !errors.is_empty() {
                for e in &errors {
                    eprintln!("{}: {}", e.field, e.message);
                }
                std::process::exit(2);
            }

            let request = SignupRequest::from_draft(&draft, &config.default_password);
            match api.create_user(&request).await {
                Ok(user) => {
                    println!("Add Successfully");
                    println!("{}", serde_json::to_string_pretty(&user)?);
                }
                Err(e) => {
                    eprintln!("Can not add new item: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Delete { id } => match api.delete_user(&id).await {
            Ok(()) => println!("Delete Successfully"),
            Err(e) => {
                eprintln!("Can not delete {}: {}", id, e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

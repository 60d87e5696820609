use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fitflow-cli", version, about = "FitFlow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account sign-up / sign-in
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Workout session control
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Daily habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Quick journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Profile, XP and streak
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Deep-link shortcut tiles
    Shortcut {
        #[command(subcommand)]
        action: commands::shortcut::ShortcutAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Shortcut { action } => commands::shortcut::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

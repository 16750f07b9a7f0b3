use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "steadfast", version, about = "Steadfast streak tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current screen, streak and dashboard summary
    Status,
    /// Introductory carousel
    Onboarding {
        #[command(subcommand)]
        action: commands::onboarding::OnboardingAction,
    },
    /// Sign in (nothing is verified)
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Up-to-date streak record
    Streak,
    /// Milestone badges and the next target
    Goals,
    /// Calendar, weekly graph and start date
    Progress,
    /// Companion chat
    Chat {
        #[command(subcommand)]
        action: commands::chat::ChatAction,
    },
    /// Content shield preferences
    Shield {
        #[command(subcommand)]
        action: commands::shield::ShieldAction,
    },
    /// Urge control tools
    Urge {
        #[command(subcommand)]
        action: commands::urge::UrgeAction,
    },
    /// Benefits and recovery timeline
    Learn {
        #[command(subcommand)]
        action: commands::learn::LearnAction,
    },
    /// Streak reset, app lock and appearance
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Stored data management
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STEADFAST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Onboarding { action } => commands::onboarding::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Streak => commands::streak::run(),
        Commands::Goals => commands::goals::run(),
        Commands::Progress => commands::progress::run(),
        Commands::Chat { action } => commands::chat::run(action),
        Commands::Shield { action } => commands::shield::run(action),
        Commands::Urge { action } => commands::urge::run(action),
        Commands::Learn { action } => commands::learn::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

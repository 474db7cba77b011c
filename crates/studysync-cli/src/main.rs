use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "studysync", version, about = "StudySync CLI")]
struct Cli {
    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = commands::parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an assignment without storing it
    Priority {
        #[command(subcommand)]
        action: commands::priority::PriorityAction,
    },
    /// Assignment planner
    Assignment {
        #[command(subcommand)]
        action: commands::assignment::AssignmentAction,
    },
    /// To-do tasks
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Budget ledger
    Budget {
        #[command(subcommand)]
        action: commands::budget::BudgetAction,
    },
    /// Study hours and goals
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Weekly class timetable
    Timetable {
        #[command(subcommand)]
        action: commands::timetable::TimetableAction,
    },
    /// Subject catalog
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Notes and course materials
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Search across every store
    Search {
        /// Search text (at least two characters by default)
        query: String,
    },
    /// Generate a study outline for a topic
    Outline(commands::outline::OutlineArgs),
    /// Dashboard summary
    Summary,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_logging() {
    let fallback = studysync_core::Config::path()
        .ok()
        .and_then(|path| std::fs::read_to_string(path).ok())
        .and_then(|content| toml::from_str::<studysync_core::Config>(&content).ok())
        .map(|config| config.logging.level)
        .unwrap_or_else(|| "warn".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&fallback));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let today = cli.today;
    let result = match cli.command {
        Commands::Priority { action } => commands::priority::run(action, today),
        Commands::Assignment { action } => commands::assignment::run(action, today),
        Commands::Task { action } => commands::task::run(action, today),
        Commands::Budget { action } => commands::budget::run(action, today),
        Commands::Study { action } => commands::study::run(action, today),
        Commands::Timetable { action } => commands::timetable::run(action, today),
        Commands::Subject { action } => commands::subject::run(action, today),
        Commands::Note { action } => commands::note::run(action, today),
        Commands::Search { query } => commands::search::run(&query, today),
        Commands::Outline(args) => commands::outline::run(args),
        Commands::Summary => commands::summary::run(today),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "studysync", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

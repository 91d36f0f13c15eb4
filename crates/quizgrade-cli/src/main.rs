//! quizgrade CLI: the user-facing command-line interface.

use std::net::IpAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizgrade", version, about = "Quiz question server and answer grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the quiz API over HTTP
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to bind
        #[arg(long)]
        port: Option<u16>,

        /// TOML question bank (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Number of questions to expose
        #[arg(long)]
        quiz_size: Option<usize>,
    },

    /// Grade an answers file offline
    Grade {
        /// JSON file: { "answers": [...] } or a bare answers array
        #[arg(long)]
        answers: PathBuf,

        /// TOML question bank (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// List the questions of a bank
    List {
        /// TOML question bank (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Create starter config and example bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizgrade=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            bank,
            quiz_size,
        } => commands::serve::execute(config, host, port, bank, quiz_size).await,
        Commands::Grade {
            answers,
            bank,
            format,
        } => commands::grade::execute(answers, bank, format),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::List { bank } => commands::list::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

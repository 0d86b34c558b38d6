//! quizforge CLI: builds fill-in-the-blank quiz sheets from source text.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Cloze quiz builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a single quiz from a source file
    Build {
        /// Source text file
        #[arg(long)]
        source: PathBuf,

        /// Term selection file (JSON); omit to ask the configured term source
        #[arg(long)]
        terms: Option<PathBuf>,

        /// Quiz name, used as the file stem of every output
        #[arg(long)]
        name: String,

        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Max blanks per term
        #[arg(long)]
        max_occurrences: Option<usize>,

        /// "Full Page" or "Split Page"
        #[arg(long)]
        style: Option<String>,

        /// Output format: text, html, json, all (comma-separated)
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Build every quiz in a manifest or directory of manifests
    Run {
        /// Path to .toml quiz-set manifest or directory
        #[arg(long)]
        manifest: PathBuf,

        /// Max concurrent quiz builds
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output format: text, html, json, all (comma-separated)
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz-set manifests
    Validate {
        /// Path to manifest file or directory
        #[arg(long)]
        manifest: PathBuf,
    },

    /// List generated quizzes
    List {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print one quiz record as JSON
    Show {
        /// Quiz name
        #[arg(long)]
        name: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            source,
            terms,
            name,
            difficulty,
            max_occurrences,
            style,
            format,
            config,
        } => {
            commands::build::execute(commands::build::BuildArgs {
                source,
                terms,
                name,
                difficulty,
                max_occurrences,
                style,
                format,
                config,
            })
            .await
        }
        Commands::Run {
            manifest,
            parallelism,
            format,
            config,
        } => commands::run::execute(manifest, parallelism, format, config).await,
        Commands::Validate { manifest } => commands::validate::execute(manifest),
        Commands::List { config } => commands::list::execute(config),
        Commands::Show { name, config } => commands::show::execute(name, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

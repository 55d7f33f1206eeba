use clap::{CommandFactory, Parser};
use complexity_cli::{
    api_client::DEFAULT_SERVER_URL,
    completions,
    oneshot::{self, AnalyzeOptions},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "complexity")]
#[command(version)]
#[command(about = "Big-O complexity analyzer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Analyze a source file
    Analyze {
        /// Source file to analyze
        file: PathBuf,

        /// Language of the file (inferred from the extension when omitted)
        #[arg(short, long)]
        language: Option<String>,

        /// Analyzer server URL
        #[arg(long, env = "COMPLEXITY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Run the analysis in-process instead of calling a server
        #[arg(long)]
        local: bool,

        /// Configuration file for --local
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            completions::generate(shell, &mut Cli::command());
        }
        Commands::Analyze {
            file,
            language,
            server_url,
            local,
            config,
            json,
        } => {
            complexity_common::init_cli_tracing("warn")?;
            let options = AnalyzeOptions {
                file,
                language,
                server_url,
                local,
                config,
                json,
            };
            oneshot::execute(&options).await?;
        }
    }

    Ok(())
}

use anyhow::Result;
use aws_credential_report::commands;
use aws_credential_report::config::{ReportConfig, DEFAULT_OUTPUT};
use aws_credential_report::iam_api::IamConnector;
use aws_credential_report::utils::logging;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aws-credential-report")]
#[command(about = "Merge AWS IAM credential reports from multiple profiles into one CSV", long_about = None)]
#[command(version)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
struct Cli {
    /// AWS profiles to include (can be repeated)
    #[arg(short = 'p', long = "profile", value_name = "PROFILE", required = true)]
    profiles: Vec<String>,

    /// CSV file to save the credentials report to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Exclude accounts root users from the credentials report
    #[arg(long)]
    exclude_root: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::GenerateCompletion { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "aws-credential-report", &mut std::io::stdout());
        return Ok(());
    }

    logging::init(cli.verbose);

    let config = ReportConfig::new(cli.profiles, cli.output, cli.exclude_root);
    let connector = IamConnector::new(config.fetch.region.clone());
    commands::credential_report::run(&config, connector).await?;

    Ok(())
}

mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{issue::IssueSubcommand, milestone::MilestoneSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "featops",
    about = "Feature-spec driven project automation — progress reports, tracker issues, branch sync, and batch triggers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the spec file (default: search upward for featops.yaml)
    #[arg(long, global = true, env = "FEATOPS_SPEC")]
    spec: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a starter featops.yaml
    Init,

    /// Report implementation progress and write the JSON snapshot
    Progress,

    /// Manage tracker issues generated from the spec
    Issue {
        #[command(subcommand)]
        subcommand: IssueSubcommand,
    },

    /// Summarize tracker state: issue buckets, recent PRs, next actions
    Dashboard,

    /// Manage tracker milestones defined in the spec
    Milestone {
        #[command(subcommand)]
        subcommand: MilestoneSubcommand,
    },

    /// Pull generated implementation files from agent branches
    Sync {
        /// Leave the synced files unstaged
        #[arg(long)]
        no_stage: bool,
    },

    /// Comment on issues to trigger the implementation agent
    Trigger {
        /// Issue numbers to trigger (repeatable); auto-detects when omitted
        #[arg(long = "issue")]
        issues: Vec<u64>,

        /// Skip the confirmation prompt for auto-detected issues
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Validate the spec file and report warnings
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let spec_path = root::resolve_spec(cli.spec.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&spec_path),
        Commands::Progress => cmd::progress::run(&spec_path, cli.json),
        Commands::Issue { subcommand } => cmd::issue::run(&spec_path, subcommand, cli.json),
        Commands::Dashboard => cmd::dashboard::run(&spec_path, cli.json),
        Commands::Milestone { subcommand } => cmd::milestone::run(&spec_path, subcommand, cli.json),
        Commands::Sync { no_stage } => cmd::sync::run(&spec_path, no_stage, cli.json),
        Commands::Trigger { issues, yes } => cmd::trigger::run(&spec_path, &issues, yes, cli.json),
        Commands::Check => cmd::check::run(&spec_path, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

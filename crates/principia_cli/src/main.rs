//! `principia` command-line entry point.
//!
//! # Responsibility
//! - Parse commands and route them through `PrinciplesClient`.
//! - Print the grouped list or stats; exit non-zero on any failure.

use clap::{Parser, Subcommand};
use log::error;
use principia_cli::{
    filter_by_category, render_grouped, render_stats, ClientResult, DisplayStats,
    PrinciplesClient,
};
use principia_core::{init_logging, PrincipleDraft, TacticDraft};
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "principia", version, about = "Manage principles and tactics")]
struct Cli {
    /// Base URL of the Principia server
    #[arg(long, env = "PRINCIPIA_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Log level for client diagnostics
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List principles grouped by category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show summary figures
    Stats,
    /// Create a principle
    AddPrinciple {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: Option<String>,
        /// One of orange, blue, green, purple, red, teal
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        order: Option<i32>,
    },
    /// Attach a tactic to a principle
    AddTactic {
        #[arg(long)]
        principle_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Mark the tactic as not effective
        #[arg(long)]
        ineffective: bool,
        #[arg(long)]
        order: Option<i32>,
    },
    /// Delete a principle and its tactics
    DeletePrinciple { id: Uuid },
    /// Delete a single tactic
    DeleteTactic { id: Uuid },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level, None) {
        eprintln!("logging disabled: {err}");
    }

    let mut client = PrinciplesClient::new(cli.server);
    match run(&mut client, cli.command).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &mut PrinciplesClient, command: Command) -> ClientResult<String> {
    match command {
        Command::List { category } => {
            let principles = client.principles().await?;
            let visible = filter_by_category(principles, category.as_deref());
            Ok(render_grouped(&visible))
        }
        Command::Stats => {
            let principles = client.principles().await?;
            Ok(render_stats(&DisplayStats::from_principles(principles)))
        }
        Command::AddPrinciple {
            title,
            description,
            category,
            color,
            order,
        } => {
            let draft = PrincipleDraft {
                title: Some(title),
                description: Some(description),
                category,
                color,
                order,
            };
            let created = client.create_principle(&draft).await?;
            Ok(format!("created principle {}\n", created.id))
        }
        Command::AddTactic {
            principle_id,
            title,
            description,
            ineffective,
            order,
        } => {
            let draft = TacticDraft {
                principle_id: Some(principle_id),
                title: Some(title),
                description,
                is_effective: Some(!ineffective),
                order,
            };
            let created = client.create_tactic(&draft).await?;
            Ok(format!("created tactic {}\n", created.id))
        }
        Command::DeletePrinciple { id } => {
            client.delete_principle(id).await?;
            Ok(format!("deleted principle {id}\n"))
        }
        Command::DeleteTactic { id } => {
            client.delete_tactic(id).await?;
            Ok(format!("deleted tactic {id}\n"))
        }
    }
}

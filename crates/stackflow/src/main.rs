use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use stackflow::preview::{self, PreviewReport};
use stackflow_core::ActionType;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "Declare a GCP web server stack and preview what it would create", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resources and outputs the stack would produce
    Preview {
        /// Stack name (defaults to the project file's `stack`, then "dev")
        #[arg(short, long, env = "STACKFLOW_STACK")]
        stack: Option<String>,
        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match cli.command {
        Commands::Version => {
            println!("stackflow {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Preview { stack, json } => {
            let (path, project) = stackflow_config::load_project()?;
            tracing::debug!("Using project file {}", path.display());

            let stack = stack.unwrap_or_else(|| project.stack_name().to_string());
            let report = preview::preview(&project.name, &stack).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn print_report(report: &PreviewReport) {
    println!(
        "{} {}/{}",
        "Previewing stack".bold(),
        report.project.cyan(),
        report.stack.cyan()
    );
    println!();

    for action in &report.plan.actions {
        let marker = match action.action_type {
            ActionType::Create => "+".green(),
            ActionType::Read => ">".blue(),
        };
        println!("  {} {:<34} {}", marker, action.resource_type, action.resource_id);
    }
    println!();
    println!("{} {}", "Resources:".bold(), report.plan.summary());
    println!();

    println!("{}", "Outputs:".bold());
    for (name, result) in report.outputs.iter() {
        match result {
            Ok(value) => println!("  {}: {}", name, display_value(value)),
            Err(e) => println!("  {}: {}", name, format!("error: {}", e).red()),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(known after provisioning)".dimmed().to_string(),
        other => other.to_string(),
    }
}

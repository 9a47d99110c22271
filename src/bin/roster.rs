//! Employee roster CLI
//!
//! Adds, reads, updates and deletes employees in a JSON file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hybrid_store::roster::{Employee, EmployeeRoster, DEFAULT_ROSTER_FILE};

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Manage an employee roster stored as JSON")]
struct Cli {
    /// Roster file
    #[arg(long, env = "ROSTER_FILE", default_value = DEFAULT_ROSTER_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add an employee
    Add {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Show one employee
    Get { id: i64 },
    /// Replace an employee's name and email
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete an employee
    Delete { id: i64 },
    /// List all employees
    List,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "hybrid_store=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut roster = EmployeeRoster::open(&cli.file)
        .with_context(|| format!("failed to load {}", cli.file.display()))?;

    match cli.command {
        Command::Add { id, name, email } => {
            roster.add(Employee::new(id, name.trim(), email.trim()))?;
            println!("Employee added.");
        }
        Command::Get { id } => match roster.get(id) {
            Some(emp) => println!("Found: {:?}", emp),
            None => println!("Employee not found."),
        },
        Command::Update { id, name, email } => {
            if roster.update(Employee::new(id, name.trim(), email.trim()))? {
                println!("Employee updated.");
            } else {
                println!("Employee not found.");
            }
        }
        Command::Delete { id } => {
            if roster.delete(id)? {
                println!("Employee deleted.");
            } else {
                println!("Employee not found.");
            }
        }
        Command::List => {
            println!("Employees:");
            for emp in roster.list() {
                println!("{:?}", emp);
            }
        }
    }

    Ok(())
}

//! MoT Portal CLI
//!
//! Command-line interface for portal operations:
//! - Render the admin dashboard
//! - Show the recent activity feed
//! - Register and look up land records on the ledger

use clap::{Parser, Subcommand};
use ethers::core::types::Address;
use std::path::PathBuf;
use std::sync::Arc;

use motportal::config::{generate_default_config, Config};
use motportal::dashboard::{sample_feed, DashboardAggregator, DashboardStats};
use motportal::registry::RegistryClient;
use motportal::upstream::StatsClient;

#[derive(Parser)]
#[command(name = "motportal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ministry of Transport portal operations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh and render the dashboard cards
    Dashboard,

    /// Show the recent activity feed
    Activity,

    /// Land registry operations
    Land {
        #[command(subcommand)]
        command: LandCommands,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum LandCommands {
    /// Register a land record on the ledger
    Register {
        /// Record id
        id: u64,
        /// Owner account address (hex)
        owner: String,
        /// Postal address of the property
        property_address: String,
    },

    /// Fetch a land record by id
    Get {
        /// Record id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    match cli.command {
        Commands::Dashboard => {
            let source = Arc::new(StatsClient::new(config.upstream.clone()));
            let aggregator = DashboardAggregator::new(source, config.fallback);
            let stats = aggregator.refresh().await;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats_table(&stats);
            }
        }

        Commands::Activity => {
            let feed = sample_feed();

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                for entry in &feed {
                    println!(
                        "{:<14} {:<22} {} (by {}, {})",
                        format!("[{}]", entry.status.as_str()),
                        entry.kind,
                        entry.description,
                        entry.actor,
                        entry.relative_time
                    );
                }
            }
        }

        Commands::Land { command } => {
            // The contract flow cannot run without a signing account
            let registry = match RegistryClient::connect(&config.registry).await {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Cannot use the land registry: {}", e);
                    std::process::exit(1);
                }
            };

            match command {
                LandCommands::Register {
                    id,
                    owner,
                    property_address,
                } => {
                    let owner: Address = owner
                        .parse()
                        .map_err(|e| anyhow::anyhow!("invalid owner address: {}", e))?;

                    let outcome = registry.register_land(id, owner, &property_address).await?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&outcome)?);
                    } else {
                        println!("Land {} registered: tx {}", id, outcome.tx_hash);
                        if let Some(block) = outcome.block_number {
                            println!("Included in block {}", block);
                        }
                    }
                }

                LandCommands::Get { id } => match registry.get_land_details(id).await? {
                    Some(record) => {
                        if cli.format == "json" {
                            println!("{}", serde_json::to_string_pretty(&record)?);
                        } else {
                            println!("Land id:          {}", record.id);
                            println!("Owner:            {:?}", record.owner);
                            println!("Property address: {}", record.property_address);
                        }
                    }
                    None => {
                        eprintln!("No land record with id {}", id);
                        std::process::exit(1);
                    }
                },
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_stats_table(stats: &DashboardStats) {
    println!(
        "{:<22} {:>8} {:>8} {:>9} {:>9}",
        "Resource", "Total", "Pending", "Approved", "Rejected"
    );
    println!("{}", "-".repeat(60));
    println!(
        "{:<22} {:>8} {:>8} {:>9} {:>9}",
        "Vehicle applications",
        stats.vehicles.total,
        stats.vehicles.pending,
        stats.vehicles.approved,
        stats.vehicles.rejected
    );
    println!(
        "{:<22} {:>8} {:>8} {:>9} {:>9}",
        "License applications",
        stats.licenses.total,
        stats.licenses.pending,
        stats.licenses.approved,
        stats.licenses.rejected
    );
    println!(
        "{:<22} {:>8} {:>8} {:>9} {:>9}",
        "Land applications",
        stats.land.total,
        stats.land.pending,
        stats.land.approved,
        stats.land.rejected
    );
    println!();
    println!(
        "Users: {} total, {} active, {} admins",
        stats.users.total, stats.users.active, stats.users.admins
    );
}

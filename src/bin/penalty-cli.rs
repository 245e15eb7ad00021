use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use validator_penalties::{
    log, ClientShares, DoubleSigningReport, EnvConfig, OfflineReport, PenaltyCalculator,
    PenaltyInput, PenaltyReport, PenaltyType,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Print the report as JSON instead of a table.
    #[clap(long, global = true)]
    json: bool,

    /// Use the client shares in this JSON file instead of the built-in ones.
    #[clap(long, global = true)]
    client_shares: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimates inactivity penalties and missed rewards for a validator that goes offline.
    Offline {
        /// Validator balance in ETH.
        #[clap(long)]
        balance: String,

        /// Hours the validator is offline.
        #[clap(long)]
        hours: String,

        /// Hours since the chain last finalized. Defaults to the offline duration.
        #[clap(long)]
        hours_since_finality: Option<String>,
    },
    /// Estimates slashing penalties for a validator that double signs.
    DoubleSigning {
        /// Validator balance in ETH.
        #[clap(long)]
        balance: String,

        /// Include the correlated penalty, caused by a bug in an execution or consensus client.
        #[clap(long)]
        correlated: Option<String>,

        /// Client responsible for the correlated slashing, e.g. geth or prysm.
        #[clap(long, requires = "correlated")]
        client: Option<String>,
    },
}

impl From<Commands> for PenaltyInput {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Offline {
                balance,
                hours,
                hours_since_finality,
            } => PenaltyInput {
                penalty_type: Some(PenaltyType::Offline.to_string()),
                balance_eth: Some(balance),
                offline_hours: Some(hours),
                hours_since_finality,
                ..Default::default()
            },
            Commands::DoubleSigning {
                balance,
                correlated,
                client,
            } => PenaltyInput {
                penalty_type: Some(PenaltyType::DoubleSigning.to_string()),
                balance_eth: Some(balance),
                include_correlated_penalty: Some(correlated.is_some()),
                correlation_cause: correlated,
                client_name: client,
                ..Default::default()
            },
        }
    }
}

fn print_offline(report: &OfflineReport) {
    println!("offline epochs:             {}", report.offline_epochs);
    println!(
        "epochs since finality:      {}",
        report.epochs_since_finality
    );
    println!(
        "inactivity penalty:         {:.9} ETH",
        report.inactivity_penalty_eth
    );
    println!(
        "missed attestation rewards: {:.9} ETH",
        report.missed_rewards_eth
    );
}

fn print_double_signing(report: &DoubleSigningReport) {
    println!(
        "base slashing penalty:      {:.9} ETH",
        report.base_slashing_penalty_eth
    );
    if let (Some(client_type), Some(client_name)) =
        (report.correlation_cause, report.client_name.as_deref())
    {
        println!("correlated client:          {client_name} ({client_type})");
        println!(
            "correlated penalty:         {:.9} ETH",
            report.additional_correlated_penalty_eth
        );
    }
    println!(
        "long-term penalty:          {:.9} ETH",
        report.long_term_penalty_eth
    );
    println!(
        "total penalty:              {:.9} ETH",
        report.total_penalty_eth
    );
}

pub fn main() -> anyhow::Result<()> {
    log::init(&EnvConfig::from_env()?);

    let cli = Cli::parse();

    let client_shares = match &cli.client_shares {
        Some(path) => ClientShares::from_file(path)
            .with_context(|| format!("failed to load client shares from {}", path.display()))?,
        None => ClientShares::default(),
    };
    let calculator = PenaltyCalculator::new(client_shares);

    let input = PenaltyInput::from(cli.command);
    debug!(?input, "estimating penalties");
    let report = calculator.estimate(&input)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &report {
        PenaltyReport::Offline(report) => print_offline(report),
        PenaltyReport::DoubleSigning(report) => print_double_signing(report),
    }

    Ok(())
}

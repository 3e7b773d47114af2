//! Stableswap quote harness
//!
//! Prices swaps, deposits and withdrawals against pool snapshots given on
//! the command line. Assets are written `cash:liability:decimals[:supply]`
//! with raw on-chain integers.
//!
//! ```text
//! quote --network stellar swap-out \
//!     --from 201002000000:200999999200:6 \
//!     --to 100498000050:100500000000:6 \
//!     --amount 100000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use num_bigint::BigInt;
use rust_decimal::Decimal;
use serde_json::json;
use stableswap_amm::{analytics, AssetSnapshot, Quoter};
use stableswap_config::{Network, ParameterOverrides};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "quote")]
#[command(about = "Stableswap quoting engine harness")]
#[command(version)]
struct Cli {
    /// Network whose parameter table is used (solana, stellar, evm)
    #[arg(short, long, global = true, default_value = "stellar")]
    network: Network,

    /// TOML file overriding network parameters
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Output received for selling an exact amount
    SwapOut {
        #[arg(long, value_parser = parse_asset)]
        from: AssetSnapshot,
        #[arg(long, value_parser = parse_asset)]
        to: AssetSnapshot,
        /// Amount of `from` sold, native decimals
        #[arg(long, value_parser = parse_amount)]
        amount: BigInt,
    },
    /// Input required to receive an exact amount
    SwapIn {
        /// Asset received
        #[arg(long, value_parser = parse_asset)]
        receive: AssetSnapshot,
        /// Asset paid
        #[arg(long, value_parser = parse_asset)]
        pay: AssetSnapshot,
        /// Amount of `receive` wanted, native decimals
        #[arg(long, value_parser = parse_amount)]
        amount: BigInt,
    },
    /// LP shares minted for a deposit
    Deposit {
        #[arg(long, value_parser = parse_asset)]
        asset: AssetSnapshot,
        #[arg(long, value_parser = parse_amount)]
        amount: BigInt,
    },
    /// Tokens returned for burning LP shares
    Withdraw {
        #[arg(long, value_parser = parse_asset)]
        asset: AssetSnapshot,
        #[arg(long, value_parser = parse_amount)]
        shares: BigInt,
    },
    /// Burn LP shares of one asset and receive another
    WithdrawCross {
        #[arg(long, value_parser = parse_asset)]
        from: AssetSnapshot,
        #[arg(long, value_parser = parse_asset)]
        to: AssetSnapshot,
        #[arg(long, value_parser = parse_amount)]
        shares: BigInt,
    },
    /// Coverage ratio of an asset
    CovRatio {
        #[arg(long, value_parser = parse_amount)]
        cash: BigInt,
        #[arg(long, value_parser = parse_amount)]
        liability: BigInt,
    },
    /// Marginal rate and price impact of selling an amount
    Impact {
        #[arg(long, value_parser = parse_asset)]
        from: AssetSnapshot,
        #[arg(long, value_parser = parse_asset)]
        to: AssetSnapshot,
        #[arg(long, value_parser = parse_amount)]
        amount: BigInt,
    },
    /// Value locked for a liability at an LP-to-token rate
    Tvl {
        #[arg(long)]
        liability: Decimal,
        #[arg(long)]
        rate: Decimal,
        /// Token price, 1 when omitted
        #[arg(long)]
        price: Option<Decimal>,
    },
}

fn parse_amount(raw: &str) -> Result<BigInt, String> {
    raw.trim()
        .replace('_', "")
        .parse()
        .map_err(|e| format!("invalid integer {raw:?}: {e}"))
}

/// `cash:liability:decimals[:supply]`
fn parse_asset(raw: &str) -> Result<AssetSnapshot, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(format!(
            "invalid asset {raw:?}: expected cash:liability:decimals[:supply]"
        ));
    }
    let decimals: u8 = parts[2]
        .trim()
        .parse()
        .map_err(|e| format!("invalid decimals {:?}: {e}", parts[2]))?;
    let mut asset = AssetSnapshot::new(parse_amount(parts[0])?, parse_amount(parts[1])?, decimals);
    if let Some(supply) = parts.get(3) {
        asset = asset.with_total_supply(parse_amount(supply)?);
    }
    Ok(asset)
}

fn build_quoter(network: Network, overrides: Option<&Path>) -> Result<Quoter> {
    let Some(path) = overrides else {
        return Ok(Quoter::new(network));
    };
    let config = ParameterOverrides::load(path)?.resolve(network)?;
    Quoter::with_config(network, config).context("Rejected network parameters")
}

fn run(cli: Cli) -> Result<serde_json::Value> {
    let network = cli.network;
    let quoter = build_quoter(network, cli.overrides.as_deref())?;
    debug!(%network, config = ?quoter.config(), "quoter ready");

    let output = match cli.command {
        Commands::SwapOut { from, to, amount } => {
            let quote = quoter.get_amount_out(&from, &to, &amount)?;
            serde_json::to_value(quote)?
        }
        Commands::SwapIn {
            receive,
            pay,
            amount,
        } => {
            let quote = quoter.get_amount_in(&receive, &pay, &amount)?;
            serde_json::to_value(quote)?
        }
        Commands::Deposit { asset, amount } => {
            serde_json::to_value(quoter.quote_deposit(&asset, &amount)?)?
        }
        Commands::Withdraw { asset, shares } => {
            serde_json::to_value(quoter.quote_withdraw(&asset, &shares)?)?
        }
        Commands::WithdrawCross { from, to, shares } => {
            serde_json::to_value(quoter.quote_withdraw_cross_asset(&from, &to, &shares)?)?
        }
        Commands::CovRatio { cash, liability } => {
            let ratio = analytics::coverage_ratio(network, &cash, &liability)?;
            json!({ "coverage_ratio": ratio.to_string() })
        }
        Commands::Impact { from, to, amount } => {
            let rate = analytics::marginal_rate(network, &from, &to)?;
            let impact = analytics::price_impact(network, &from, &to, &amount)?;
            json!({
                "marginal_rate": rate.to_string(),
                "price_impact_pct": impact.to_string(),
            })
        }
        Commands::Tvl {
            liability,
            rate,
            price,
        } => {
            let value = analytics::tvl(liability, rate, price)?;
            json!({ "tvl": value.to_string() })
        }
    };
    Ok(output)
}

fn render(value: &serde_json::Value) -> String {
    match value.as_object() {
        Some(fields) => fields
            .iter()
            .map(|(key, v)| match v.as_str() {
                Some(s) => format!("{key}: {s}"),
                None => format!("{key}: {v}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        None => value.to_string(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_output = cli.json;
    info!(network = %cli.network, "quoting");

    let output = run(cli)?;
    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render(&output));
    }
    Ok(())
}

//! `reservoir` command line entry point

use amm::ConstantProduct;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use config::EngineConfig;
use parking_lot::Mutex;
use pool_engine::{
    fee_from_defaults, AccountId, AssetId, FeeRate, PoolEngine, PoolEvent, SequenceTracker,
    SwapDirection, TradePolicy,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "reservoir")]
#[command(author, version, about = "Constant-product pool engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment overlay to apply (e.g. production)
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Quote a swap against the given reserves without touching any pool
    Quote {
        #[arg(long)]
        reserve_in: u64,
        #[arg(long)]
        reserve_out: u64,
        #[arg(long)]
        amount_in: u64,
        #[command(flatten)]
        fee: FeeArgs,
        /// Slippage tolerance for the minimum received; defaults to config
        #[arg(long)]
        slippage_bps: Option<u32>,
    },
    /// Create a pool and run alternating swaps against it
    Simulate(SimulateArgs),
    /// Print the effective configuration
    ShowConfig,
}

#[derive(Args, Debug)]
struct FeeArgs {
    /// Fee numerator; defaults to config
    #[arg(long)]
    fee_numerator: Option<u32>,
    /// Fee denominator; defaults to config
    #[arg(long)]
    fee_denominator: Option<u32>,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[arg(long, default_value_t = 1_000_000)]
    amount_a: u64,
    #[arg(long, default_value_t = 1_000_000)]
    amount_b: u64,
    /// Number of swaps to run
    #[arg(long, default_value_t = 10)]
    swaps: u32,
    /// Input amount of every swap
    #[arg(long, default_value_t = 10_000)]
    swap_size: u64,
    /// Direction of the first swap; later swaps alternate
    #[arg(long, value_enum, default_value_t = Side::AToB)]
    first: Side,
    #[arg(long, default_value = "0x1111111111111111111111111111111111111111")]
    asset_a: AssetId,
    #[arg(long, default_value = "0x2222222222222222222222222222222222222222")]
    asset_b: AssetId,
    #[arg(long, default_value = "0x00000000000000000000000000000000000000a1")]
    provider: AccountId,
    #[command(flatten)]
    fee: FeeArgs,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    AToB,
    BToA,
}

impl From<Side> for SwapDirection {
    fn from(side: Side) -> Self {
        match side {
            Side::AToB => SwapDirection::AToB,
            Side::BToA => SwapDirection::BToA,
        }
    }
}

fn resolve_fee(args: &FeeArgs, config: &EngineConfig) -> Result<FeeRate> {
    let configured = fee_from_defaults(&config.pool).context("Invalid configured fee")?;
    let numerator = args.fee_numerator.unwrap_or(configured.numerator());
    let denominator = args.fee_denominator.unwrap_or(configured.denominator());
    FeeRate::new(numerator, denominator).context("Invalid fee arguments")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = EngineConfig::load(cli.config.as_deref(), cli.env.as_deref())
        .context("Failed to load configuration")?;
    pool_engine::logging::init(&config.logging)?;

    match cli.command {
        Commands::Quote {
            reserve_in,
            reserve_out,
            amount_in,
            fee,
            slippage_bps,
        } => {
            let fee = resolve_fee(&fee, &config)?;
            let slippage = slippage_bps.unwrap_or(config.pool.default_slippage_bps);
            let quote = ConstantProduct::quote(reserve_in, reserve_out, amount_in, fee, slippage)
                .context("Quote failed")?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Commands::Simulate(args) => simulate(&args, &config)?,
        Commands::ShowConfig => print!("{}", config.to_toml()?),
    }

    Ok(())
}

fn simulate(args: &SimulateArgs, config: &EngineConfig) -> Result<()> {
    let fee = resolve_fee(&args.fee, config)?;
    let policy = TradePolicy::from_config(&config.policy);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let engine =
        PoolEngine::with_event_sink(move |event: &PoolEvent| sink.lock().push(event.clone()));

    let (pool_id, shares) = engine
        .create_pool(
            args.provider,
            args.asset_a,
            args.asset_b,
            args.amount_a,
            args.amount_b,
            fee,
        )
        .context("Failed to create pool")?;
    info!("Simulating {} swaps of {} on {}", args.swaps, args.swap_size, pool_id);

    let mut direction: SwapDirection = args.first.into();
    let mut rejected = Vec::new();
    for round in 0..args.swaps {
        let quote = engine.quote_swap(
            pool_id,
            direction,
            args.swap_size,
            config.pool.default_slippage_bps,
        )?;
        match engine.execute_swap_with_policy(
            &policy,
            pool_id,
            direction,
            args.swap_size,
            quote.minimum_received,
        ) {
            Ok(receipt) => info!(
                "Swap {}: {} in, {} out, fee {}",
                round, receipt.amount_in, receipt.amount_out, receipt.fee_amount
            ),
            Err(e) => {
                warn!("Swap {} rejected: {}", round, e);
                rejected.push(json!({ "round": round, "error": e.to_string() }));
            }
        }
        direction = direction.reverse();
    }

    let mut tracker = SequenceTracker::new();
    for event in events.lock().iter() {
        tracker
            .track(event.sequence())
            .context("Event stream out of order")?;
    }

    let pool = serde_json::to_value(engine.snapshot(pool_id)?)?;
    let report = json!({
        "pool": pool,
        "initial_shares": shares,
        "stats": engine.stats(),
        "events": tracker.last_sequence(),
        "rejected": rejected,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

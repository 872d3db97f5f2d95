//! # Vending Simulator
//!
//! Mounts a machine and replays one customer interaction against it.
//!
//! ## Usage
//! ```bash
//! # Show the default machine
//! cargo run -p vending-sim -- --show
//!
//! # Pay ₩1,100 cola with ₩1,000 + ₩500, get ₩400 back
//! cargo run -p vending-sim -- --insert 1000 --insert 500 --buy Cola
//!
//! # Card purchase against a custom machine
//! cargo run -p vending-sim -- --config ./machine.json --buy Water --card
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing::{error, info};
use vending_core::PaymentMethod;
use vending_sim::{init_tracing, MachineConfig, MachineError, VendingMachine};

#[derive(Debug, Parser)]
#[command(name = "vending-sim", version, about = "Vending machine change simulator")]
struct Args {
    /// JSON machine config (MachineInit shape, optional `denominations`)
    #[arg(long, env = "VENDING_CONFIG")]
    config: Option<PathBuf>,

    /// Coin or note to insert; repeat for several
    #[arg(long = "insert", value_name = "VALUE")]
    inserts: Vec<i64>,

    /// Item to buy
    #[arg(long, value_name = "NAME")]
    buy: Option<String>,

    /// Pay by card instead of inserted cash
    #[arg(long)]
    card: bool,

    /// Print the machine state after the interaction
    #[arg(long)]
    show: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            println!("{}", json!({ "error": err }));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), MachineError> {
    let config = match &args.config {
        Some(path) => MachineConfig::from_file(path)?,
        None => MachineConfig::from_env()?,
    };
    let mut machine = VendingMachine::new(&config)?;

    if let Err(rejected) = machine.insert_all(&args.inserts) {
        error!(code = ?rejected.error.code, "{}", rejected.error.message);
        println!("{}", json!(rejected));
        return Ok(());
    }

    if let Some(name) = &args.buy {
        let method = if args.card {
            PaymentMethod::Card
        } else {
            PaymentMethod::Cash
        };

        match machine.purchase(name, method) {
            Ok(receipt) => {
                info!(change = %receipt.change_amount(), "Change paid out");
                println!("{}", json!({ "receipt": receipt }));
            }
            Err(err) => {
                let returned = machine.cancel();
                println!("{}", json!({ "error": err, "returned": returned }));
            }
        }
    }

    let returned = machine.cancel();
    if !returned.is_empty() {
        println!("{}", json!({ "returned": returned }));
    }

    if args.show {
        println!("{}", json!({ "machine": machine.snapshot() }));
    }

    Ok(())
}

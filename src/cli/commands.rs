//! CLI commands for the fee admission tool
//!
//! Implements all command handlers for the CLI interface.

use crate::admission::{required_fees, AdmissionDecorator, Admitted, PipelineStage};
use crate::config::{read_json, ConfigStore, GlobalFeeParams, NodeFeeConfig};
use crate::core::{PriceTable, Tx};
use std::path::Path;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub store: ConfigStore,
    pub config: NodeFeeConfig,
}

impl AppState {
    /// Load the node config from the data directory
    pub fn new(data_dir: &Path) -> CliResult<Self> {
        let store = ConfigStore::new(data_dir)?;
        let config = store.load()?;
        Ok(Self { store, config })
    }

    /// Governance params from `path`, or none
    fn params(&self, path: Option<&Path>) -> CliResult<GlobalFeeParams> {
        match path {
            Some(path) => Ok(self.store.load_params(path)?),
            None => Ok(GlobalFeeParams::default()),
        }
    }
}

/// Write a fresh fee config
pub fn cmd_init(data_dir: &Path, min_gas_prices: Option<&str>, force: bool) -> CliResult<()> {
    let store = ConfigStore::new(data_dir)?;

    if store.exists() && !force {
        println!("⚠️  Fee config already exists in {:?}", data_dir);
        println!("   Use --force to overwrite it");
        return Ok(());
    }

    let config = NodeFeeConfig {
        minimum_gas_prices: min_gas_prices.unwrap_or_default().to_string(),
        ..Default::default()
    };
    store.save(&config)?;

    println!("✅ Fee config initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   💲 Minimum gas prices: [{}]", config.local_prices()?);
    println!(
        "   🔓 Bypass message types: {}",
        config.bypass_min_fee_msg_types.len()
    );

    Ok(())
}

/// Show the node config
pub fn cmd_config_show(state: &AppState) -> CliResult<()> {
    println!("⚙️  Fee config ({:?})", state.store.data_dir());
    println!("   Minimum gas prices: [{}]", state.config.local_prices()?);
    println!("   Bypass message types:");
    for url in &state.config.bypass_min_fee_msg_types {
        println!("   └─ {}", url);
    }
    Ok(())
}

/// Run the admission check on a transaction file. Returns whether it passed.
pub fn cmd_check(
    state: &AppState,
    tx_path: &Path,
    params_path: Option<&Path>,
    stage: PipelineStage,
) -> CliResult<bool> {
    let tx: Tx = read_json(tx_path)?;
    tx.validate_basic()?;

    let params = state.params(params_path)?;
    let decorator = AdmissionDecorator::new(
        state.config.bypass_set(),
        state.config.local_prices()?,
        params.minimum_gas_prices,
    );

    let id = tx.id();
    println!("🔎 Checking tx {} at {} stage", id.get(..16).unwrap_or(&id), stage);
    println!("   ├─ Messages: {}", tx.messages.len());
    println!("   ├─ Fee: [{}]", tx.fee);
    println!("   └─ Gas limit: {}", tx.gas_limit);

    match decorator.check(&tx, stage) {
        Ok(admitted) => {
            let reason = match admitted {
                Admitted::StageExempt => "stage does not enforce a fee floor",
                Admitted::Bypassed => "all messages are fee-exempt",
                Admitted::FeeAccepted => "fee meets the minimum",
            };
            println!("\n✅ Accepted: {}", reason);
            Ok(true)
        }
        Err(rejection) => {
            println!("\n❌ Rejected: {}", rejection);
            for required in rejection.required().iter() {
                println!("   └─ pay at least {}", required);
            }
            Ok(false)
        }
    }
}

/// Print the effective minimum gas prices and the fee for a gas limit
pub fn cmd_effective(
    state: &AppState,
    params_path: Option<&Path>,
    gas_limit: Option<u64>,
) -> CliResult<()> {
    let local = state.config.local_prices()?;
    let network = state.params(params_path)?.minimum_gas_prices;
    let decorator = AdmissionDecorator::new(state.config.bypass_set(), local.clone(), network.clone());
    let effective = decorator.effective_prices();

    println!("💲 Minimum gas prices");
    println!("   ├─ Local: [{}]", local);
    println!("   ├─ Network: [{}]", network);
    println!("   └─ Effective: [{}]", effective);

    if let Some(gas_limit) = gas_limit {
        print_required(&effective, gas_limit);
    }
    Ok(())
}

fn print_required(effective: &PriceTable, gas_limit: u64) {
    if effective.is_empty() {
        println!("\n   No fee floor for gas limit {}", gas_limit);
        return;
    }
    println!("\n   Any one of, for gas limit {}:", gas_limit);
    for required in required_fees(effective, gas_limit).iter() {
        println!("   └─ {}", required);
    }
}

/// Validate a governance params file
pub fn cmd_params_validate(path: &Path) -> CliResult<()> {
    let params: GlobalFeeParams = read_json(path)?;
    params.validate()?;

    println!("✅ Params valid");
    if params.minimum_gas_prices.is_empty() {
        println!("   └─ No network minimum gas prices (local prices apply)");
    } else {
        println!("   └─ Minimum gas prices: [{}]", params.minimum_gas_prices);
    }
    Ok(())
}

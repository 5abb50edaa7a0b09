use multi_robot_ledger::adapters::inbound::{FileLedger, InMemoryLedger};
use multi_robot_ledger::adapters::outbound::{init_combined_logger, init_tracing_logger};
use multi_robot_ledger::application::MultiRobotContract;
use multi_robot_ledger::config::LedgerBackend;
use multi_robot_ledger::{Config, LedgerStub};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: multi-robot-ledger init | <getWorkspace|getAllPaths|setMyPath> [args...]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::var("MULTI_ROBOT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));
    let config = Config::load(Some(config_path.as_path()))?;

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((function, rest)) = args.split_first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let ledger: Arc<dyn LedgerStub> = match config.ledger.backend {
        LedgerBackend::Memory => Arc::new(InMemoryLedger::new()),
        LedgerBackend::File => Arc::new(FileLedger::open(&config.ledger.data_dir)?),
    };
    info!(backend = ?config.ledger.backend, "Ledger opened");

    let logger = match &config.logging.file {
        Some(file) => {
            let level = config
                .logging
                .level
                .parse::<log::LevelFilter>()
                .unwrap_or(log::LevelFilter::Info);
            init_combined_logger(file, level)
        }
        None => init_tracing_logger("multi-robot"),
    };

    let workspace = config.resolve_workspace().await?;
    let contract = MultiRobotContract::new(ledger, logger, workspace);

    let response = if function == "init" {
        contract.init()
    } else {
        // a memory ledger starts empty on every run
        if config.ledger.backend == LedgerBackend::Memory {
            let init = contract.init();
            if !init.is_success() {
                error!("{}", init.message);
                std::process::exit(1);
            }
        }
        contract.invoke(function, rest)
    };

    if !response.is_success() {
        error!("{} failed: {}", function, response.message);
        std::process::exit(1);
    }
    if !response.payload.is_empty() {
        println!("{}", String::from_utf8_lossy(&response.payload));
    }
    Ok(())
}

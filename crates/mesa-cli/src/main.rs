//! mesa - interactive command-line front-end.
//!
//! Reads commands from stdin one line at a time and feeds them through the
//! router, which keeps appends to the interaction memory serialized: one
//! command, one response, one log write.

use std::io::{BufRead, Write};

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mesa_agents::Router;
use mesa_core::MesaConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("mesa_agents=debug".parse()?),
        )
        .init();

    // Configuration: a file named by MESA_CONFIG, otherwise the environment
    let config = match std::env::var("MESA_CONFIG") {
        Ok(path) => MesaConfig::from_file(&path)?,
        Err(_) => MesaConfig::from_env(),
    };
    info!(
        databases_dir = %config.databases_dir.display(),
        default_database = %config.default_database,
        "starting mesa"
    );

    let router = Router::from_config(&config)?;

    println!("mesa - data integration and lookup assistant");
    println!(
        "Commands: 'connect: <db>', 'analyze file: <path>', \
         'search: <table>, <question>', 'search history: <keyword>', 'history'."
    );
    println!("Type 'exit' to quit.");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    loop {
        print!("> ");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        let response = router.handle(message).await;
        println!("{}", response);
    }

    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(name = "denning")]
#[command(about = "Ask questions about UK law, answered from the ingested legislation", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (default: config.toml layered with config.<RUST_ENV>.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    denning_cli::init_tracing();
    println!("{}", denning_cli::BANNER);

    let mut agent = match denning_cli::load_agent(cli.config.as_deref()) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("\nFATAL ERROR: Could not initialize the Denning agent: {e}");
            eprintln!("Please ensure your configuration file and the HUGGINGFACE_API_KEY environment variable are set up correctly.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let stdin = std::io::stdin();
    denning_cli::run_repl(&mut agent, stdin.lock(), std::io::stdout())?;
    Ok(ExitCode::SUCCESS)
}

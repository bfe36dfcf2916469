//! forgeteam command line entry point

use clap::Parser;

use forgeteam::Result;
use forgeteam::cli::{self, Cli, Commands, GlobalOptions, StateCommands};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Plan { file } => cli::apply::plan(&file, &opts).await,
        Commands::Apply {
            file,
            yes,
            parallelism,
        } => cli::apply::apply(&file, yes, parallelism, &opts).await,
        Commands::Destroy { target, yes } => {
            cli::apply::destroy(target.as_deref(), yes, &opts).await
        }
        Commands::Lookup { org, name } => cli::lookup::run(&org, &name, &opts).await,
        Commands::State(state_cmd) => match state_cmd {
            StateCommands::List => cli::state::list(&opts),
            StateCommands::Show { address } => cli::state::show(&address, &opts),
            StateCommands::Rm { address } => cli::state::rm(&address, &opts),
        },
        Commands::Completion { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        Commands::Version => {
            println!("forgeteam version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_logging(debug: bool) {
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }
}

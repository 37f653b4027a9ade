use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use dwellword::config::{DataPaths, ResolverParams};
use dwellword::Dataset;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    data: DataPaths,

    /// JSON resolver parameters; explicit flags still win.
    #[arg(global = true, long)]
    params: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Suggest(cmd::suggest::SuggestArgs),
    Session(cmd::session::SessionArgs),
    Replay(cmd::replay::ReplayArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing dwellword...");

    let cli_params = match &cli.command {
        Commands::Suggest(args) => &args.resolver,
        Commands::Session(args) => &args.resolver,
        Commands::Replay(args) => &args.resolver,
    };

    // Arguments like --top-k live inside the subcommand's matches, not the root.
    let params = match &cli.params {
        Some(path) => {
            info!("⚙️  Loading resolver parameters from: {}", path);
            let mut file_params = ResolverParams::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            if let Some((_, sub_matches)) = matches.subcommand() {
                file_params.merge_from_cli(cli_params, sub_matches);
            }
            file_params
        }
        None => cli_params.clone(),
    };

    if let Err(e) = params.validate() {
        error!("{}", e);
        process::exit(1);
    }

    let dataset = match Dataset::load(&cli.data) {
        Ok(d) => d,
        Err(e) => {
            error!("❌ FATAL ERROR LOADING DATASET:");
            error!("   {}", e);
            process::exit(1);
        }
    };

    let outcome = match cli.command {
        Commands::Suggest(args) => {
            cmd::suggest::run(args, params, &dataset);
            Ok(())
        }
        Commands::Session(args) => cmd::session::run(args, params, &dataset),
        Commands::Replay(args) => cmd::replay::run(args, params, &dataset),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}

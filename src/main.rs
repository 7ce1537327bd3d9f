use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use keysuggest::dictionary::loader::load_dictionary;
use keysuggest::geometry::KeyboardLayout;
use keysuggest::PolicyConfig;
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list, one `word<TAB>probability` per line.
    #[arg(global = true, short, long, default_value = "data/words.tsv")]
    dict: String,

    /// Bigram list, `prev<TAB>word<TAB>encoded` per line.
    #[arg(global = true, short, long)]
    bigrams: Option<String>,

    /// Keyboard layout JSON. Defaults to the built-in QWERTY block.
    #[arg(global = true, short = 'k', long)]
    layout: Option<String>,

    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Suggest(cmd::suggest::SuggestArgs),
    Operations(cmd::operations::OperationsArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let args = match cli.command {
        Commands::Operations(args) => {
            cmd::operations::run(args);
            return;
        }
        Commands::Suggest(args) => args,
    };
    let sub_matches = matches.subcommand_matches("suggest").unwrap_or(&matches);

    let config = match &cli.weights {
        Some(path) => {
            info!("⚖️  Loading Weights from: {}", path);
            let mut file_config = PolicyConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(&args.config, sub_matches);
            file_config
        }
        None => args.config.clone(),
    };
    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(1);
    }

    let layout = match &cli.layout {
        Some(path) => {
            info!("📂 Loading Layout: {}", path);
            KeyboardLayout::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            })
        }
        None => {
            warn!("No layout given. Using built-in QWERTY.");
            KeyboardLayout::qwerty()
        }
    };

    let dictionary = load_dictionary(&cli.dict, cli.bigrams.as_ref()).unwrap_or_else(|e| {
        error!("❌ FATAL ERROR LOADING DICTIONARY: {}", e);
        process::exit(1);
    });

    if let Err(e) = cmd::suggest::run(args, &config, &dictionary, &layout) {
        error!("{}", e);
        process::exit(1);
    }
}

mod cli;
mod fmt;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Parse {
            file,
            mapping,
            format,
            lenient,
        } => cli::parse::run(file, mapping, format, lenient),
        Commands::Mapping { mapping } => cli::mapping::list(mapping),
        Commands::Classify { text, mapping } => cli::classify::run(&text, mapping),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

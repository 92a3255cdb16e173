use clap::{Parser, Subcommand};
use izi_cli::commands::{fix, version};
use izi_cli::logging;

#[derive(Parser)]
#[command(name = "izi", version, about = "IZI CLI — manage and upgrade IZIGo applications")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fix the application by making it compatible with newer versions of IZIGo
    Fix,
    /// Print the current IZI version
    Version {
        /// Output format
        #[arg(short = 'o', long = "output", value_enum)]
        output: Option<version::OutputFormat>,
    },
}

fn main() {
    logging::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fix => {
            version::show_short_banner();
            fix::run()
        }
        Commands::Version { output } => version::run(output),
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}

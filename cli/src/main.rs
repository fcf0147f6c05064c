use anyhow::Result;
use clap::Parser;

mod menu;
mod play;

#[derive(Parser, Debug)]
#[command(version, about = "Classic minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a board seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    let stdin = std::io::stdin();
    menu::run(&mut stdin.lock(), args.seed)
}

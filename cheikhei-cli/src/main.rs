//! Command-line demo for Meitei Mayek sentence segmentation

use clap::Parser;

use cheikhei_cli::commands::split::SplitArgs;

fn main() {
    let args = SplitArgs::parse();
    if let Err(e) = args.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

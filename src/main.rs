//! # Scanner feed decoding tool
#![warn(missing_docs)]

mod cli;

use clap::Parser;
use color_eyre::eyre;

/// Decode recorded scanner page feeds into image files
#[derive(Parser)]
#[clap(version)]
enum Command {
    /// Decode one or more recorded pages into image files
    Decode(cli::decode::DecodeOpts),
    /// Print the bitmap header of a recorded page
    Header(cli::header::HeaderOpts),
}

fn main() -> eyre::Result<()> {
    let command = Command::parse();
    match command {
        Command::Decode(opt) => {
            cli::init(opt.verbose)?;
            cli::decode::run(opt)
        }
        Command::Header(opt) => {
            cli::init(opt.verbose)?;
            cli::header::run(opt)
        }
    }
}

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use log::{debug, info};
use rasterfeed::encode::{write_page, OutputFormat};
use rasterfeed::session::file::FileSession;
use rasterfeed::{decode_page, DecodeOptions, PixelAccess, ScanSession};

#[derive(Parser)]
/// Options for decoding recorded pages
pub struct DecodeOpts {
    /// Recorded page streams, one file per page
    #[clap(required = true)]
    files: Vec<PathBuf>,
    /// Output file format (`png` or `jpg`)
    #[clap(short, long, default_value = "png", parse(try_from_str))]
    format: OutputFormat,
    /// Directory for the output files
    #[clap(short, long, default_value = ".")]
    out: PathBuf,
    /// Upper bound for a single simulated driver chunk
    #[clap(long)]
    chunk_len: Option<usize>,
    /// Show debug messages
    #[clap(short, long)]
    pub verbose: bool,
}

pub fn run(opt: DecodeOpts) -> eyre::Result<()> {
    let mut options = DecodeOptions::default();
    if let Some(chunk_len) = opt.chunk_len {
        options.chunk_len = chunk_len;
    }
    let mut session = FileSession::new(opt.files);
    let mut index = 0;
    while !session.end_of_feed() {
        index += 1;
        let page = decode_page(&mut session, &options)?;
        let (width, height) = page.dimensions();
        debug!("decoded page {} ({}x{})", index, width, height);
        let name = format!("page{}.{}", index, opt.format.extension());
        write_page(&page, &opt.out.join(name), opt.format)?;
    }
    if index == 0 {
        info!("the feed was empty");
    }
    Ok(())
}

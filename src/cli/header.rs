use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use log::warn;
use rasterfeed::bmp::HEADER_PREFIX_LEN;
use rasterfeed::decode::read_header;
use rasterfeed::session::file::FileSession;
use rasterfeed::PageStream;

#[derive(Parser)]
/// Options for inspecting a recorded page
pub struct HeaderOpts {
    /// The recorded page stream to inspect
    file: PathBuf,
    /// Show debug messages
    #[clap(short, long)]
    pub verbose: bool,
}

pub fn run(opt: HeaderOpts) -> eyre::Result<()> {
    let mut session = FileSession::new(vec![opt.file]);
    let mut stream = PageStream::new(&mut session);
    let (header, raw) = read_header(&mut stream)?;
    if !header.is_bmp() {
        warn!("magic bytes are not `BM`");
    }
    println!("{:#?}", header);
    println!("palette: {} bytes", raw.len() - HEADER_PREFIX_LEN);
    Ok(())
}

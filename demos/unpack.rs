//! Unpack a single archive member to a file.
//!
//! ```text
//! cargo run --example unpack -- --method pp20 title.pp out.raw
//! cargo run --example unpack -- --method bopa --size 64000 raw_member.bin out.raw
//! ```

use bopa_pp20::{crc16, formats, DecodeOptions, Method};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;
use std::fs;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Unpack a PP20, BoPa or RLE archive member",
    long_about = "
    Without --size the member is expected to carry its own framing: a PP20
    footer (optionally behind the PP20 magic) or the 18 byte BoPa header.
    With --size the input is treated as a bare stream of that method."
)]
struct Args {
    /// Packed member to read
    #[clap()]
    input: String,

    /// Where to write the unpacked bytes
    #[clap()]
    output: Option<String>,

    /// Compression method: pp20, bopa or rle
    #[clap(short = 'm', long = "method")]
    method: Method,

    /// Decode a bare stream into this many bytes
    #[clap(short = 's', long = "size")]
    size: Option<usize>,

    /// Reject truncated or out of range streams
    #[clap(long = "strict")]
    strict: bool,

    /// Sets verbosity. -v0 is silent, -v5 traces every match
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let data = fs::read(&args.input)?;
    let options = DecodeOptions::new().strict(args.strict);

    let unpacked = match (args.method, args.size) {
        (method, Some(size)) => method.decompress(&data, size, options)?,
        (Method::Pp20, None) => formats::unpack_pp20_file(&data, options)?,
        (Method::Bopa, None) => formats::unpack_bopa_file(&data, options)?,
        (Method::Rle, None) => return Err("rle members carry no size, pass --size".into()),
    };

    info!(
        "{}: {} {} -> {} bytes, crc16 {:04x}",
        args.input,
        args.method,
        data.len(),
        unpacked.len(),
        crc16(&unpacked)
    );

    if let Some(path) = &args.output {
        fs::write(path, &unpacked)?;
        info!("wrote {}", path);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.v);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

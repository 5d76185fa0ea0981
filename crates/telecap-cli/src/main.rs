// crates/telecap-cli/src/main.rs

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use telecap_core::decode::frame::FrameDecoder;
use telecap_core::{convert, ByteSource, ConvertOptions, OutputFormat, UnitSystem};

const STDIN_TAG: &str = "stdin";
const STDOUT_TAG: &str = "stdout";

#[derive(Parser)]
#[command(name = "telecap")]
#[command(about = "Telemetry stream converter to VTT/SRT captions or JSON", long_about = None)]
struct Cli {
    /// Telemetry stream to read, or 'stdin'
    #[arg(short, long)]
    input: String,

    /// File to write, or 'stdout'
    #[arg(short, long)]
    output: String,

    /// Output format: vtt, srt or json
    #[arg(short = 't', long, default_value = "vtt")]
    format: String,

    /// Offset in milliseconds to sync the video and the telemetry stream.
    /// Positive: the offset-th second of telemetry shows at the first second
    /// of the video. Negative: telemetry starts at abs(offset) into the video.
    #[arg(short = 'f', long, default_value_t = 0)]
    offset: i64,

    /// Insert N (0-5) interpolated samples between device timestamps
    #[arg(short, long, default_value_t = 0)]
    smooth: u8,

    /// Unit system: metric (alias iso) or imperial
    #[arg(short = 'v', long, default_value = "metric")]
    units: String,

    /// Fields to process, comma delimited (default all):
    /// speed,distance,heartrate,altitude,power,cadence,temperature
    #[arg(short, long, default_value = "")]
    data: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // keep the payload clean when it shares stdout with us
    let max_level = if cli.output == STDOUT_TAG {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = ConvertOptions {
        format: OutputFormat::from_name(&cli.format)?,
        units: UnitSystem::from_name(&cli.units)?,
        offset_ms: cli.offset,
        smoothing: cli.smooth,
        fields: telecap_core::field::mask_from_names(&cli.data),
    };

    let mut source = if cli.input == STDIN_TAG {
        ByteSource::stdin()
    } else {
        ByteSource::open(&cli.input).with_context(|| format!("open input: {}", cli.input))?
    };
    let mut decoder = FrameDecoder::new();

    let payload = convert(&mut source, &mut decoder, &opts)?;

    if cli.output == STDOUT_TAG {
        std::io::stdout().write_all(payload.as_bytes())?;
    } else {
        std::fs::write(&cli.output, payload).with_context(|| format!("write output: {}", cli.output))?;
    }
    Ok(())
}

use clap::Parser;
use nordnet_dinero::{
    AccountChart, ConvertResult, DineroFile, DineroWriter, NordnetReader, Pipeline,
    PipelineOptions, SourceOrder, VoucherNumber,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "nordnet-dinero",
    version,
    about = "Convert a Nordnet transaction export into a Dinero ledger import"
)]
struct Cli {
    /// Nordnet export (UTF-16LE, tab separated)
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output file (stdout by default)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Next free voucher number in Dinero
    #[arg(short = 'v', long = "voucher-start")]
    voucher_start: VoucherNumber,

    /// JSON file overriding account codes and VAT type
    #[arg(long = "chart")]
    chart: Option<PathBuf>,

    /// The export is already ordered oldest first
    #[arg(long = "oldest-first")]
    oldest_first: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the ledger
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> ConvertResult<()> {
    let chart = match &cli.chart {
        Some(path) => AccountChart::from_json_file(path)?,
        None => AccountChart::default(),
    };
    let options = PipelineOptions {
        starting_voucher: cli.voucher_start,
        source_order: if cli.oldest_first {
            SourceOrder::OldestFirst
        } else {
            SourceOrder::NewestFirst
        },
        chart,
    };

    let source = NordnetReader::open(&cli.input)?;
    match &cli.output {
        Some(path) => Pipeline::new(source, DineroFile::new(path), options).run()?,
        None => Pipeline::new(source, DineroWriter::new(io::stdout().lock()), options).run()?,
    };

    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "conversion failed");
            ExitCode::FAILURE
        }
    }
}

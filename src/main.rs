use anyhow::Context;
use clap::Parser;
use heic_convert::cli::Args;
use heic_convert::decode::LibHeifDecoder;
use heic_convert::{convert_batch, failure, logger, print_report, ConvertOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            failure!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let options = ConvertOptions::new(args.source, args.format, args.out, args.quality)?
        .with_optimize_png(args.optimize)
        .with_jobs(args.jobs)
        .with_progress(!args.no_progress);

    log::debug!("{:?}", options);

    let report = convert_batch(&options, &LibHeifDecoder::new())
        .with_context(|| format!("Converting {} failed", options.source.display()))?;

    print_report(&report, &options.output_dir);

    if report.is_total_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

use std::process::ExitCode;

use clap::Parser;

use checker::{
    args::Args,
    logging::init_logging,
    run::{apply_overrides, run, write_report},
};
use common::{log_error, log_info};
use symval::Oracle;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    log_info!("Starting the checker");

    let mut config = match symval::config::load() {
        Ok(config) => config,
        Err(e) => {
            log_error!("Failed to load the configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &args);

    if let Some(jobs) = args.jobs {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            log_error!("Failed to set up the worker pool: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let oracle = match Oracle::new(config) {
        Ok(oracle) => oracle,
        Err(e) => {
            log_error!("The operator table is inconsistent: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reports = run(&oracle, &args.selected_kinds(), &args.ops);
    let format = args.output_format.unwrap_or_default();
    let mut stdout = std::io::stdout().lock();
    for report in &reports {
        if let Err(e) = write_report(&mut stdout, format, report) {
            log_error!("Failed to write the report: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let failures = reports.iter().map(|r| r.failures.len()).sum::<usize>();
    log_info!(
        "Checked {} kinds, {} cases, {} failures",
        reports.len(),
        reports.iter().map(|r| r.checked).sum::<usize>(),
        failures
    );
    if failures > 0 && !args.silent {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

use clap::Parser;
use cobench_cli::app::{self, Outcome, SingleRun};
use cobench_cli::cli::Args;
use cobench_cli::console::{ns_to_ms, render_report, render_sweep};
use cobench_common::CoBenchError;
use cobench_core::{CancelToken, Clock, MonotonicClock, TimeZero};
use std::process;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    let config = args.to_config().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(3);
    });

    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
    let time_zero = TimeZero::capture(clock.as_ref());

    let cancel = CancelToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling the run");
            ctrl_c.cancel();
        }
    });

    let rank = config.percentile_rank;
    let worker_config = config.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        app::execute(&worker_config, clock, time_zero, &cancel)
    })
    .await
    .unwrap_or_else(|e| {
        eprintln!("Benchmark thread failed: {e}");
        process::exit(1);
    });

    let exit_code = match outcome {
        Ok(Outcome::Single(run)) => print_single(&config, &run, args.strict),
        Ok(Outcome::Sweep(rows)) => {
            print!("{}", render_sweep(&rows, rank));
            0
        }
        Err(CoBenchError::Cancelled { recorded }) => {
            eprintln!("Run cancelled; {recorded} partially recorded requests discarded");
            1
        }
        Err(e @ CoBenchError::InvalidConfig(_)) => {
            eprintln!("{e}");
            3
        }
        Err(e) => {
            eprintln!("Benchmark failed: {e}");
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_single(config: &cobench_common::BenchConfig, run: &SingleRun, strict: bool) -> i32 {
    println!("Load:          {}", run.load);
    println!("Task:          {}", run.task);
    println!("Requests:      {} (+{} warm-up)", config.request_count, config.warmup_count);
    println!("Workers:       {}", config.workers);
    println!("Measured in:   {:.1} ms", ns_to_ms(run.elapsed_ns));
    println!();
    print!("{}", render_report(&run.analysis.report));

    if let Some(path) = &config.raw_csv {
        match &run.export_error {
            None => println!("\nRaw stat written to {}", path.display()),
            Some(e) => {
                eprintln!("{e}");
                return 1;
            }
        }
    }

    if strict && run.analysis.report.anomaly_count() > 0 {
        return 2;
    }
    0
}

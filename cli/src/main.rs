//! Verification and benchmark CLI for the fused convolution kernels.
//!
//! Usage:
//!   fftconv verify --factorization 16x16x16 --batch 8
//!   fftconv bench --factorization 16x32x32 --backward --json

use std::time::Instant;

use clap::{Parser, Subcommand};
use num_complex::Complex64;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fftconv_config::Factorization;
use fftconv_core::test_utils::{self, TestGeometry};
use fftconv_core::{reference, MonarchPlan};
use fftconv_fused::{backward, forward};

#[derive(Parser)]
#[command(name = "fftconv", about = "Fused FFT convolution kernels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the kernels against the f64 reference
    Verify(VerifyArgs),
    /// Time the forward and backward launches
    Bench(BenchArgs),
}

#[derive(Parser, Debug)]
struct VerifyArgs {
    /// Radix factorization: 16x16, 16x16x16, or 16x32x32
    #[arg(long, default_value = "16x16")]
    factorization: Factorization,

    #[arg(long, default_value = "4")]
    batch: usize,

    #[arg(long, default_value = "2")]
    channels: usize,

    #[arg(long, default_value = "42")]
    seed: u64,

    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Parser, Debug)]
struct BenchArgs {
    /// Radix factorization: 16x16, 16x16x16, or 16x32x32
    #[arg(long, default_value = "16x16x16")]
    factorization: Factorization,

    #[arg(long, default_value = "8")]
    batch: usize,

    #[arg(long, default_value = "4")]
    channels: usize,

    /// Time the backward launch instead of the forward
    #[arg(long, default_value = "false")]
    backward: bool,

    #[arg(long, default_value = "3")]
    warmup: usize,

    #[arg(long, default_value = "5")]
    repeats: usize,

    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Serialize)]
struct VerifyReport {
    factorization: String,
    batch: usize,
    channels: usize,
    max_forward_err: f64,
    max_dx_err: f64,
    max_dkf_err: f64,
    pass: bool,
}

#[derive(Serialize)]
struct BenchResult {
    factorization: String,
    batch: usize,
    channels: usize,
    backward: bool,
    time_ms: f64,
    /// Complex elements processed per second.
    throughput: f64,
}

fn max_err(actual: &[Complex64], expected: &[Complex64]) -> f64 {
    actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e).norm())
        .fold(0.0, f64::max)
}

fn verify(args: &VerifyArgs) -> Result<VerifyReport, Box<dyn std::error::Error>> {
    let geo = TestGeometry::new(args.factorization, args.batch, args.channels);
    tracing::info!(
        factorization = %args.factorization,
        batch = args.batch,
        channels = args.channels,
        seed = args.seed,
        "verifying against the f64 reference"
    );
    let plan = MonarchPlan::new(geo.config())?;
    let x = test_utils::random_signals(geo, args.seed);
    let filter = test_utils::random_filter(geo, args.seed.wrapping_mul(31) + 1);
    let dout = test_utils::random_signals(geo, args.seed.wrapping_mul(37) + 2);
    let k_f = plan.filter_spectrum(&filter);

    let y = forward(&plan, &x, &k_f)?;
    let grads = backward(&plan, &x, &k_f, &dout)?;

    let mut max_forward_err = 0.0f64;
    let mut max_dx_err = 0.0f64;
    for b in 0..geo.batch {
        for h in 0..geo.channels {
            let k_f_h = k_f.channel_complex(h);
            let y_ref = reference::forward(&x.seq_complex(b, h), &k_f_h);
            max_forward_err = max_forward_err.max(max_err(&y.seq_complex(b, h), &y_ref));
            let dx_ref = reference::backward_dx(&dout.seq_complex(b, h), &k_f_h);
            max_dx_err = max_dx_err.max(max_err(&grads.dx.seq_complex(b, h), &dx_ref));
        }
    }

    let mut max_dkf_err = 0.0f64;
    for h in 0..geo.channels {
        let mut dkf_ref = vec![Complex64::new(0.0, 0.0); geo.n()];
        for b in 0..geo.batch {
            let contrib =
                reference::backward_dkf(&dout.seq_complex(b, h), &x.seq_complex(b, h));
            for (r, c) in dkf_ref.iter_mut().zip(&contrib) {
                *r += *c;
            }
        }
        max_dkf_err = max_dkf_err.max(max_err(&grads.dk_f.channel_complex(h), &dkf_ref));
    }

    Ok(VerifyReport {
        factorization: args.factorization.to_string(),
        batch: args.batch,
        channels: args.channels,
        max_forward_err,
        max_dx_err,
        max_dkf_err,
        pass: max_forward_err < 0.1 && max_dx_err < 0.1 && max_dkf_err < 0.05,
    })
}

fn bench(args: &BenchArgs) -> Result<BenchResult, Box<dyn std::error::Error>> {
    let geo = TestGeometry::new(args.factorization, args.batch, args.channels);
    tracing::info!(
        factorization = %args.factorization,
        backward = args.backward,
        warmup = args.warmup,
        repeats = args.repeats,
        "timing fused launches"
    );
    let plan = MonarchPlan::new(geo.config())?;
    let x = test_utils::random_signals(geo, 1);
    let filter = test_utils::random_filter(geo, 2);
    let dout = test_utils::random_signals(geo, 3);
    let k_f = plan.filter_spectrum(&filter);

    for _ in 0..args.warmup {
        if args.backward {
            let _ = backward(&plan, &x, &k_f, &dout)?;
        } else {
            let _ = forward(&plan, &x, &k_f)?;
        }
    }

    let mut total = 0.0;
    for _ in 0..args.repeats {
        let start = Instant::now();
        if args.backward {
            let _ = backward(&plan, &x, &k_f, &dout)?;
        } else {
            let _ = forward(&plan, &x, &k_f)?;
        }
        total += start.elapsed().as_secs_f64();
    }
    let time_ms = (total / args.repeats as f64) * 1000.0;
    let elements = (args.batch * args.channels * geo.n()) as f64;

    Ok(BenchResult {
        factorization: args.factorization.to_string(),
        batch: args.batch,
        channels: args.channels,
        backward: args.backward,
        time_ms,
        throughput: elements / (time_ms / 1000.0),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Verify(args) => {
            let report = verify(&args)?;
            if args.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                println!(
                    "{} B={} H={}: forward err {:.2e}, dx err {:.2e}, dk_f err {:.2e} -> {}",
                    report.factorization,
                    report.batch,
                    report.channels,
                    report.max_forward_err,
                    report.max_dx_err,
                    report.max_dkf_err,
                    if report.pass { "PASS" } else { "FAIL" },
                );
            }
            if !report.pass {
                std::process::exit(1);
            }
        }
        Commands::Bench(args) => {
            let result = bench(&args)?;
            if args.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!(
                    "{} B={} H={} {}: {:.3} ms, {:.3e} elem/s",
                    result.factorization,
                    result.batch,
                    result.channels,
                    if result.backward { "backward" } else { "forward" },
                    result.time_ms,
                    result.throughput,
                );
            }
        }
    }
    Ok(())
}

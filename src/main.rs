//! fixring - Benchmark & Demo Runner
//!
//! Mengukur latency push/pop dan menjalankan demo sampling window telemetry.
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=fixring=trace cargo run --release -- --iterations 1000000 --samples 32
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::ensure;
use clap::Parser;
use fixring::{OnFull, RingBuffer};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BENCH_CAPACITY: usize = 65536;
const WINDOW: usize = 8;

#[derive(Parser, Debug)]
#[clap(version, about = "Latency benchmark and sampling-window demo for fixring")]
struct Params {
    /// Jumlah operasi per benchmark
    #[clap(short, long, default_value_t = 1_000_000)]
    iterations: usize,

    /// Jumlah sample untuk demo sampling window
    #[clap(short, long, default_value_t = 32)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let params = Params::parse();
    ensure!(params.iterations > 0, "--iterations must be greater than zero");
    info!(?params, "starting fixring runner");

    println!("🚀 fixring - Fixed-Capacity Ring Buffer");
    println!("=======================================\n");

    benchmark_ring_buffer(params.iterations);
    benchmark_overwrite(params.iterations);
    demo_sampling_window(params.samples);

    println!("\n✅ All benchmarks complete!");
    Ok(())
}

fn report(label: &str, iterations: usize, elapsed: Duration) {
    let ns = elapsed.as_nanos() as f64 / iterations as f64;
    println!("  {label:<14} {ns:.2} ns/op ({:.3} μs/op)", ns / 1000.0);
}

fn benchmark_ring_buffer(iterations: usize) {
    println!("📊 Push/Pop Benchmark (capacity {BENCH_CAPACITY})");
    println!("-----------------------------------------");

    // Storage 512KB; Box::default() tetap membangun di stack dulu
    let mut rb: Box<RingBuffer<u64, BENCH_CAPACITY>> = Box::default();

    // Warm up
    for i in 0..1000 {
        rb.push(i);
    }
    rb.reset();

    let batch = iterations.min(BENCH_CAPACITY);
    let rounds = iterations.div_ceil(batch);
    let total = rounds * batch;

    let mut push_elapsed = Duration::ZERO;
    let mut pop_elapsed = Duration::ZERO;
    for _ in 0..rounds {
        let start = Instant::now();
        for i in 0..batch {
            rb.push(black_box(i as u64));
        }
        push_elapsed += start.elapsed();

        let start = Instant::now();
        for _ in 0..batch {
            black_box(rb.pop());
        }
        pop_elapsed += start.elapsed();
    }

    println!("  Operations:    {total}");
    report("Push latency:", total, push_elapsed);
    report("Pop latency:", total, pop_elapsed);
    println!(
        "  Throughput:    {:.2} M ops/sec\n",
        total as f64 / push_elapsed.as_secs_f64() / 1_000_000.0
    );
}

fn benchmark_overwrite(iterations: usize) {
    println!("📊 Full-Buffer Push Benchmark");
    println!("-----------------------------");

    let mut rb: Box<RingBuffer<u64, BENCH_CAPACITY>> = Box::default();
    rb.extend(0..BENCH_CAPACITY as u64);

    let start = Instant::now();
    for i in 0..iterations {
        rb.push(black_box(i as u64));
    }
    report("Overwrite:", iterations, start.elapsed());

    let start = Instant::now();
    for i in 0..iterations {
        rb.push_with(black_box(i as u64), OnFull::Discard);
    }
    report("Discard:", iterations, start.elapsed());
    println!();
}

/// Rolling average atas WINDOW sample terakhir, dibandingkan dengan
/// window Discard yang membeku di WINDOW sample pertama.
fn demo_sampling_window(samples: usize) {
    println!("📈 Sampling Window Demo (window {WINDOW})");
    println!("---------------------------------------");

    let mut rolling: RingBuffer<f64, WINDOW> = RingBuffer::new();
    let mut first: RingBuffer<f64, WINDOW> = RingBuffer::new();

    for i in 0..samples {
        // Sinyal sintetis: gergaji dengan periode 10
        let sample = (i % 10) as f64 * 1.5;
        rolling.push(sample);
        first.push_with(sample, OnFull::Discard);

        if rolling.is_full() && i % WINDOW == WINDOW - 1 {
            println!(
                "  t={i:<4} rolling avg {:>6.2} | first-window avg {:>6.2}",
                mean(&rolling),
                mean(&first)
            );
        }
    }

    info!(
        rolling = rolling.len(),
        first = first.len(),
        "sampling window demo finished"
    );
}

fn mean<const N: usize>(window: &RingBuffer<f64, N>) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

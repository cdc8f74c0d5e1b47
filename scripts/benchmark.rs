// scripts/benchmark.rs
use bs_engine::analytics::bs_analytic;
use bs_engine::analytics::volatility::historical_volatility;
use bs_engine::config::EngineConfig;
use bs_engine::math_utils::Timer;
use bs_engine::models::{OptionParameters, OptionType};
use bs_engine::output::write_summary_to_csv;
use bs_engine::sweep::{default_range, default_surface, sweep, Axis, SweepField, SweepRange, SweepSpec};
use bs_engine::EngineResult;
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
    rustc_flags: String,
}

impl SystemInfo {
    fn gather() -> Self {
        SystemInfo {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    evaluations: usize,
    time_ms: f64,
    throughput_per_sec: f64,
    checksum: f64,
}

impl BenchmarkResult {
    fn new(name: impl Into<String>, evaluations: usize, time_ms: f64, checksum: f64) -> Self {
        BenchmarkResult {
            name: name.into(),
            evaluations,
            time_ms,
            throughput_per_sec: evaluations as f64 / (time_ms.max(1e-9) / 1000.0),
            checksum,
        }
    }
}

fn base_params() -> EngineResult<OptionParameters> {
    OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, OptionType::Call)
}

fn run_pricing_benchmarks(base: &OptionParameters) -> EngineResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();

    for &n in &[10_000usize, 100_000, 1_000_000] {
        println!("Pricing {} options...", n);
        let mut timer = Timer::new();

        timer.start();
        let mut checksum = 0.0;
        for i in 0..n {
            let params = base.with_spot(50.0 + (i % 100) as f64);
            checksum += bs_analytic::price(&params)?.price;
        }
        results.push(BenchmarkResult::new(
            format!("Price ({}k)", n / 1000),
            n,
            timer.elapsed_ms(),
            checksum,
        ));

        timer.start();
        let mut checksum = 0.0;
        for i in 0..n {
            let params = base.with_spot(50.0 + (i % 100) as f64);
            checksum += bs_analytic::evaluate(&params)?.greeks.delta;
        }
        results.push(BenchmarkResult::new(
            format!("Price + Greeks ({}k)", n / 1000),
            n,
            timer.elapsed_ms(),
            checksum,
        ));
    }
    Ok(results)
}

fn run_sweep_benchmarks(
    base: &OptionParameters,
    config: &EngineConfig,
) -> EngineResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let mut timer = Timer::new();

    let spot_range = default_range(SweepField::Spot, base, config)?;
    let dense = SweepRange::new(spot_range.min, spot_range.max, 100_000)?;
    timer.start();
    let grid = sweep(base, &SweepSpec::Single(Axis::new(SweepField::Spot, dense)))?;
    let checksum = grid
        .as_curve()
        .map(|c| c.prices().into_iter().flatten().sum::<f64>())
        .unwrap_or(0.0);
    results.push(BenchmarkResult::new("Spot curve", dense.steps, timer.elapsed_ms(), checksum));

    let surface_spec = default_surface(base, config)?;
    timer.start();
    let grid = sweep(base, &surface_spec)?;
    let (evaluations, checksum) = grid
        .as_surface()
        .map(|s| {
            let (rows, cols) = s.shape();
            (rows * cols, s.price_surface().iter().flatten().sum::<f64>())
        })
        .unwrap_or((0, 0.0));
    results.push(BenchmarkResult::new("Spot x vol surface", evaluations, timer.elapsed_ms(), checksum));

    let prices: Vec<f64> = (0..100_000)
        .map(|i| 100.0 * (1.0 + 0.01 * ((i as f64) * 0.37).sin()))
        .collect();
    timer.start();
    let estimate = historical_volatility(&prices, config.trading_periods_per_year)?;
    results.push(BenchmarkResult::new(
        "Historical volatility",
        prices.len(),
        timer.elapsed_ms(),
        estimate.annualized,
    ));

    Ok(results)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("bs-engine Benchmark Suite");
    println!("=========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!();

    let config = EngineConfig::from_env()?;
    let base = base_params()?;

    let mut all_results = run_pricing_benchmarks(&base)?;
    println!("\nRunning sweep benchmarks...");
    all_results.extend(run_sweep_benchmarks(&base, &config)?);

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<28} {:>12} {:>12} {:>15} {:>10}",
        "Benchmark", "Evaluations", "Time (ms)", "Per second", "Checksum"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<28} {:>12} {:>12.2} {:>15.0} {:>10.4}",
            result.name,
            result.evaluations,
            result.time_ms,
            result.throughput_per_sec,
            result.checksum
        );
    }
    println!("{:=<80}", "");

    let mut summary: Vec<(&str, String)> = vec![
        ("os", system_info.os.clone()),
        ("cpu_cores", system_info.cpu_cores.to_string()),
        ("rayon_threads", system_info.rayon_threads.to_string()),
        ("rustflags", system_info.rustc_flags.clone()),
        (
            "date",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
    ];
    for result in &all_results {
        summary.push((result.name.as_str(), format!("{:.3}", result.time_ms)));
    }

    let filename = format!(
        "benchmark_results_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    write_summary_to_csv(&filename, &summary)?;
    println!("\nResults saved to: {}", filename);
    println!("Run with: cargo run --bin benchmark --release");
    Ok(())
}

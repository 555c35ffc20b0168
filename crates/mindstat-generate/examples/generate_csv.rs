use std::env;
use std::path::PathBuf;

use mindstat_generate::{GenerateOptions, GenerationEngine, GeneratorConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                options.out_dir = args.next().map(PathBuf::from).ok_or("missing --out value")?
            }
            "--seed" => {
                let value = args.next().ok_or("missing --seed value")?;
                options.seed = Some(value.parse()?);
            }
            _ => return Err(format!("unexpected argument: {arg}").into()),
        }
    }

    let engine = GenerationEngine::new(options);
    let result = engine.run(&GeneratorConfig::default())?;

    println!("dataset={}", result.dataset_path.display());
    println!("seed={}", result.report.seed);
    Ok(())
}

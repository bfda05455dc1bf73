use anyhow::{bail, Context};
use curvecam::{
    compile_curves, configure_tolerances, default_output_path, init_logging, load_curves, Config,
};
use std::path::{Path, PathBuf};

const USAGE: &str = "Usage: curvecam <job.json> [output.gcode|-] [config.json|config.toml]";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.len() > 3 || args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{}", USAGE);
        bail!("expected a job file");
    }

    let job_path = PathBuf::from(&args[0]);
    let output = match args.get(1).map(String::as_str) {
        Some("-") => None,
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_output_path(&job_path)),
    };

    let config = match args.get(2) {
        Some(path) => Config::load_from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path))?,
        None => Config::default(),
    };
    configure_tolerances(config.tolerances).context("Failed to apply tolerances")?;

    let curves = load_curves(&job_path)?;
    tracing::info!(
        "Compiling {} curves from {} ({} passes)",
        curves.len(),
        job_path.display(),
        config.machine.passes
    );
    let program = compile_curves(&config, &curves)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &program)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote program to {}", path.display());
        }
        None => println!("{}", program),
    }

    Ok(())
}

// main.rs - CLI entry point

use ldmixture::cli::Config;
use ldmixture::prelude::*;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    let registry = EstimatorRegistry::new();
    if args.list_estimators {
        println!("Available estimators:");
        for (name, desc) in registry.list_estimators() {
            println!("  - {}: {}", name, desc);
        }
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let genotypes = args
        .genotypes
        .clone()
        .ok_or_else(|| LdMixError::config("--genotypes is required"))?;
    let output = if args.dry_run {
        args.output.clone()
    } else {
        Some(
            args.output
                .clone()
                .ok_or_else(|| LdMixError::config("--output is required"))?,
        )
    };

    println!("🚀 ldmixture v{}", env!("CARGO_PKG_VERSION"));

    // Validate all arguments
    let validation_result = validate_args(&args)?;

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| LdMixError::config(format!("Failed to configure thread pool: {}", e)))?;
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }

    let recomb = registry
        .get_estimator(&args.recomb_estimator)
        .ok_or_else(|| LdMixError::config(format!("Unknown estimator '{}'", args.recomb_estimator)))?;
    let linkage = registry
        .get_estimator(&args.linkage_estimator)
        .ok_or_else(|| LdMixError::config(format!("Unknown estimator '{}'", args.linkage_estimator)))?;
    println!("🧮 Estimators: {} + {}", recomb.name(), linkage.name());

    let total_start = Instant::now();

    // Load block panel
    let mut panel = BlockPanel::from_file(Path::new(&genotypes))?;
    panel.apply_chromosome_filtering(
        validation_result.include_regex.as_ref(),
        validation_result.exclude_regex.as_ref(),
    )?;
    panel.log_statistics("Panel");

    let mut mixture_config = validation_result.mixture_config;
    if args.blocksize.is_none() {
        if let Some(width) = panel.inferred_blocksize() {
            mixture_config.blocksize = width;
        }
    }
    mixture_config.validate()?;

    let pairs = panel.block_pairs(validation_result.pair_mode);
    println!(
        "📊 Panel: {} chromosomes × {} blocks, {} pairs ({})",
        panel.n_chromosomes(),
        panel.n_blocks(),
        pairs.len(),
        validation_result.pair_mode.description()
    );
    println!(
        "⚙️  EM: max_steps={}, prob0={}, blocksize={}, tolerance={:e}",
        mixture_config.max_steps,
        mixture_config.prob0,
        mixture_config.blocksize,
        mixture_config.tolerance
    );

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    println!("🔄 Fitting {} block pairs...", pairs.len());
    let fits = scan_block_pairs(&panel, &pairs, &mixture_config, recomb, linkage)?;

    let supported = fits
        .iter()
        .filter(|f| f.result.supports_mixture(args.min_bic))
        .count();
    let not_converged = fits
        .iter()
        .filter(|f| f.result.termination == Termination::MaxStepsReached)
        .count();
    println!(
        "📈 {} of {} pairs support the mixture (BIC > {})",
        supported,
        fits.len(),
        args.min_bic
    );
    if not_converged > 0 {
        println!(
            "⚠️  {} pairs stopped at max_steps={} without converging",
            not_converged, mixture_config.max_steps
        );
    }

    if let Some(output) = output {
        write_results(&output, validation_result.output_format, &fits, &command_line)?;
    }
    if let Some(path) = &args.responsibilities {
        write_responsibilities(path, &panel.chromosome_ids, &fits, args.min_bic, &command_line)?;
    }

    println!(
        "✅ Completed in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}

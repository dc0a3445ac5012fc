//! Swing Analyzer - Tennis Shot Analysis Engine
//!
//! Detects and classifies tennis shots from pre-collected pose observation
//! streams, and answers playback-time pose interpolation queries.

use swing_analyzer::app::cli::{Cli, Commands, ConfigAction};
use swing_analyzer::app::config::Config;
use swing_analyzer::pipeline::analyzer::ShotAnalyzer;
use swing_analyzer::pipeline::stream::ObservationStream;
use swing_analyzer::playback::interpolator::PoseInterpolator;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Analyze { input, output } => {
            run_analyze(&input, output, &config)?;
        }
        Commands::Sample { input, time } => {
            run_sample(&input, time, &config)?;
        }
        Commands::Validate { input } => {
            run_validate(&input)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_analyze(
    input: &std::path::Path,
    output: Option<std::path::PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    info!("Analyzing {:?}", input);

    if !input.exists() {
        anyhow::bail!("Observation stream not found: {:?}", input);
    }

    let stream = ObservationStream::load(input)?;
    info!(
        "Loaded stream with {} observations ({:.1}s of video)",
        stream.len(),
        stream.metadata.video_duration
    );

    if stream.is_empty() {
        warn!("Stream is empty; nothing to analyze");
    }

    let analyzer = ShotAnalyzer::with_config(
        config.handedness.clone(),
        config.segmenter.clone(),
        config.classifier.clone(),
    );
    let source = stream
        .metadata
        .source
        .clone()
        .or_else(|| Some(input.display().to_string()));
    let report = analyzer.analyze_with_source(&stream.observations, source);

    // Print summary
    println!("\nAnalysis Complete");
    println!(
        "  Racket hand: {} ({:.0}% confidence)",
        report.handedness.racket_hand,
        report.handedness.confidence * 100.0
    );
    println!(
        "  Frames: {} total, {} analyzed pairs",
        report.stats.total_frames, report.stats.analyzed_pairs
    );
    println!("  Shots: {}", report.shots.len());

    for (i, shot) in report.shots.iter().enumerate() {
        println!(
            "    {}. {} at {:.2}s-{:.2}s ({:.0}% confidence, peak {:.1})",
            i + 1,
            shot.shot_type,
            shot.start_time,
            shot.end_time,
            shot.confidence * 100.0,
            shot.peak_velocity
        );
    }

    // Save report
    let output_path = output.unwrap_or_else(|| {
        let dir = Cli::reports_dir();
        dir.join(format!("report_{}.json", report.id))
    });
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    report.save(&output_path)?;
    println!("\nSaved report to {:?}", output_path);

    Ok(())
}

fn run_sample(input: &std::path::Path, time: f64, config: &Config) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("Observation stream not found: {:?}", input);
    }
    if !time.is_finite() {
        anyhow::bail!("Playback time must be finite, got {}", time);
    }

    let stream = ObservationStream::load(input)?;
    let interpolator =
        PoseInterpolator::with_config(&stream.observations, config.interpolator.clone());

    match interpolator.interpolate(time) {
        Some(pose) => {
            println!("Pose at {:.3}s (confidence {:.2}):", time, pose.confidence);
            for kp in &pose.keypoints {
                println!(
                    "  {:<16} x={:8.2} y={:8.2} score={:.2}",
                    format!("{:?}", kp.name),
                    kp.x,
                    kp.y,
                    kp.score
                );
            }
            Ok(())
        }
        None => {
            anyhow::bail!("Stream is empty; no pose to interpolate")
        }
    }
}

fn run_validate(input: &std::path::Path) -> anyhow::Result<()> {
    info!("Validating {:?}", input);

    if !input.exists() {
        anyhow::bail!("Observation stream not found: {:?}", input);
    }

    match ObservationStream::load(input) {
        Ok(stream) => {
            println!("Validation PASSED");
            println!("  Observations: {}", stream.len());
            println!("  Video duration: {:.1}s", stream.metadata.video_duration);
            if let Some(source) = &stream.metadata.source {
                println!("  Source: {}", source);
            }
            Ok(())
        }
        Err(e) => {
            println!("Validation FAILED:");
            println!("  {}", e);
            anyhow::bail!("Validation failed")
        }
    }
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::reports_dir())?;
    println!("\nCreated directories:");
    println!("  Reports: {:?}", Cli::reports_dir());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            // Simple key lookup in TOML output
            let value = find_toml_value(&toml_str, &key);
            match value {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let parts: Vec<&str> = key.split('.').collect();
    let leaf_key = parts.last()?;

    // Find the right section
    let mut in_section = parts.len() == 1; // Top-level key
    let section_name = if parts.len() > 1 { parts[0] } else { "" };

    for line in toml_str.lines() {
        let trimmed = line.trim();

        // Check for section header
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = &trimmed[1..trimmed.len() - 1];
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim();
                if line_key == *leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

use aioe_analysis::analysis::Analysis;
use aioe_analysis::config::AnalysisConfig;
use aioe_analysis::utils::progress::{create_main_progress_bar, finish_progress_bar};
use anyhow::{Context, bail};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

struct CliArgs {
    names: Vec<String>,
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cli) = parse_args(&args)? else {
        return Ok(());
    };

    let mut config = match &cli.config_path {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let analyses: Vec<Analysis> = if cli.names.is_empty() {
        Analysis::ALL.to_vec()
    } else {
        cli.names
            .iter()
            .map(|name| {
                Analysis::from_name(name).with_context(|| format!("unknown analysis '{name}'"))
            })
            .collect::<anyhow::Result<_>>()?
    };

    info!(
        "Running {} analyses over tables in {}",
        analyses.len(),
        config.data_dir.display()
    );
    let start = Instant::now();
    let pb = create_main_progress_bar(analyses.len() as u64, Some("Running analyses"));

    let mut artifacts = Vec::new();
    for analysis in &analyses {
        pb.set_message(analysis.name().to_string());
        let step = Instant::now();
        let mut paths = analysis.run(&config)?;
        info!("{} finished in {:?}", analysis.name(), step.elapsed());
        artifacts.append(&mut paths);
        pb.inc(1);
    }
    finish_progress_bar(&pb, Some("All analyses complete"));
    info!(
        "Finished {} analyses in {:?}",
        analyses.len(),
        start.elapsed()
    );

    for path in &artifacts {
        println!("Saved: {}", path.display());
    }
    Ok(())
}

/// Parse the command line, returning `None` after printing usage
fn parse_args(args: &[String]) -> anyhow::Result<Option<CliArgs>> {
    let mut cli = CliArgs {
        names: Vec::new(),
        config_path: None,
        data_dir: None,
        output_dir: None,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--config" => cli.config_path = Some(flag_value(&mut iter, "--config")?),
            "--data-dir" => cli.data_dir = Some(flag_value(&mut iter, "--data-dir")?),
            "--output-dir" => cli.output_dir = Some(flag_value(&mut iter, "--output-dir")?),
            other if other.starts_with('-') => bail!("unknown option '{other}'"),
            name => cli.names.push(name.to_string()),
        }
    }
    Ok(Some(cli))
}

fn flag_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> anyhow::Result<PathBuf> {
    match iter.next() {
        Some(value) => Ok(PathBuf::from(value)),
        None => bail!("option '{flag}' expects a value"),
    }
}

fn print_usage() {
    println!("Usage: aioe-analysis [NAMES...] [OPTIONS]");
    println!();
    println!("Run the AI-exposure analyses. With no names, every analysis runs.");
    println!();
    println!("Names:");
    for analysis in Analysis::ALL {
        println!("  {}", analysis.name());
    }
    println!();
    println!("Options:");
    println!("  --config <FILE>      JSON settings file");
    println!("  --data-dir <DIR>     Source table directory (default: data)");
    println!("  --output-dir <DIR>   Chart directory (default: pictures)");
    println!("  -h, --help           Show this help");
}

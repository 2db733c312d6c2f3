use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use dulog::config::Config;
use dulog::Recorder;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dulog", about = "Append current disk usage to a daily CSV file", version)]
struct Cli {
    /// Directory whose filesystem is measured (default: home directory)
    #[arg(short, long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Directory holding the daily CSV files (default: ~/disk_reports)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(short = 'C', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hold an exclusive lock on the daily file while appending
    #[arg(long)]
    lock: bool,

    /// Also print the recorded sample as JSON
    #[arg(long)]
    json: bool,

    /// Print config file path and effective values, then exit
    #[arg(long)]
    print_config: bool,

    /// Write a default config file (if none exists) and exit
    #[arg(long)]
    init_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "dulog", &mut io::stdout());
        return Ok(());
    }
    if cli.init_config {
        return run_init_config(cli.config.as_deref());
    }

    let cfg = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None       => Config::load(),
    };
    if cli.print_config {
        return run_print_config(&cli, &cfg);
    }

    let opts = cfg.options(cli.path, cli.output_dir, cli.lock);
    let recording = Recorder::from_options(&opts)?.record()?;

    println!("Wrote disk usage to: {}", recording.path.display());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&recording.sample)?);
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run_init_config(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None    => Config::config_path().context("no config directory on this platform")?,
    };
    Config::write_defaults(&path)?;
    println!("Wrote default config to: {}", path.display());
    Ok(())
}

fn run_print_config(cli: &Cli, cfg: &Config) -> Result<()> {
    let path = cli.config.clone()
        .or_else(Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    let show = |p: &Option<PathBuf>| match p {
        Some(p) => p.display().to_string(),
        None    => "(default)".to_string(),
    };

    println!("Config: {}", path);
    println!();
    println!("[paths]");
    println!("  queried_path = {}", show(&cfg.paths.queried_path));
    println!("  output_dir   = {}", show(&cfg.paths.output_dir));
    println!();
    println!("[recorder]");
    println!("  lock         = {}", cfg.recorder.lock);
    println!();

    let opts = cfg.options(cli.path.clone(), cli.output_dir.clone(), cli.lock);
    println!("Effective:");
    match opts.resolve() {
        Ok(paths) => {
            println!("  queried_path = {}", paths.queried_path.display());
            println!("  output_dir   = {}", paths.output_dir.display());
        }
        Err(e) => println!("  (unresolved: {})", e),
    }
    println!("  lock         = {}", opts.lock);
    Ok(())
}

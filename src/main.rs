//! `nsz`: creates NSZ (NZ:P Spawn Zones) files for use in maps.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bevy_log::{Level, tracing_subscriber};
use clap::Parser;
use nzp_spawn_zones::{NszConfig, convert_file};

#[derive(Parser)]
#[command(name = "nsz", version, about = "Creates NSZ (NZ:P Spawn Zones) file for use in maps.")]
struct Cli {
	/// Path to the .map file to create NSZ from
	#[arg(value_name = "MAP_FILE")]
	map_file: PathBuf,

	/// Output path for NSZ (Default: the map path with an `.nsz` extension)
	#[arg(short, long, value_name = "PATH")]
	output: Option<PathBuf>,

	/// TOML file overriding the default conversion settings
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Log more, `-vv` for everything
	#[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
	verbose: u8,

	/// Only log warnings and errors
	#[arg(short, long)]
	quiet: bool,
}

impl Cli {
	fn log_level(&self) -> Level {
		match (self.quiet, self.verbose) {
			(true, _) => Level::WARN,
			(false, 0) => Level::INFO,
			(false, 1) => Level::DEBUG,
			(false, _) => Level::TRACE,
		}
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	tracing_subscriber::fmt().with_max_level(cli.log_level()).with_target(false).with_writer(std::io::stderr).init();

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			bevy_log::error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let config = match &cli.config {
		Some(path) => NszConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => NszConfig::default(),
	};

	let output = cli.output.clone().unwrap_or_else(|| cli.map_file.with_extension("nsz"));

	convert_file(&cli.map_file, &output, &config).with_context(|| format!("converting {}", cli.map_file.display()))?;

	Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use proprdr::logging::init_logging;
use proprdr::{FloatPrecision, PropertyStore};

#[derive(Parser)]
#[command(name = "proprdr")]
#[command(
	author,
	version,
	about = "Inspect flat key=value property files"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Log debug output to stderr (RUST_LOG overrides)
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Print all properties, sorted by key
	Show {
		/// Property file to read
		file: PathBuf,

		/// Only show keys starting with this prefix
		#[arg(long)]
		prefix: Option<String>,
	},
	/// Print a single property
	Get {
		/// Property file to read
		file: PathBuf,

		/// Property key
		key: String,

		/// Type to interpret the value as
		#[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
		kind: ValueKind,

		/// Float precision in bits (32 or 64)
		#[arg(long = "bits", value_parser = parse_precision, default_value = "64")]
		precision: FloatPrecision,
	},
	/// Check a property file for errors
	Validate {
		/// Property file to check
		file: PathBuf,
	},
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueKind {
	String,
	Int,
	Float,
	Bool,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match cli.command {
		Commands::Show { file, prefix } => handle_show(&file, prefix.as_deref()),
		Commands::Get {
			file,
			key,
			kind,
			precision,
		} => handle_get(&file, &key, kind, precision),
		Commands::Validate { file } => Ok(handle_validate(&file)),
	}
}

fn parse_precision(value: &str) -> std::result::Result<FloatPrecision, String> {
	let bits: u32 = value
		.parse()
		.map_err(|_| format!("expected a bit count, got {value:?}"))?;
	FloatPrecision::from_bits(bits)
		.ok_or_else(|| format!("unsupported precision {bits}, expected 32 or 64"))
}

fn open_store(file: &Path) -> Result<PropertyStore> {
	PropertyStore::open(file).with_context(|| format!("Failed to load {}", file.display()))
}

fn handle_show(file: &Path, prefix: Option<&str>) -> Result<ExitCode> {
	let store = open_store(file)?;
	let entries = store.get_all(prefix.unwrap_or(""));

	for (key, value) in &entries {
		println!("{key}={value}");
	}

	println!("# {} of {} properties", entries.len(), store.len());
	Ok(ExitCode::SUCCESS)
}

fn handle_get(
	file: &Path,
	key: &str,
	kind: ValueKind,
	precision: FloatPrecision,
) -> Result<ExitCode> {
	let store = open_store(file)?;

	let rendered = match kind {
		ValueKind::String => store.get(key)?.to_string(),
		ValueKind::Int => store.get_as_int(key)?.to_string(),
		ValueKind::Float => store.get_as_float(key, precision)?.to_string(),
		// Missing or unparsable values print as false.
		ValueKind::Bool => store.get_as_bool(key).to_string(),
	};

	println!("{rendered}");
	Ok(ExitCode::SUCCESS)
}

fn handle_validate(file: &Path) -> ExitCode {
	match PropertyStore::open(file) {
		Ok(store) => {
			println!("Valid: {} ({} properties)", file.display(), store.len());
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("Property file error: {}", e);
			ExitCode::FAILURE
		}
	}
}

use clap::Parser;

use std::{
	error::Error,
	io::{
		self,
		BufRead,
		Write
	},
	path::PathBuf,
	process::ExitCode
};

use tracing::{
	error,
	info,
	Level
};

use xac2obj_models_emotionfx::{
	convert::{
		convert,
		ConvertCfg
	},
	xac::{
		import::XacImportError,
		ImportFlag
	}
};

const EXIT_MISSING_FILE: u8 = 1;
const EXIT_NOT_XAC: u8 = 2;

#[derive(Parser)]
#[command(name = "xac2obj")]
#[command(about = "Converts EMotion FX actors (.xac) into Wavefront OBJ meshes")]
#[command(version)]
struct Cli {
	/// Input .xac file, asked for on stdin when omitted
	input: Option<PathBuf>,

	/// Directory for the .obj files, next to the input by default
	#[arg(short, long)]
	output_dir: Option<PathBuf>,

	/// Leave the face indices of meshes failing the face/vertex check unread
	#[arg(long)]
	legacy_check: bool,

	/// Log every chunk
	#[arg(short, long, conflicts_with = "quiet")]
	verbose: bool,

	/// Only log errors
	#[arg(short, long)]
	quiet: bool,
}

/// Reads the first whitespace-delimited token from stdin
fn prompt() -> io::Result<Option<PathBuf>> {
	print!("\n>");
	io::stdout().flush()?;

	let mut stdin = io::stdin().lock();
	let mut line = String::new();
	loop {
		line.clear();
		if stdin.read_line(&mut line)? == 0 {
			return Ok(None);
		}

		if let Some(token) = line.split_whitespace().next() {
			return Ok(Some(PathBuf::from(token)));
		}
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let level = if cli.verbose {
		Level::DEBUG
	} else if cli.quiet {
		Level::ERROR
	} else {
		Level::INFO
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_target(false)
		.init();

	let input = match cli.input {
		Some(path) => path,
		None => match prompt() {
			Ok(Some(path)) => path,
			Ok(None) => {
				error!("No input file given");
				return ExitCode::FAILURE;
			},
			Err(e) => {
				error!("Unable to read the input path: {}", e);
				return ExitCode::FAILURE;
			},
		},
	};

	if !input.exists() {
		println!("\nFile {} doesn't exist!", input.display());
		return ExitCode::from(EXIT_MISSING_FILE);
	}

	let mut cfg = ConvertCfg {
		output_dir: cli.output_dir,
		..Default::default()
	};
	if cli.legacy_check {
		cfg.import.flags.remove(ImportFlag::RESYNC_ON_CHECK_FAILURE);
	}

	match convert(&input, &cfg) {
		Ok(summary) => {
			info!("{}: {} object(s) exported, {} rejected, {} unknown chunk(s)", input.display(),
				summary.exported, summary.rejected, summary.unknown_chunks);
			ExitCode::SUCCESS
		},
		Err(XacImportError::Magic(_)) => {
			println!("Not a valid XAC file!");
			ExitCode::from(EXIT_NOT_XAC)
		},
		Err(e) => {
			error!("{}: {}", input.display(), e);

			let mut source = e.source();
			while let Some(cause) = source {
				error!("  caused by: {}", cause);
				source = cause.source();
			}

			ExitCode::FAILURE
		},
	}
}

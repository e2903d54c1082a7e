use std::io::IsTerminal;
use std::io::Read;
use std::io::Write;
use std::process;

use clap::Parser;
use envsubst_cli::EnvsubstCli;
use envsubst_core::EnvsubstConfig;
use envsubst_core::EnvsubstError;
use envsubst_core::FileRoute;
use envsubst_core::KeyResolver;
use envsubst_core::LayeredSource;
use envsubst_core::LookupMode;
use envsubst_core::ProcessEnv;
use envsubst_core::ReplaceUnset;
use envsubst_core::RestrictionPolicy;
use envsubst_core::extract_names;
use envsubst_core::substitute;
use envsubst_core::substitute_files;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = EnvsubstCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(&args, use_color);

	if let Err(e) = run(&args) {
		// Render envsubst errors through miette so the error code and help
		// text are shown.
		match e.downcast::<EnvsubstError>() {
			Ok(envsubst_err) => {
				let report: miette::Report = (*envsubst_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr so substituted output on stdout stays clean.
/// `ENVSUBST_LOG` takes precedence over `--verbose`.
fn init_tracing(args: &EnvsubstCli, use_color: bool) {
	let default_level = if args.verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env("ENVSUBST_LOG")
		.unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_ansi(use_color)
		.init();
}

/// Options after merging the config file with command line flags.
#[derive(Debug)]
struct Options {
	unset_fatal: bool,
	empty_fatal: bool,
	replace_unset: ReplaceUnset,
	lookup: LookupMode,
}

fn load_config(args: &EnvsubstCli) -> Result<EnvsubstConfig, Box<dyn std::error::Error>> {
	let config = match &args.config {
		Some(path) => Some(EnvsubstConfig::load_file(path)?),
		None => EnvsubstConfig::load(&std::env::current_dir()?)?,
	};

	Ok(config.unwrap_or_default())
}

fn merge_options(args: &EnvsubstCli, config: &EnvsubstConfig) -> Options {
	Options {
		unset_fatal: args.unset_fatal || config.policy.unset_fatal,
		empty_fatal: args.empty_fatal || config.policy.empty_fatal,
		replace_unset: args
			.replace_unset
			.map_or(config.policy.replace_unset, ReplaceUnset::from),
		lookup: if args.lossy_lookup {
			LookupMode::Lossy
		} else {
			config.lookup
		},
	}
}

fn run(args: &EnvsubstCli) -> Result<(), Box<dyn std::error::Error>> {
	let shell_format = args.shell_format.as_deref();
	let names = shell_format.map(extract_names).unwrap_or_default();

	if args.variables {
		return run_variables(&names);
	}

	let config = load_config(args)?;
	let options = merge_options(args, &config);
	tracing::debug!(?options, restricted = shell_format.is_some(), "resolved options");

	let source = LayeredSource::new(config.variable_source(), ProcessEnv);
	let mapping = KeyResolver::new(&source)
		.with_mode(options.lookup)
		.resolve(shell_format.map(|_| names.as_slice()));
	let policy = RestrictionPolicy::from_options(
		options.unset_fatal,
		options.empty_fatal,
		options.replace_unset,
		mapping.is_closed(),
	);

	if !args.file.is_empty() {
		let routes = args
			.file
			.iter()
			.map(|route| route.parse::<FileRoute>())
			.collect::<Result<Vec<_>, _>>()?;

		substitute_files(&routes, &mapping, &policy, |route| {
			println!(" - {route}");
		})?;
		return Ok(());
	}

	let content = read_stdin()?;
	let output = substitute(&content, &mapping, &policy)?;

	let mut stdout = std::io::stdout().lock();
	stdout
		.write_all(output.as_bytes())
		.and_then(|()| stdout.flush())
		.map_err(|e| EnvsubstError::io("<stdout>", e))?;

	Ok(())
}

/// Print the names referenced in SHELL-FORMAT, one per line, in order.
fn run_variables(names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
	let mut stdout = std::io::stdout().lock();
	for name in names {
		writeln!(stdout, "{name}").map_err(|e| EnvsubstError::io("<stdout>", e))?;
	}

	Ok(())
}

fn read_stdin() -> Result<String, EnvsubstError> {
	let stdin = std::io::stdin();
	if stdin.is_terminal() {
		return Err(EnvsubstError::NoInput);
	}

	let mut content = String::new();
	stdin
		.lock()
		.read_to_string(&mut content)
		.map_err(|e| EnvsubstError::io("<stdin>", e))?;

	Ok(content)
}

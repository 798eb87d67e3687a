use std::env;
use std::path::PathBuf;
use std::process;

use envolve::{Config, FlagDefaults, Output};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
envolve - resolve a dotenv file against the process environment

Usage:
  envolve [OPTIONS]

Options:
  -f, --file <PATH>   Dotenv file path. Defaults to .env in the current directory.
      --no-override   Keep existing environment values on key collisions.
      --keys          Output key names only.
      --process       Output the pre-merge process environment snapshot.
      --stdout        Print the result to stdout as indented JSON.
      --debug         Print resolver diagnostics to stderr.
  -h, --help          Show this help text.
  -V, --version       Show version information.
";

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    Help,
    Version,
    Run(CliOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CliOptions {
    file: Option<PathBuf>,
    no_override: bool,
}

fn main() {
    process::exit(run(env::args().skip(1).collect()));
}

fn run(args: Vec<String>) -> i32 {
    match parse_args(&args) {
        Ok(CliCommand::Help) => {
            println!("{HELP}");
            0
        }
        Ok(CliCommand::Version) => {
            println!("envolve {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Ok(CliCommand::Run(options)) => execute(options, &args),
        Err(err) => {
            eprintln!("envolve: {err}");
            eprintln!("Try `envolve --help`.");
            1
        }
    }
}

fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = CliOptions::default();
    let mut index = 0usize;

    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "-f" | "--file" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    return Err("missing value for `-f/--file`".to_owned());
                };
                options.file = Some(parse_file_value(value)?);
                index += 1;
            }
            value if value.starts_with("--file=") => {
                options.file = Some(parse_file_value(&value["--file=".len()..])?);
                index += 1;
            }
            "--no-override" => {
                options.no_override = true;
                index += 1;
            }
            // Picked up via FlagDefaults from the raw argument list.
            "--debug" | "--keys" | "--process" | "--stdout" => {
                index += 1;
            }
            unknown => return Err(format!("unknown option `{unknown}`")),
        }
    }

    Ok(CliCommand::Run(options))
}

fn parse_file_value(raw: &str) -> Result<PathBuf, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("`-f/--file` requires a path".to_owned());
    }
    Ok(PathBuf::from(trimmed))
}

fn execute(options: CliOptions, args: &[String]) -> i32 {
    let flags = FlagDefaults::from_args(args.iter().map(String::as_str));
    init_tracing(flags.debug);

    let mut config = Config::new().with_flag_defaults(&flags);
    if let Some(file) = options.file {
        config = config.path(file);
    }
    if options.no_override {
        config = config.override_existing(false);
    }
    let output = Output::new().with_flag_defaults(&flags);

    // SAFETY: single-threaded entry point, no concurrent environment access.
    unsafe { envolve::resolve(config, output) };
    0
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ENVOLVE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{CliCommand, CliOptions, parse_args};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parse_empty_args_uses_defaults() {
        let parsed = parse_args(&args(&[])).expect("parse should succeed");
        assert_eq!(parsed, CliCommand::Run(CliOptions::default()));
    }

    #[test]
    fn parse_accepts_output_flags_without_consuming_them() {
        let parsed = parse_args(&args(&["--keys", "--stdout", "--debug", "--process"]))
            .expect("parse should succeed");
        assert_eq!(parsed, CliCommand::Run(CliOptions::default()));
    }

    #[test]
    fn parse_supports_file_forms() {
        let parsed =
            parse_args(&args(&["-f", "custom.env", "--stdout"])).expect("parse should succeed");
        let CliCommand::Run(options) = parsed else {
            panic!("expected run");
        };
        assert_eq!(options.file, Some(PathBuf::from("custom.env")));

        let parsed = parse_args(&args(&["--file=other.env"])).expect("parse should succeed");
        let CliCommand::Run(options) = parsed else {
            panic!("expected run");
        };
        assert_eq!(options.file, Some(PathBuf::from("other.env")));
    }

    #[test]
    fn parse_reports_missing_file_value() {
        let err = parse_args(&args(&["-f"])).expect_err("parse should fail");
        assert_eq!(err, "missing value for `-f/--file`");

        let err = parse_args(&args(&["--file="])).expect_err("parse should fail");
        assert_eq!(err, "`-f/--file` requires a path");
    }

    #[test]
    fn parse_rejects_unknown_options() {
        let err = parse_args(&args(&["--watch"])).expect_err("parse should fail");
        assert_eq!(err, "unknown option `--watch`");
    }

    #[test]
    fn parse_help_and_version_short_circuit() {
        assert_eq!(
            parse_args(&args(&["--stdout", "--help"])).expect("parse should work"),
            CliCommand::Help
        );
        assert_eq!(
            parse_args(&args(&["-V"])).expect("parse should work"),
            CliCommand::Version
        );
    }

    #[test]
    fn parse_no_override_sets_option() {
        let parsed = parse_args(&args(&["--no-override"])).expect("parse should succeed");
        let CliCommand::Run(options) = parsed else {
            panic!("expected run");
        };
        assert!(options.no_override);
    }
}

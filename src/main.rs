mod debug_report;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voxpense::{Classifier, ClassifierConfig};

const LOG_ENV: &str = "VOXPENSE_LOG";

fn main() {
    let config = match parse_args(std::env::args().skip(1)).and_then(with_stdin_input) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.debug);

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), voxpense::ConfigError> {
    let table = match &config.table_path {
        Some(path) => ClassifierConfig::load(path)?,
        None => ClassifierConfig::builtin(),
    };

    if config.dump_config {
        println!("{}", table.to_json_pretty()?);
        return Ok(());
    }

    let classifier = Classifier::from_config(table)?;
    let input = config.input.as_deref().unwrap_or_default();

    match config.output {
        Output::Plain => debug_report::print_result(&classifier.classify(input), config.color),
        Output::Json => println!("{}", serde_json::to_string_pretty(&classifier.classify(input))?),
        Output::Explain => debug_report::print_run(&classifier.classify_verbose(input), config.color),
        Output::ExplainJson => println!("{}", serde_json::to_string_pretty(&classifier.classify_verbose(input))?),
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("voxpense=trace")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Plain,
    Json,
    Explain,
    ExplainJson,
}

struct CliConfig {
    input: Option<String>,
    table_path: Option<PathBuf>,
    output: Output,
    color: bool,
    debug: bool,
    dump_config: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut table_path: Option<PathBuf> = None;
    let mut json = false;
    let mut explain = false;
    let mut color = io::stdout().is_terminal();
    let mut debug = false;
    let mut dump_config = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("voxpense {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--explain" => explain = true,
            "--debug" => debug = true,
            "--dump-config" => dump_config = true,
            "--config" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --config expects a value".to_string())?;
                table_path = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>();
                if !rest.is_empty() {
                    set_input(&mut input, rest.join(" "))?;
                }
                break;
            }
            _ if arg.starts_with("--config=") => {
                table_path = Some(PathBuf::from(arg.trim_start_matches("--config=")));
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let output = match (explain, json) {
        (false, false) => Output::Plain,
        (false, true) => Output::Json,
        (true, false) => Output::Explain,
        (true, true) => Output::ExplainJson,
    };

    Ok(CliConfig { input, table_path, output, color, debug, dump_config })
}

/// Blank input is classified like any other (fallback category); only a
/// missing utterance falls back to stdin.
fn with_stdin_input(mut config: CliConfig) -> Result<CliConfig, String> {
    if config.input.is_none() && !config.dump_config {
        config.input = Some(read_stdin_input()?);
    }
    Ok(config)
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "voxpense {version}

Turn a spoken expense utterance into amount, category and description.

Usage:
  voxpense [OPTIONS] [--] <utterance...>
  voxpense [OPTIONS] --input <text>
  voxpense [--config <file>] --dump-config

Options:
  -i, --input <text>         Utterance to classify. If omitted, reads remaining
                             args or stdin when no args are provided.
  -c, --config <file>        Load the category table from a JSON file instead
                             of the builtin one.
  --json                     Print the result as JSON.
  --explain                  Print tokens, per-category scores and timings.
                             Combined with --json, prints them as JSON.
  --dump-config              Print the category table as JSON and exit.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  --debug                    Emit trace logs on stderr (otherwise ${log_env}).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Invalid category config.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_input_is_passed_through() {
        let config = parse_args(args(&["--input", "   "])).unwrap();
        assert_eq!(config.input.as_deref(), Some("   "));

        let config = parse_args(args(&["--input="])).unwrap();
        assert_eq!(config.input.as_deref(), Some(""));

        let res = Classifier::builtin().classify(config.input.as_deref().unwrap_or_default());
        assert!(res.fallback);
        assert_eq!(res.extracted_description, None);
    }

    #[test]
    fn positional_words_are_joined() {
        let config = parse_args(args(&["--json", "午餐", "38块"])).unwrap();
        assert_eq!(config.input.as_deref(), Some("午餐 38块"));
        assert_eq!(config.output, Output::Json);

        let config = parse_args(args(&["--", "--json"])).unwrap();
        assert_eq!(config.input.as_deref(), Some("--json"));
        assert_eq!(config.output, Output::Plain);
    }

    #[test]
    fn explain_and_json_combine() {
        let config = parse_args(args(&["--json", "--explain", "-i", "午餐"])).unwrap();
        assert_eq!(config.output, Output::ExplainJson);
        let config = parse_args(args(&["--explain", "-i", "午餐"])).unwrap();
        assert_eq!(config.output, Output::Explain);
    }

    #[test]
    fn missing_input_is_left_for_stdin() {
        let config = parse_args(args(&["--no-color"])).unwrap();
        assert_eq!(config.input, None);
        assert!(!config.color);
    }

    #[test]
    fn argument_errors() {
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--input"])).is_err());
        assert!(parse_args(args(&["-i", "a", "b"])).is_err());
    }
}

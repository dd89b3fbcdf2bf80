mod debug_report;

use lexsift::{AnalyzedSentence, Options, disambiguate_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

const DEFAULT_LANGUAGE: &str = "en";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let options = Options { resource_dir: config.resources, builtin: config.builtin };
    match disambiguate_verbose_with(&config.language, config.input.clone(), &options) {
        Ok(res) => debug_report::print_run(&config.input, &res, config.color),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

struct CliConfig {
    input: AnalyzedSentence,
    language: String,
    resources: Option<PathBuf>,
    builtin: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut language = DEFAULT_LANGUAGE.to_string();
    let mut resources: Option<PathBuf> = None;
    let mut builtin = true;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("lexsift {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--no-builtin" => builtin = false,
            "--lang" | "-l" => {
                language = args.next().ok_or_else(|| "error: --lang expects a value".to_string())?;
            }
            "--resources" | "-r" => {
                let value = args.next().ok_or_else(|| "error: --resources expects a value".to_string())?;
                resources = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--lang=") => {
                language = arg.trim_start_matches("--lang=").to_string();
            }
            _ if arg.starts_with("--resources=") => {
                resources = Some(PathBuf::from(arg.trim_start_matches("--resources=")));
            }
            _ if arg.starts_with("--input=") => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(arg.trim_start_matches("--input=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    let input: AnalyzedSentence = input.parse().map_err(|err| format!("error: {err}"))?;

    Ok(CliConfig { input, language, resources, builtin, color })
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
        "lexsift {version}

Rule-based disambiguation of tagged sentences.

Usage:
  lexsift [OPTIONS] [--] <tagged sentence...>
  lexsift [OPTIONS] --input <tagged sentence>

Input format:
  surface=lemma/TAG|lemma/TAG ...   e.g.  He=he/PRP go=go/VB|go/VBP

Options:
  -i, --input <text>         Tagged sentence. If omitted, reads remaining args
                             or stdin when no args are provided.
  -l, --lang <code>          Language short name. Default: {default_language}
  -r, --resources <dir>      Directory with disambiguation.json and
                             <lang>/disambiguation.json (both optional).
  --no-builtin               Skip the built-in rules of the language.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  LEXSIFT_DEBUG_RULES=1      Trace fired rules and missing rule files.

Exit codes:
  0  Success.
  1  Disambiguation failed (for example a malformed rule file).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_language = DEFAULT_LANGUAGE
    )
}

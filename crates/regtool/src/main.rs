//! CLI entry point for the regtool binary.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use explorer_core::{SearchIndex, ViewConfig};
use regtool::report::{load_store, render_register, render_tree};
use regtool as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: regtool <command> [options]

Commands:
  dump   <file>                         Print the design tree with addresses
  search <file> <query>                 Print element ids matching a query
  show   <file> <id> [options]          Print one element's field values

Options (show):
  -b, --base <binary|decimal|hexadecimal>  Value display base (default: hexadecimal)
  -s, --byte-swap                          Display values with byte order swapped
  -h, --help                               Show this help message

Examples:
  regtool dump design.json
  regtool search design.json regA0
  regtool show design.json blkA.regA0 --base binary
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Dump(DumpArgs),
    Search(SearchArgs),
    Show(ShowArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct DumpArgs {
    input: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
struct SearchArgs {
    input: PathBuf,
    query: String,
}

#[derive(Debug, PartialEq, Eq)]
struct ShowArgs {
    input: PathBuf,
    id: String,
    config: ViewConfig,
}

#[derive(Debug)]
enum ParseResult {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    match command_str.as_str() {
        "dump" => parse_dump_args(args)
            .map(Command::Dump)
            .map(ParseResult::Command),
        "search" => parse_search_args(args)
            .map(Command::Search)
            .map(ParseResult::Command),
        "show" => parse_show_args(args)
            .map(Command::Show)
            .map(ParseResult::Command),
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_dump_args(args: impl Iterator<Item = OsString>) -> Result<DumpArgs, String> {
    let mut input: Option<PathBuf> = None;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| "missing input path".to_string())?;
    Ok(DumpArgs { input })
}

fn parse_search_args(args: impl Iterator<Item = OsString>) -> Result<SearchArgs, String> {
    let mut positional: Vec<String> = Vec::new();

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }
        positional.push(arg.to_string_lossy().to_string());
    }

    match positional.len() {
        0 => Err("missing input path".to_string()),
        1 => Err("missing search query".to_string()),
        2 => {
            let mut taken = positional.into_iter();
            let input = PathBuf::from(taken.next().unwrap_or_default());
            let query = taken.next().unwrap_or_default();
            Ok(SearchArgs { input, query })
        }
        _ => Err("too many arguments".to_string()),
    }
}

#[allow(clippy::while_let_on_iterator)]
fn parse_show_args(mut args: impl Iterator<Item = OsString>) -> Result<ShowArgs, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut config = ViewConfig::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg == "--byte-swap" || arg == "-s" {
            config.byte_swap = true;
            continue;
        }

        if arg == "-b" || arg == "--base" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --base".to_string())?;
            config.display_base = value
                .to_string_lossy()
                .parse()
                .map_err(|error: explorer_core::ParseDisplayBaseError| error.to_string())?;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }
        positional.push(arg.to_string_lossy().to_string());
    }

    match positional.len() {
        0 => Err("missing input path".to_string()),
        1 => Err("missing element id".to_string()),
        2 => {
            let mut taken = positional.into_iter();
            let input = PathBuf::from(taken.next().unwrap_or_default());
            let id = taken.next().unwrap_or_default();
            Ok(ShowArgs { input, id, config })
        }
        _ => Err("too many arguments".to_string()),
    }
}

fn report_warnings(summary: &explorer_core::LoadSummary) {
    for dangling in &summary.dangling {
        let referrer = dangling.parent.as_deref().unwrap_or("root");
        eprintln!(
            "warning: '{referrer}' references missing child '{}'",
            dangling.child
        );
    }
}

fn run_dump(args: &DumpArgs) -> Result<(), i32> {
    let (store, summary) = load_store(&args.input).map_err(|error| {
        eprintln!("error: {error}");
        1
    })?;
    report_warnings(&summary);

    print!("{}", render_tree(&store));
    Ok(())
}

fn run_search(args: &SearchArgs) -> Result<(), i32> {
    let (store, summary) = load_store(&args.input).map_err(|error| {
        eprintln!("error: {error}");
        1
    })?;
    report_warnings(&summary);

    let index = SearchIndex::build(&store);
    let matches = index.query(&args.query);
    if matches.is_empty() {
        println!("No matches for '{}'", args.query);
    } else {
        for id in matches {
            println!("{id}");
        }
    }
    Ok(())
}

fn run_show(args: &ShowArgs) -> Result<(), i32> {
    let (store, summary) = load_store(&args.input).map_err(|error| {
        eprintln!("error: {error}");
        1
    })?;
    report_warnings(&summary);

    match render_register(&store, &args.id, args.config) {
        Ok(report) => {
            print!("{report}");
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {error}");
            Err(1)
        }
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(Command::Dump(args))) => match run_dump(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Search(args))) => match run_search(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Show(args))) => match run_show(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}

//! sort-records: sort JSON records by multiple keys
//!
//! Reads one or more JSON arrays of objects, sorts them with a stable
//! multi-key comparator and writes the result as JSON.

use std::process;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use record_sort::{
    config::{parse_directions, MissingPolicy, SortSpec, SortSpecBuilder},
    error::{SortError, SortResult},
    json_io, Sorter, EXIT_SUCCESS,
};

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("debug"));

    match run(&matches) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("sort-records: {e}");
            process::exit(e.exit_code());
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn run(matches: &ArgMatches) -> SortResult<i32> {
    let spec = parse_spec_from_matches(matches)?;
    let sorter = Sorter::new(spec)?;
    tracing::debug!(
        keys = ?sorter.spec().keys,
        directions = ?sorter.spec().effective_directions(),
        missing = %sorter.spec().missing,
        "sort specification"
    );

    let input_files: Vec<String> = matches
        .get_many::<String>("files")
        .unwrap_or_default()
        .cloned()
        .collect();
    let records = json_io::read_inputs(&input_files)?;

    if matches.get_flag("check") {
        return match sorter.check_sorted(&records)? {
            None => Ok(EXIT_SUCCESS),
            Some(index) => Err(SortError::not_sorted(index)),
        };
    }

    let sorted = sorter.sort(&records)?;
    json_io::write_output(
        matches.get_one::<String>("output").map(String::as_str),
        &sorted,
        matches.get_flag("compact"),
    )?;

    Ok(EXIT_SUCCESS)
}

fn build_cli() -> Command {
    Command::new("sort-records")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("sort-records [OPTION]... [FILE]...")
        .about("Sort JSON records by multiple keys")
        .long_about("Sort JSON records by multiple keys.\n\nEach FILE holds a JSON array of objects; with no FILE, or when FILE is -, read standard input. Directions are matched to keys by position: missing directions default to ascending and extra directions are ignored.")

        .arg(Arg::new("files")
            .help("Input files holding JSON arrays (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Sort specification
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .help("Sort by field NAME; repeat or separate with commas for more keys")
            .value_name("NAME")
            .action(ArgAction::Append))
        .arg(Arg::new("direction")
            .short('d')
            .long("direction")
            .help("Direction for the key at the same position: asc or desc")
            .value_name("DIR")
            .action(ArgAction::Append))
        .arg(Arg::new("missing")
            .long("missing")
            .help("Placement of records lacking a key")
            .long_help("Placement of records lacking a key: lowest (before all values ascending, after them descending), first, last, or error")
            .value_name("POLICY")
            .value_parser(["lowest", "first", "last", "error"]))
        .arg(Arg::new("spec")
            .long("spec")
            .help("Read the sort specification from a JSON file")
            .long_help("Read the sort specification from a JSON file such as {\"by\": [\"a\", \"b\"], \"order\": [\"asc\", \"desc\"]}. Keys and directions given on the command line replace those from the file.")
            .value_name("FILE"))

        // Output
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))
        .arg(Arg::new("compact")
            .long("compact")
            .help("Write JSON on a single line")
            .action(ArgAction::SetTrue))

        // Operation modes
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Log sorting decisions to stderr")
            .action(ArgAction::SetTrue))
}

/// Split repeated, comma-separated option values into a flat list
fn collect_list(matches: &ArgMatches, id: &str) -> Option<Vec<String>> {
    let values = matches.get_many::<String>(id)?;
    Some(
        values
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Start from the --spec file if one was given
fn base_spec_builder(matches: &ArgMatches) -> SortResult<SortSpecBuilder> {
    let base = match matches.get_one::<String>("spec") {
        Some(path) => json_io::read_spec_file(path)?,
        None => SortSpec::default(),
    };
    Ok(SortSpecBuilder::from_spec(base))
}

/// Build the sort specification from a spec file and command line overrides
fn parse_spec_from_matches(matches: &ArgMatches) -> SortResult<SortSpec> {
    let mut builder = base_spec_builder(matches)?;

    if let Some(keys) = collect_list(matches, "key") {
        builder = builder.keys(keys);
    }

    if let Some(directions) = collect_list(matches, "direction") {
        builder = builder.directions(parse_directions(&directions.join(","))?);
    }

    if let Some(policy) = matches.get_one::<String>("missing") {
        builder = builder.missing(policy.parse::<MissingPolicy>()?);
    }

    builder.build()
}

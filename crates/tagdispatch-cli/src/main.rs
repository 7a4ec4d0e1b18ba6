use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use itertools::Itertools;
use simple_log::log::debug;
use simple_log::log::info;
use simple_log::log::warn;
use simple_log::LogConfigBuilder;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use tagdispatch::table::import;
use tagdispatch::table::JsonTypeLabels;
use tagdispatch::table::JsonValue;
use tagdispatch::table::TableReadError;
use tagdispatch::table::TemplateArgs;
use tagdispatch::table::TemplateRegistry;
use tagdispatch::Untagged;
use thiserror::Error;

/// Dispatch generics declared in a method table on labelled JSON values.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the data directory. If no path is provided the program uses
    /// $HOME/.local/share/tagdispatch. The directory is expected to contain methods.jsonl and
    /// values.jsonl unless --methods and --values point elsewhere.
    #[arg(short, long, default_value = None)]
    path: Option<PathBuf>,

    /// Method table in jsonl format, one {"generic", "label", "template"} object per line.
    #[arg(short, long, default_value = None)]
    methods: Option<PathBuf>,

    /// Values in jsonl format, one {"labels", "value"} object per line.
    #[arg(short, long, default_value = None)]
    values: Option<PathBuf>,

    /// How to label values that have no labels.
    #[arg(short, long, value_enum, default_value_t = Implicit::None)]
    implicit: Implicit,

    /// Argument passed to every method, in the form KEY=VALUE. Can be given multiple times.
    #[arg(short, long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    args: Vec<(String, String)>,

    /// Directory for the log file. Defaults to the log directory inside the data directory.
    #[arg(long, default_value = None)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Call a generic on every value and print one result per line.
    Dispatch { generic: String },

    /// Show, for every value, which label's method a dispatch would select and which methods
    /// the chain can continue into.
    Explain { generic: String },

    /// List registered methods, optionally only those of one generic or one label.
    Methods {
        #[arg(short, long, default_value = None)]
        generic: Option<String>,

        #[arg(short, long, default_value = None)]
        label: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Implicit {
    /// Values without labels fail to dispatch.
    None,
    /// Values without labels are labelled "untagged".
    Untagged,
    /// Values without labels are labelled after their JSON type.
    JsonType,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("no data directory given and HOME is not set")]
    NoDataDir,

    #[error(transparent)]
    Read(#[from] TableReadError),

    #[error("{0} of {1} values failed to dispatch")]
    DispatchFailures(usize, usize),
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let data_dir = match args.path {
        Some(p) => p,
        None => {
            let home_dir = std::env::var("HOME").map_err(|_| CliError::NoDataDir)?;
            PathBuf::from(home_dir).join(".local/share/tagdispatch")
        }
    };

    let log_dir = args.log_dir.unwrap_or_else(|| data_dir.join("log"));
    if let Err(err) = init_logging(&log_dir.join("tagdispatch.log")) {
        eprintln!("logging disabled: {err}");
    }

    let methods_path = args.methods.unwrap_or_else(|| data_dir.join("methods.jsonl"));
    info!("using methods from {methods_path:?}");
    let registry = import_registry(&methods_path, args.implicit)?;

    match args.command {
        Commands::Methods { generic, label } => {
            print_methods(&registry, generic.as_deref(), label.as_deref());
            Ok(())
        }
        Commands::Dispatch { generic } => {
            let values = import_values(args.values, &data_dir)?;
            let call_args: TemplateArgs = args.args.into_iter().collect();
            print_dispatch(&registry, &generic, &values, &call_args)
        }
        Commands::Explain { generic } => {
            let values = import_values(args.values, &data_dir)?;
            print_explain(&registry, &generic, &values);
            Ok(())
        }
    }
}

fn init_logging(log_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let log_path = log_path.to_string_lossy().into_owned();
    let config = LogConfigBuilder::builder()
        .path(&log_path)
        .size(100)
        .roll_count(10)
        .time_format("%Y-%m-%d %H:%M:%S")
        .level("debug")?
        .output_file()
        .build();

    simple_log::new(config)?;
    Ok(())
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got `{input}`")),
    }
}

fn import_registry(path: &Path, implicit: Implicit) -> Result<TemplateRegistry, CliError> {
    let lines = import::import_methods_from_file_with_collected_res(path)?;
    let lines = lines
        .into_iter()
        .filter_map(|line| {
            line.inspect_err(|err| warn!("non-fatal error on import: {err}"))
                .ok()
        })
        .collect_vec();

    let (mut registry, non_fatal_errors) =
        TemplateRegistry::from_lines_and_collect_non_fatal_errors(lines);
    for error in non_fatal_errors {
        warn!("non-fatal error on import: {error}");
        eprintln!("skipping method: {error}");
    }

    match implicit {
        Implicit::None => (),
        Implicit::Untagged => registry.set_label_deriver(Untagged),
        Implicit::JsonType => registry.set_label_deriver(JsonTypeLabels),
    }
    debug!("registry ready: {registry:?}");
    Ok(registry)
}

fn import_values(path: Option<PathBuf>, data_dir: &Path) -> Result<Vec<JsonValue>, CliError> {
    let path = path.unwrap_or_else(|| data_dir.join("values.jsonl"));
    info!("using values from {path:?}");
    Ok(import::import_values_from_file(path)?)
}

fn print_methods(registry: &TemplateRegistry, generic: Option<&str>, label: Option<&str>) {
    for g in registry.generics() {
        if generic.is_some_and(|x| x != g) {
            continue;
        }
        for l in registry.labels_for_generic(g) {
            if label.is_some_and(|x| x != l.as_str()) {
                continue;
            }
            println!("{g}.{l}");
        }
    }
}

fn print_dispatch(
    registry: &TemplateRegistry,
    generic: &str,
    values: &[JsonValue],
    call_args: &TemplateArgs,
) -> Result<(), CliError> {
    let mut failures = 0;
    for value in values {
        match registry.dispatch(generic, value, call_args) {
            Ok(result) => println!("{result}"),
            Err(err) => {
                warn!("dispatch of {generic} failed: {err}");
                println!("error: {err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        Err(CliError::DispatchFailures(failures, values.len()))
    } else {
        Ok(())
    }
}

fn print_explain(registry: &TemplateRegistry, generic: &str, values: &[JsonValue]) {
    for (i, value) in values.iter().enumerate() {
        println!("{i}: [{}]", value.labels().iter().join(", "));
        match registry.resolve(generic, value) {
            Ok(resolution) => println!("{resolution}"),
            Err(err) => println!("error: {err}"),
        }
    }
}

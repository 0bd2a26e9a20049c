use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tzgen::{Document, EmitTarget, GenerateError, GenerateOptions, generate_document, render_document};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "tzgen")]
#[command(about = "tzgen - generate SimpleTimeZone tables from parsed tz data")]
struct Cli {
    /// Log debug diagnostics (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TimeZoneData from .json zone documents
    Generate {
        /// Path to a .json document or a directory of them
        #[arg(required_unless_present = "stdin")]
        input: Option<PathBuf>,

        /// Read one document from stdin and print the source to stdout
        #[arg(long)]
        stdin: bool,

        /// Directory the generated file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Name of the generated file
        #[arg(long)]
        file_name: Option<String>,

        /// JSON file overriding the emitted import and class names
        #[arg(long)]
        target_config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            input,
            stdin,
            output_dir,
            file_name,
            target_config,
        } => load_target(target_config.as_deref(), file_name).and_then(|target| {
            if stdin {
                generate_stdin(&target)
            } else if let Some(path) = input {
                generate_path(&path, GenerateOptions { output_dir, target })
            } else {
                eprintln!("Error: provide a file/directory or use --stdin");
                Err(None)
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(Some(err)) => {
            // I/O failures were already reported while generating
            if !err.is_io() {
                eprintln!("Error: {err}");
            }
            ExitCode::from(err.exit_code())
        }
        Err(None) => ExitCode::FAILURE,
    }
}

type CliResult = Result<(), Option<GenerateError>>;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn load_target(config: Option<&Path>, file_name: Option<String>) -> Result<EmitTarget, Option<GenerateError>> {
    let mut target: EmitTarget = match config {
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|source| GenerateError::Input {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&source).map_err(GenerateError::from)?
        }
        None => EmitTarget::default(),
    };
    if let Some(name) = file_name {
        target.file_name = name;
    }
    tracing::debug!(?target, "emit target");
    Ok(target)
}

fn generate_stdin(target: &EmitTarget) -> CliResult {
    let mut source = String::new();
    io::stdin()
        .read_to_string(&mut source)
        .map_err(|source| GenerateError::Input {
            path: PathBuf::from("<stdin>"),
            source,
        })?;

    let doc = Document::from_json(&source)?;
    print!("{}", render_document(&doc, target)?);
    Ok(())
}

fn generate_path(path: &Path, options: GenerateOptions) -> CliResult {
    if path.is_file() {
        if path.extension().is_none_or(|ext| ext != "json") {
            eprintln!("Error: {} is not a .json document", path.display());
            return Err(None);
        }
        let start = Instant::now();
        generate_file(path, &options)?;
        print_summary(1, start.elapsed());
        Ok(())
    } else if path.is_dir() {
        generate_directory(path, &options)
    } else {
        eprintln!("Error: {} does not exist", path.display());
        Err(None)
    }
}

/// Each document keeps its place in the tree: `<dir>/a/zones.json` is
/// generated into `<output_dir>/a/zones/`
fn generate_directory(dir: &Path, options: &GenerateOptions) -> CliResult {
    let start = Instant::now();
    let mut file_count = 0;

    let mut documents: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(|e| e.into_path())
        .collect();
    documents.sort();

    for path in documents {
        let options = GenerateOptions {
            output_dir: document_output_dir(&options.output_dir, dir, &path),
            target: options.target.clone(),
        };
        generate_file(&path, &options)?;
        file_count += 1;
    }

    if file_count == 0 {
        eprintln!("No .json documents found in {}", dir.display());
        return Err(None);
    }

    print_summary(file_count, start.elapsed());
    Ok(())
}

fn document_output_dir(output_dir: &Path, dir: &Path, document: &Path) -> PathBuf {
    let relative = match document.strip_prefix(dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => PathBuf::from(document.file_name().unwrap_or_default()),
    };
    output_dir.join(relative.with_extension(""))
}

fn generate_file(path: &Path, options: &GenerateOptions) -> Result<(), GenerateError> {
    let doc = Document::read(path)?;
    tracing::debug!(input = %path.display(), zones = doc.zones.len(), aliases = doc.aliases.len(), "read document");

    // Written straight to stderr so a failure shows even with logging filtered out
    let reporter = |msg: &str| eprintln!("Error: {msg}");
    let output = generate_document(&doc, options, &reporter)?;
    print_generated(&output.display().to_string());
    Ok(())
}

fn print_generated(path: &str) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("  \x1b[32m✓\x1b[0m {}", path);
    } else {
        eprintln!("  ✓ {}", path);
    }
}

fn print_summary(count: usize, elapsed: std::time::Duration) {
    let is_tty = io::stderr().is_terminal();
    let time_str = format_duration(elapsed);
    let files_word = if count == 1 { "file" } else { "files" };

    if is_tty {
        eprintln!("\n\x1b[1m✨ Generated {} {} in {}\x1b[0m", count, files_word, time_str);
    } else {
        eprintln!("\n✨ Generated {} {} in {}", count, files_word, time_str);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

// Command-line interface for excerpt
//
// This binary extracts ==highlight== and %%comment%% spans from markdown
// notes into citation notes.
//
// The main role of the excerpt program is to run the extraction pipeline
// over vault content: one file at a time, or a folder of them. The core
// capabilities live in the excerpt-engine crate; this crate is a shell over
// that library plus the filesystem boundary around it.
//
// Extracting:
//
//  excerpt <input> [--vault <dir>] [--pattern <pat>] [--dry-run]
//      Process one file ("extract" is the default subcommand)
//  excerpt extract <input> ...
//      Same as above (explicit)
//  excerpt folder <dir> [--vault <dir>] [--pattern <pat>]
//      Process every matching file directly inside <dir>, best effort
//  excerpt inspect <path> [<transform>]
//      Show a pipeline stage (defaults to "tree-viz")
//  excerpt --list-transforms
//      List available transforms
//
// The citation note is written inside the vault at the location computed
// from the path pattern (default "Extract/{2:}", configurable via
// excerpt.toml or --pattern).

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use excerpt_cli::{process, transforms};
use excerpt_config::{ExcerptConfig, Loader};

fn build_cli() -> Command {
    Command::new("excerpt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract highlights and comments from markdown notes into citation notes")
        .long_about(
            "excerpt is a command-line tool for pulling ==highlight== and %%comment%% spans\n\
            out of markdown notes into citation notes with wiki links back to their source.\n\n\
            Commands:\n  \
            - extract: process one file (the default command)\n  \
            - folder:  process every matching file directly inside a folder\n  \
            - inspect: view internal pipeline stages (tokens, sections, tree)\n\n\
            Examples:\n  \
            excerpt Notes/Doc.md                        # Write the citation note for one file\n  \
            excerpt extract Notes/Doc.md --dry-run      # Print the note instead of writing it\n  \
            excerpt folder Notes --pattern 'Refs/{2:}'  # Process a folder with a custom target\n  \
            excerpt inspect Notes/Doc.md sections-json  # View the parsed section records",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an excerpt.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("extract")
                .about("Extract annotations from one file (default command)")
                .long_about(
                    "Run the extraction pipeline over one markdown file and write the\n\
                    resulting citation note inside the vault.\n\n\
                    The note's location is computed by expanding the path pattern over the\n\
                    document's vault-relative path segments: {N} copies one segment,\n\
                    {N:} / {:N} / {N:M} copy slices, {:} the whole path.\n\n\
                    Examples:\n  \
                    excerpt extract Notes/Doc.md                  # Extract/{2:} of Notes/Doc.md\n  \
                    excerpt extract Doc.md --pattern '{1}.refs'   # Custom target path\n  \
                    excerpt extract Doc.md --dry-run              # Print instead of write",
                )
                .arg(
                    Arg::new("input")
                        .help("Input markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("vault")
                        .long("vault")
                        .value_name("DIR")
                        .help("Vault root the document and note paths are relative to")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .value_name("PATTERN")
                        .help("Output path pattern (overrides the configured value)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Print the rendered note to stdout instead of writing it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("folder")
                .about("Extract annotations from every matching file in a folder")
                .long_about(
                    "Process every file directly inside <dir> whose extension is in the\n\
                    configured list (default: md). Subfolders are not descended into.\n\n\
                    Processing is best effort: a file that fails is reported and the rest\n\
                    of the folder is still processed.",
                )
                .arg(
                    Arg::new("dir")
                        .help("Folder to process")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("vault")
                        .long("vault")
                        .value_name("DIR")
                        .help("Vault root the document and note paths are relative to")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .value_name("PATTERN")
                        .help("Output path pattern (overrides the configured value)")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of the extraction pipeline")
                .long_about(
                    "View the pipeline's intermediate stages for one document.\n\n\
                    Transforms (stage-format):\n  \
                    - tokens-json:   per-line token stream after both delimiter passes\n  \
                    - sections-json: flat section records in document order\n  \
                    - tree-viz:      heading outline with annotation counts (default)\n  \
                    - note:          the rendered citation note\n\n\
                    Examples:\n  \
                    excerpt inspect Notes/Doc.md                 # Outline view (default)\n  \
                    excerpt inspect Notes/Doc.md tokens-json     # View the token stream",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply (stage-format). Defaults to 'tree-viz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("vault")
                        .long("vault")
                        .value_name("DIR")
                        .help("Vault root used for the 'note' transform's links")
                        .value_hint(ValueHint::DirPath),
                ),
        )
}

/// Whether the first argument looks like a file rather than a subcommand,
/// in which case "extract" is injected as the default subcommand.
fn looks_like_default_extract(args: &[String]) -> bool {
    args.len() > 1
        && !args[1].starts_with('-')
        && !matches!(args[1].as_str(), "extract" | "folder" | "inspect" | "help")
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(matches) => matches,
        Err(err) => {
            if looks_like_default_extract(&args) {
                let mut new_args = vec![args[0].clone(), "extract".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(matches) => matches,
                    Err(err2) => err2.exit(),
                }
            } else {
                err.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("extract", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let vault = vault_arg(sub_matches);
            let pattern = pattern_arg(sub_matches, &config);
            let dry_run = sub_matches.get_flag("dry-run");
            handle_extract_command(Path::new(input), &vault, &pattern, dry_run);
        }
        Some(("folder", sub_matches)) => {
            let dir = sub_matches
                .get_one::<String>("dir")
                .expect("dir is required");
            let vault = vault_arg(sub_matches);
            let pattern = pattern_arg(sub_matches, &config);
            handle_folder_command(Path::new(dir), &vault, &pattern, &config.folder.extensions);
        }
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("tree-viz");
            let vault = vault_arg(sub_matches);
            handle_inspect_command(Path::new(path), transform, &vault);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn vault_arg(sub_matches: &ArgMatches) -> PathBuf {
    sub_matches
        .get_one::<String>("vault")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn pattern_arg(sub_matches: &ArgMatches, config: &ExcerptConfig) -> String {
    sub_matches
        .get_one::<String>("pattern")
        .cloned()
        .unwrap_or_else(|| config.output.path_pattern.clone())
}

fn load_cli_config(path: Option<&str>) -> ExcerptConfig {
    let loader = match path {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file("excerpt.toml"),
    };
    loader.build().unwrap_or_else(|err| {
        eprintln!("Configuration error: {err}");
        std::process::exit(1);
    })
}

fn handle_extract_command(input: &Path, vault: &Path, pattern: &str, dry_run: bool) {
    if dry_run {
        let processed = process::render_note(input, vault, pattern).unwrap_or_else(|err| {
            eprintln!("{err}");
            std::process::exit(1);
        });
        print!("{}", processed.note);
        return;
    }

    let processed = process::process_file(input, vault, pattern).unwrap_or_else(|err| {
        eprintln!("{err}");
        std::process::exit(1);
    });
    println!(
        "Processed: {} -> {}",
        processed.document_path,
        processed.output_path.display()
    );
}

fn handle_folder_command(dir: &Path, vault: &Path, pattern: &str, extensions: &[String]) {
    let entries = fs::read_dir(dir).unwrap_or_else(|err| {
        eprintln!("Error reading folder '{}': {err}", dir.display());
        std::process::exit(1);
    });

    let mut inputs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_matching_extension(path, extensions))
        .collect();
    inputs.sort();

    let mut extracted = 0usize;
    let mut failed = 0usize;
    for input in inputs {
        match process::process_file(&input, vault, pattern) {
            Ok(processed) => {
                extracted += 1;
                println!("Processed: {}", processed.document_path);
            }
            Err(err) => {
                failed += 1;
                eprintln!("{err}");
            }
        }
    }

    println!("Folder processed: {extracted} extracted, {failed} failed");
}

fn has_matching_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted == ext))
        .unwrap_or(false)
}

fn handle_inspect_command(path: &Path, transform: &str, vault: &Path) {
    let source = fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error reading file '{}': {err}", path.display());
        std::process::exit(1);
    });

    let document_path = process::document_path(path, vault);
    let basename = process::basename(path);

    let output = transforms::execute_transform(&source, transform, &document_path, &basename)
        .unwrap_or_else(|err| {
            eprintln!("Execution error: {err}");
            std::process::exit(1);
        });

    println!("{output}");
}

fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    for transform in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform}");
    }
}

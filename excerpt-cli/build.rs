use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transform list from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["tokens-json", "sections-json", "tree-viz", "note"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("excerpt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract highlights and comments from markdown notes into citation notes")
        .arg_required_else_help(true)
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
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .value_name("PATTERN")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("folder")
                .about("Extract annotations from every matching file in a folder")
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
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("pattern")
                        .long("pattern")
                        .value_name("PATTERN")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect internal representations of the extraction pipeline")
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
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "excerpt", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "excerpt", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "excerpt", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

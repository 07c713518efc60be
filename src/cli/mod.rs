//! CLI surface for reflectdoc
//!
//! The `generate` subcommand is the menu-action analog of the editor
//! integration; `settings` stands in for its configuration panel.

mod args;

pub use args::{Args, Command};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::generate::Generator;
use crate::reflection::DumpProvider;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_CONFIG_PATH: &str = "reflectdoc.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Generate {
            dump,
            root,
            depth,
            include_private,
            format,
            output,
            config,
            verbose,
        } => {
            let config_path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
            let mut cfg = Config::load_or_default(&config_path);

            // CLI takes precedence over the persisted settings
            cfg.merge_cli(root, depth, include_private, format, output);

            if verbose {
                println!("Dump: {}", dump.display());
                println!("Roots: {:?}", cfg.generation.roots);
                println!("Depth: {}", cfg.generation.max_depth);
                println!("Include private: {}", cfg.generation.include_private);
                println!("Format: {:?}", cfg.output.format);
                println!("Destination: {}", cfg.output.destination.display());
            }

            if !dump.exists() {
                return Err(Error::PathNotFound(dump));
            }

            println!("Loading reflection dump...");
            let provider = DumpProvider::load(&dump)?;
            println!("Loaded {} host records", provider.len());

            println!("Generating documentation...");
            let generator = Generator::new(cfg.clone())?.with_verbose(verbose);
            let report = generator.generate(&provider)?;

            println!("{}", report.summary());
            print_diagnostics(&report.diagnostics);
            println!(
                "Documentation written to: {}",
                cfg.output.destination.display()
            );

            Ok(())
        }

        Command::Settings { init, config } => {
            let config_path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

            if init {
                write_starter_config(&config_path)?;
                println!("Wrote starter config to: {}", config_path.display());
            } else {
                let cfg = Config::load_or_default(&config_path);
                if config_path.exists() {
                    println!("Settings from {}:\n", config_path.display());
                } else {
                    println!("No config at {}, showing defaults:\n", config_path.display());
                }
                println!("{}", cfg.to_toml()?);
            }

            Ok(())
        }

        Command::Version => {
            println!("reflectdoc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Diagnostics are shown after every run, success included
fn print_diagnostics(diagnostics: &[crate::walk::Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    println!("\nDiagnostics ({}):", diagnostics.len());
    for diagnostic in diagnostics {
        println!("  {}: {}", diagnostic.id, diagnostic.message);
    }
}

/// Write a default config, refusing to clobber an existing one
fn write_starter_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::other(format!(
            "config already exists at {}",
            path.display()
        )));
    }
    let config = Config::default();
    std::fs::write(path, config.to_toml()?)?;
    Ok(())
}

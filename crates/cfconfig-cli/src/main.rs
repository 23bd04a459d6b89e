//! cfconfig - Generate and extract Crazyflie configuration blocks
//!
//! # Usage
//!
//! ```bash
//! # Compile a text configuration into a 16-byte block
//! cfconfig generate config.ini config.bin
//!
//! # Turn a block read from a copter back into text
//! cfconfig extract config.bin config.ini
//!
//! # Show what is inside a block
//! cfconfig inspect config.bin --json
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use clap_mangen::Man;
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cfconfig_core::Settings;

mod commands;

/// cfconfig - Generate and extract Crazyflie configuration blocks
#[derive(Parser)]
#[command(name = "cfconfig")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress ALL output (implies --quiet)
    #[arg(long, global = true)]
    silent: bool,

    /// Use a specific settings file
    #[arg(long, global = true, value_name = "FILE", env = "CFCONFIG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a text configuration into a binary config block
    Generate {
        /// Text configuration file to read
        input: PathBuf,

        /// Binary block file to write
        output: PathBuf,

        /// Reject radio channels outside 0-125 and non-finite trims
        #[arg(long)]
        strict: bool,
    },

    /// Extract a binary config block into a text configuration
    Extract {
        /// Binary block file to read
        input: PathBuf,

        /// Text configuration file to write
        output: PathBuf,

        /// Fail on an erased or corrupt block instead of writing defaults
        #[arg(long)]
        no_fallback: bool,
    },

    /// Show the contents and validity of a binary config block
    Inspect {
        /// Binary block file to read
        input: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show or initialize the settings file
    Config {
        /// Create a settings file with default values
        #[arg(long)]
        init: bool,

        /// Print the settings file path
        #[arg(long)]
        path: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate man pages
    Mangen {
        /// Output directory for man pages
        #[arg(short, long, default_value = ".")]
        out_dir: String,
    },
}

fn main() {
    // Set up panic handler for nicer error messages
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("{} {}", style("Error:").red().bold(), panic_info);
    }));

    if let Err(e) = run() {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Settings::config_path);
    let settings = Settings::load(config_path.as_deref());

    // --silent implies --quiet, and the quiet setting behaves like --silent
    let silent = cli.silent || settings.behavior.quiet;
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet || silent {
        EnvFilter::new("off")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let service_config = settings.service_config();

    match cli.command {
        Commands::Generate {
            input,
            output,
            strict,
        } => commands::generate::execute(commands::generate::GenerateArgs {
            input,
            output,
            config: if strict {
                service_config.strict(true)
            } else {
                service_config
            },
            silent,
        }),
        Commands::Extract {
            input,
            output,
            no_fallback,
        } => commands::extract::execute(commands::extract::ExtractArgs {
            input,
            output,
            config: if no_fallback {
                service_config.fallback_to_default(false)
            } else {
                service_config
            },
            silent,
        }),
        Commands::Inspect { input, json } => commands::inspect::execute(&input, json, silent),
        Commands::Config { init, path, json } => {
            commands::config::execute(commands::config::ConfigArgs {
                init,
                path,
                json,
                silent: cli.silent,
                config_file: config_path,
            })
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        Commands::Mangen { out_dir } => {
            let cmd = Cli::command();
            let out_path = std::path::Path::new(&out_dir);
            std::fs::create_dir_all(out_path)?;

            let man = Man::new(cmd.clone());
            let mut buffer = Vec::new();
            man.render(&mut buffer)?;
            std::fs::write(out_path.join("cfconfig.1"), buffer)?;
            if !silent {
                println!("Generated: {}/cfconfig.1", out_dir);
            }

            for subcommand in cmd.get_subcommands() {
                let name = subcommand.get_name();
                if subcommand.is_hide_set()
                    || name == "completions"
                    || name == "mangen"
                    || name == "help"
                {
                    continue;
                }

                let man = Man::new(subcommand.clone());
                let mut buffer = Vec::new();
                man.render(&mut buffer)?;
                let filename = format!("cfconfig-{}.1", name);
                std::fs::write(out_path.join(&filename), buffer)?;
                if !silent {
                    println!("Generated: {}/{}", out_dir, filename);
                }
            }

            Ok(())
        }
    }
}

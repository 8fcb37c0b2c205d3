//! snap2code – command-line client.
//!
//! Loads a screenshot from disk, posts it to a snap2code server and prints the
//! generated code (or writes it to `--out`).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use snap2code_client::{FileCapture, HttpGenerateApi, Shell, ShellState};
use snap2code_core::stack;

#[derive(Debug, Parser)]
#[command(name = "snap2code", version, about = "Turn UI screenshots into front-end code")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate code from a screenshot.
    Generate {
        /// PNG, JPEG, WebP or GIF screenshot.
        image: PathBuf,

        /// Catalog id (see `snap2code stacks`) or free-form label.
        #[arg(short, long, default_value = stack::DEFAULT_TECHNOLOGY)]
        tech: String,

        /// snap2code server root.
        #[arg(long, env = "SNAP2CODE_SERVER", default_value = "http://localhost:3000")]
        server: String,

        /// Seconds to wait for the server.
        #[arg(long, default_value_t = 180)]
        timeout: u64,

        /// Write the code to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List the technology catalog.
    Stacks,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Stacks => {
            for t in stack::CATALOG {
                println!("{:<16}{}", t.id, t.label);
            }
            Ok(())
        }
        Command::Generate { image, tech, server, timeout, out } => {
            generate(image, &tech, server, Duration::from_secs(timeout), out).await
        }
    }
}

async fn generate(
    image: PathBuf,
    tech: &str,
    server: String,
    timeout: Duration,
    out: Option<PathBuf>,
) -> Result<()> {
    let api = HttpGenerateApi::new(server, timeout)?;
    let mut shell = Shell::new();

    shell
        .capture(&FileCapture::new(&image))
        .await
        .with_context(|| format!("cannot load {}", image.display()))?;
    shell.select_technology(tech);

    eprintln!("Generating {} code...", shell.technology());
    shell.generate(&api).await;

    match (shell.state(), shell.generated_code()) {
        (ShellState::Output, Some(code)) => {
            match out {
                Some(path) => {
                    tokio::fs::write(&path, code)
                        .await
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{code}"),
            }
            Ok(())
        }
        _ => bail!(
            "generation failed: {}",
            shell.error().unwrap_or("no response from server")
        ),
    }
}

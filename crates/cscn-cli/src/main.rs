use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cscn_codegen::StringFraming;
use cscn_compiler::{compile_to_writer, parse_script};
use cscn_types::Opcode;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "cscn", version, about = "Cutscene bytecode compiler")]
struct Cli {
    /// Log every bind and container event.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON script into a .cscn container.
    Build {
        script: PathBuf,
        /// Defaults to the script path with a `.cscn` extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the instruction map as JSON.
        #[arg(long)]
        map: Option<PathBuf>,
        /// Overrides the script's `options.string_framing`.
        #[arg(long)]
        string_framing: Option<StringFraming>,
    },
    /// Print the opcode catalog.
    Opcodes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();

    match cli.command {
        Commands::Build {
            script,
            output,
            map,
            string_framing,
        } => build(&script, output, map, string_framing)?,
        Commands::Opcodes => print_opcodes(),
    }

    Ok(())
}

fn build(
    script_path: &Path,
    output: Option<PathBuf>,
    map: Option<PathBuf>,
    string_framing: Option<StringFraming>,
) -> Result<()> {
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("reading {}", script_path.display()))?;
    let filename = script_path.display().to_string();
    let script = parse_script(&source, &filename)?;

    let mut options = script.options;
    if let Some(framing) = string_framing {
        options.string_framing = framing;
    }

    let output = output.unwrap_or_else(|| script_path.with_extension("cscn"));
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;

    let artifact = match compile_to_writer(&script, &options, BufWriter::new(file)) {
        Ok(artifact) => artifact,
        Err(err) => {
            if let Err(rm) = fs::remove_file(&output) {
                warn!(path = %output.display(), error = %rm, "could not remove partial output");
            }
            return Err(err).with_context(|| format!("compiling {filename}"));
        }
    };

    info!(
        path = %output.display(),
        size = artifact.size,
        instructions = artifact.instructions.len(),
        framing = options.string_framing.name(),
        "wrote cutscene"
    );

    if let Some(map_path) = map {
        fs::write(&map_path, artifact.instructions.to_json())
            .with_context(|| format!("writing {}", map_path.display()))?;
        info!(path = %map_path.display(), "wrote instruction map");
    }

    Ok(())
}

fn print_opcodes() {
    for op in Opcode::ALL {
        println!("0x{:02X}  {}", op.as_u8(), op.name());
    }
}

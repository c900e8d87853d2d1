//! Cutscene compiler: orchestrates script → container compilation.
//!
//! ```text
//! JSON script → Script (serde) → Cutscene builder → .cscn bytes + instruction map
//! ```

pub mod command;

use std::io::{Cursor, Seek, Write};

use cscn_codegen::{Artifact, BinaryWriter, Cutscene, InstructionMap};
use cscn_types::{CompileErrors, CutsceneResult, ErrorCode, ScriptError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

pub use command::{Command, CompileOptions, Script};

/// The structured output of [`compile_to_result`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    /// The container bytes, on success.
    pub bytes: Option<Vec<u8>>,
    /// Lowercase hex SHA-256 of `bytes`.
    pub sha256: Option<String>,
    pub instructions: Option<InstructionMap>,
    pub errors: CompileErrors,
}

/// A compiled container held in memory.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub bytes: Vec<u8>,
    pub instructions: InstructionMap,
}

impl Compiled {
    pub fn sha256_hex(&self) -> String {
        sha256_hex(&self.bytes)
    }
}

/// Hex-encoded SHA-256 digest.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Parse a script document, reporting failures as structured errors.
pub fn parse_script(source: &str, filename: &str) -> Result<Script, ScriptError> {
    serde_json::from_str(source).map_err(|e| json_error(filename, &e))
}

fn json_error(filename: &str, err: &serde_json::Error) -> ScriptError {
    use serde_json::error::Category;
    let code = match err.classify() {
        Category::Syntax => ErrorCode::INVALID_JSON,
        Category::Eof => ErrorCode::UNEXPECTED_EOF,
        Category::Data => ErrorCode::INVALID_COMMAND,
        Category::Io => ErrorCode::IO_FAILURE,
    };
    ScriptError::new(filename, code, err.to_string()).at(err.line(), err.column())
}

/// Drive a builder over `sink` with every command in `script`.
pub fn compile_to_writer<W: Write + Seek>(
    script: &Script,
    options: &CompileOptions,
    sink: W,
) -> CutsceneResult<Artifact<W>> {
    let mut cs = Cutscene::open(BinaryWriter::with_options(sink, options.writer_options()))?;
    for command in &script.commands {
        command.emit(&mut cs)?;
    }
    cs.close()
}

/// Compile a script into memory using its own embedded options.
pub fn compile_script(script: &Script) -> CutsceneResult<Compiled> {
    compile_script_with(script, &script.options)
}

/// Compile a script into memory with explicit options.
pub fn compile_script_with(script: &Script, options: &CompileOptions) -> CutsceneResult<Compiled> {
    debug!(commands = script.commands.len(), ?options, "compiling script");
    let artifact = compile_to_writer(script, options, Cursor::new(Vec::new()))?;
    let instructions = artifact.instructions.clone();
    Ok(Compiled {
        bytes: artifact.into_bytes(),
        instructions,
    })
}

/// Full pipeline from JSON text to a serialisable result.
pub fn compile_to_result(source: &str, filename: &str) -> CompileResult {
    let mut errors = CompileErrors::empty();

    let compiled = parse_script(source, filename).and_then(|script| {
        compile_script(&script).map_err(|e| ScriptError::from_cutscene(filename, &e))
    });

    match compiled {
        Ok(compiled) => CompileResult {
            success: true,
            sha256: Some(compiled.sha256_hex()),
            bytes: Some(compiled.bytes),
            instructions: Some(compiled.instructions),
            errors,
        },
        Err(err) => {
            errors.push_error(err);
            CompileResult {
                success: false,
                bytes: None,
                sha256: None,
                instructions: None,
                errors,
            }
        }
    }
}

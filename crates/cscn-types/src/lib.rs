//! Shared types for the cutscene builder.
//!
//! This crate defines the opcode catalog, target descriptors, the
//! fixed-point codec, jump handles and the error types used by the
//! encoder and the script compiler.

mod error;
pub mod fixed;
mod jump;
pub mod opcode;
mod target;

pub use error::{
    CompileErrors, CutsceneError, CutsceneResult, ErrorCategory, ErrorCode, ScriptError,
    MAX_ERRORS,
};
pub use fixed::{from_fixed, to_fixed, to_fixed_delta, FIXED_ONE, FRACTION_BITS};
pub use jump::JumpId;
pub use opcode::{Opcode, UnknownOpcode};
pub use target::{Target, TargetKind};

/// Magic tag at offset 0 of every cutscene container.
pub const CUTSCENE_MAGIC: [u8; 4] = *b"CSCN";

/// Container format version written at offset 4.
pub const CUTSCENE_VERSION: u32 = 2;

/// Byte offset of the total-size field patched when the container closes.
pub const SIZE_FIELD_OFFSET: u64 = 8;

/// Length of the container header (magic + version + size).
pub const HEADER_LEN: u64 = 12;

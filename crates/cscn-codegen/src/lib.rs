//! Cutscene bytecode encoder: builder calls to a framed `.cscn` stream.
//!
//! # Architecture
//!
//! A [`Cutscene`] owns a [`BinaryWriter`] for the whole build session:
//!
//! ```text
//! open ─► header (magic, version, size = 0)
//!      ─► instruction calls (opcode byte + operands, offsets recorded)
//!      ─► jump_* reserves a u32 address  ◄─ bind() patches it later
//! close ─► all jumps bound? ─► patch size ─► release sink
//! ```
//!
//! ## Value Representation
//!
//! Integers are little-endian. Positions, scales and deltas are 24.8
//! fixed-point `i32`s (see [`cscn_types::fixed`]). Strings are ascii,
//! framed according to [`WriterOptions`].

pub mod builder;
pub mod container;
pub mod instruction_map;
pub mod operands;
pub mod reloc;
pub mod writer;

pub use builder::{Artifact, Cutscene};
pub use instruction_map::{InstructionEntry, InstructionMap};
pub use operands::{BattleDialogue, Dialogue, DEFAULT_FRAMES_PER_LETTER};
pub use reloc::RelocationTable;
pub use writer::{BinaryWriter, StringFraming, WriterOptions};

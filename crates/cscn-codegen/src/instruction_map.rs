//! Instruction map: emission index to byte offset in the container.
//!
//! Every instruction the builder writes gets one entry, in emission order.
//! Jump handles are indices into this map, and external tooling (such as a
//! disassembler) uses it to locate instruction boundaries without decoding
//! operands.

use cscn_types::Opcode;
use serde::{Deserialize, Serialize};

/// The ordered list of instruction start offsets for one container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionMap {
    pub entries: Vec<InstructionEntry>,
}

/// A single instruction's position in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionEntry {
    /// Emission order, 0-based.
    pub index: u32,
    /// Absolute byte offset of the opcode byte.
    pub offset: u64,
    pub opcode: Opcode,
}

impl InstructionMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append the next instruction and return its index.
    pub fn push(&mut self, offset: u64, opcode: Opcode) -> u32 {
        let index = self.entries.len() as u32;
        self.entries.push(InstructionEntry {
            index,
            offset,
            opcode,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u32) -> Option<&InstructionEntry> {
        self.entries.get(index as usize)
    }

    /// Look up the instruction whose opcode byte sits at `offset`.
    pub fn find_by_offset(&self, offset: u64) -> Option<&InstructionEntry> {
        self.entries
            .binary_search_by_key(&offset, |e| e.offset)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Start offsets in emission order.
    pub fn offsets(&self) -> Vec<u64> {
        self.entries.iter().map(|e| e.offset).collect()
    }

    /// Serialize to JSON bytes.
    pub fn to_json(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Deserialize from JSON bytes.
    pub fn from_json(data: &[u8]) -> Option<Self> {
        serde_json::from_slice(data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_json() {
        let mut map = InstructionMap::new();
        map.push(12, Opcode::WaitFrames);
        map.push(15, Opcode::JumpIf);
        map.push(20, Opcode::WaitFrames);

        let json = map.to_json();
        let back = InstructionMap::from_json(&json).expect("parse failed");
        assert_eq!(back, map);
        assert_eq!(back.entries[1].opcode, Opcode::JumpIf);
    }

    #[test]
    fn json_uses_catalog_names() {
        let mut map = InstructionMap::new();
        map.push(12, Opcode::StartBgm);
        let json = String::from_utf8(map.to_json()).unwrap();
        assert!(json.contains("\"START_BGM\""), "{json}");
    }

    #[test]
    fn lookup_by_index_and_offset() {
        let mut map = InstructionMap::new();
        assert_eq!(map.push(12, Opcode::CheckHit), 0);
        assert_eq!(map.push(13, Opcode::Jump), 1);

        assert_eq!(map.get(1).map(|e| e.offset), Some(13));
        assert!(map.get(2).is_none());
        assert_eq!(map.find_by_offset(12).map(|e| e.index), Some(0));
        assert!(map.find_by_offset(14).is_none());
        assert_eq!(map.offsets(), vec![12, 13]);
    }
}

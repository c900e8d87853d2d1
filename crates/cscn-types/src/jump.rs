use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle returned by the jump instructions.
///
/// The value is the jump instruction's emission index. Pass it back to
/// `bind` at the point execution should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JumpId(u32);

impl JumpId {
    /// Wrap an instruction index.
    pub fn from_index(index: u32) -> Self {
        Self(index)
    }

    /// The emission index of the jump instruction.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for JumpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

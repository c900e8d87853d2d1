//! The cutscene opcode catalog.
//!
//! Every instruction begins with one opcode byte. Ids `0..=28` are runtime
//! instructions; [`Opcode::Debug`] (`0xFF`) embeds a diagnostic string the
//! interpreter ignores.
//!
//! | Opcode                  | Operands                                          |
//! |-------------------------|---------------------------------------------------|
//! | `LOAD_SPRITE`           | fixed x, fixed y, string path                     |
//! | `PLAYER_CONTROL`        | bool                                              |
//! | `SET_SHOWN`             | target, bool                                      |
//! | `SET_ANIMATION`         | target, string                                    |
//! | `WAIT_FRAMES`           | u16                                               |
//! | `SET_POS` / `SET_SCALE` | target, fixed x, fixed y                          |
//! | `MOVE_IN_FRAMES`        | target, fixed dx, fixed dy, u16 frames            |
//! | `START_BATTLE`          | u8 count, u16 × count                             |
//! | `JUMP*`                 | u32 address                                       |
//! | ...                     | see the builder for the full operand layouts      |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One-byte instruction tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Opcode {
    LoadSprite = 0,
    PlayerControl = 1,
    WaitExit = 2,
    WaitEnter = 3,
    SetShown = 4,
    SetAnimation = 5,
    WaitFrames = 6,
    SetPos = 7,
    MoveInFrames = 8,
    StartDialogue = 9,
    WaitDialogueEnd = 10,
    StartBattle = 11,
    ExitBattle = 12,
    StartBattleDialogue = 13,
    BattleAttack = 14,
    WaitBattleAttack = 15,
    WaitBattleAction = 16,
    CmpBattleAction = 17,
    CheckHit = 18,
    JumpIf = 19,
    JumpIfNot = 20,
    Jump = 21,
    ManualCamera = 22,
    UnloadSprite = 23,
    ScaleInFrames = 24,
    SetScale = 25,
    StartBgm = 26,
    StopBgm = 27,
    SetPosInFrames = 28,
    Debug = 0xFF,
}

/// A byte that does not name any opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown opcode 0x{0:02X}")]
pub struct UnknownOpcode(pub u8);

impl Opcode {
    /// Every opcode, in id order.
    pub const ALL: [Opcode; 30] = [
        Opcode::LoadSprite,
        Opcode::PlayerControl,
        Opcode::WaitExit,
        Opcode::WaitEnter,
        Opcode::SetShown,
        Opcode::SetAnimation,
        Opcode::WaitFrames,
        Opcode::SetPos,
        Opcode::MoveInFrames,
        Opcode::StartDialogue,
        Opcode::WaitDialogueEnd,
        Opcode::StartBattle,
        Opcode::ExitBattle,
        Opcode::StartBattleDialogue,
        Opcode::BattleAttack,
        Opcode::WaitBattleAttack,
        Opcode::WaitBattleAction,
        Opcode::CmpBattleAction,
        Opcode::CheckHit,
        Opcode::JumpIf,
        Opcode::JumpIfNot,
        Opcode::Jump,
        Opcode::ManualCamera,
        Opcode::UnloadSprite,
        Opcode::ScaleInFrames,
        Opcode::SetScale,
        Opcode::StartBgm,
        Opcode::StopBgm,
        Opcode::SetPosInFrames,
        Opcode::Debug,
    ];

    /// The opcode byte written to the stream.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The interpreter-facing name, e.g. `"LOAD_SPRITE"`.
    pub fn name(self) -> &'static str {
        match self {
            Opcode::LoadSprite => "LOAD_SPRITE",
            Opcode::PlayerControl => "PLAYER_CONTROL",
            Opcode::WaitExit => "WAIT_EXIT",
            Opcode::WaitEnter => "WAIT_ENTER",
            Opcode::SetShown => "SET_SHOWN",
            Opcode::SetAnimation => "SET_ANIMATION",
            Opcode::WaitFrames => "WAIT_FRAMES",
            Opcode::SetPos => "SET_POS",
            Opcode::MoveInFrames => "MOVE_IN_FRAMES",
            Opcode::StartDialogue => "START_DIALOGUE",
            Opcode::WaitDialogueEnd => "WAIT_DIALOGUE_END",
            Opcode::StartBattle => "START_BATTLE",
            Opcode::ExitBattle => "EXIT_BATTLE",
            Opcode::StartBattleDialogue => "START_BATTLE_DIALOGUE",
            Opcode::BattleAttack => "BATTLE_ATTACK",
            Opcode::WaitBattleAttack => "WAIT_BATTLE_ATTACK",
            Opcode::WaitBattleAction => "WAIT_BATTLE_ACTION",
            Opcode::CmpBattleAction => "CMP_BATTLE_ACTION",
            Opcode::CheckHit => "CHECK_HIT",
            Opcode::JumpIf => "JUMP_IF",
            Opcode::JumpIfNot => "JUMP_IF_NOT",
            Opcode::Jump => "JUMP",
            Opcode::ManualCamera => "MANUAL_CAMERA",
            Opcode::UnloadSprite => "UNLOAD_SPRITE",
            Opcode::ScaleInFrames => "SCALE_IN_FRAMES",
            Opcode::SetScale => "SET_SCALE",
            Opcode::StartBgm => "START_BGM",
            Opcode::StopBgm => "STOP_BGM",
            Opcode::SetPosInFrames => "SET_POS_IN_FRAMES",
            Opcode::Debug => "DEBUG",
        }
    }

    /// Whether this opcode carries a 4-byte relocated address.
    pub fn is_jump(self) -> bool {
        matches!(self, Opcode::JumpIf | Opcode::JumpIfNot | Opcode::Jump)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = UnknownOpcode;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.as_u8() == byte)
            .ok_or(UnknownOpcode(byte))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

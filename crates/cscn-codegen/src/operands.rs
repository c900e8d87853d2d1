//! Operand bundles for the instructions with long operand lists.

use cscn_types::Target;
use serde::{Deserialize, Serialize};

/// Letter reveal speed used when a dialogue does not specify one.
pub const DEFAULT_FRAMES_PER_LETTER: u16 = 4;

fn default_frames_per_letter() -> u16 {
    DEFAULT_FRAMES_PER_LETTER
}

/// Operands of `START_DIALOGUE`, in stream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dialogue {
    pub text_id: u16,
    /// Sprite shown next to the text box.
    pub speaker: String,
    pub x: f64,
    pub y: f64,
    pub idle_anim: String,
    pub talk_anim: String,
    /// The in-room entity that animates while talking.
    pub speaker_target: Target,
    pub idle_anim2: String,
    pub talk_anim2: String,
    pub font: String,
    #[serde(default = "default_frames_per_letter")]
    pub frames_per_letter: u16,
}

/// Operands of `START_BATTLE_DIALOGUE`, in stream order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BattleDialogue {
    pub x: f64,
    pub y: f64,
    pub text_id: u16,
    pub speaker_target: Target,
    pub idle_anim: String,
    pub talk_anim: String,
    pub duration: u16,
}

//! Script documents: one JSON object per builder call.
//!
//! ```json
//! {
//!   "options": { "string_framing": "nul-terminated" },
//!   "commands": [
//!     { "op": "wait_frames", "frames": 10 },
//!     { "op": "jump_if" },
//!     { "op": "wait_frames", "frames": 5 },
//!     { "op": "bind", "jump": 1 }
//!   ]
//! }
//! ```
//!
//! A jump's handle is its position among the emitted instructions, so
//! `bind` refers to jumps by that index. `bind` itself emits nothing and
//! does not take an index.

use std::io::{Seek, Write};

use cscn_codegen::{BattleDialogue, Cutscene, Dialogue, StringFraming, WriterOptions};
use cscn_types::{CutsceneResult, JumpId, Target};
use serde::{Deserialize, Serialize};

/// A parsed script document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub options: CompileOptions,
    pub commands: Vec<Command>,
}

/// Compilation settings. Every field has a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    pub string_framing: StringFraming,
}

impl CompileOptions {
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            string_framing: self.string_framing,
        }
    }
}

/// One builder call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Command {
    Debug {
        message: String,
    },
    LoadSprite {
        x: f64,
        y: f64,
        path: String,
    },
    UnloadSprite {
        sprite: u8,
    },
    PlayerControl {
        enabled: bool,
    },
    ManualCamera {
        enabled: bool,
    },
    WaitExit,
    WaitEnter,
    SetShown {
        target: Target,
        shown: bool,
    },
    SetAnimation {
        target: Target,
        animation: String,
    },
    WaitFrames {
        frames: u16,
    },
    SetPos {
        target: Target,
        x: f64,
        y: f64,
    },
    SetScale {
        target: Target,
        x: f64,
        y: f64,
    },
    SetPosInFrames {
        target: Target,
        x: f64,
        y: f64,
        frames: u16,
    },
    MoveInFrames {
        target: Target,
        dx: f64,
        dy: f64,
        frames: u16,
    },
    ScaleInFrames {
        target: Target,
        x: f64,
        y: f64,
        frames: u16,
    },
    StartDialogue(Dialogue),
    WaitDialogueEnd,
    StartBattle {
        enemies: Vec<u16>,
    },
    ExitBattle,
    StartBattleDialogue(BattleDialogue),
    BattleAttack {
        pattern: u16,
    },
    WaitBattleAttack,
    WaitBattleAction {
        text_id: u8,
        actions: Vec<u8>,
    },
    CmpBattleAction {
        action: u8,
    },
    CheckHit,
    JumpIf,
    JumpIfNot,
    Jump,
    Bind {
        jump: JumpId,
    },
    StartBgm {
        path: String,
        #[serde(rename = "loop", default)]
        looped: bool,
    },
    StopBgm,
}

impl Command {
    /// Issue this command against a builder. Jump commands return their
    /// handle.
    pub fn emit<W: Write + Seek>(&self, cs: &mut Cutscene<W>) -> CutsceneResult<Option<JumpId>> {
        match self {
            Command::Debug { message } => cs.debug(message)?,
            Command::LoadSprite { x, y, path } => cs.load_sprite(*x, *y, path)?,
            Command::UnloadSprite { sprite } => cs.unload_sprite(*sprite)?,
            Command::PlayerControl { enabled } => cs.player_control(*enabled)?,
            Command::ManualCamera { enabled } => cs.manual_camera(*enabled)?,
            Command::WaitExit => cs.wait_exit()?,
            Command::WaitEnter => cs.wait_enter()?,
            Command::SetShown { target, shown } => cs.set_shown(*target, *shown)?,
            Command::SetAnimation { target, animation } => cs.set_animation(*target, animation)?,
            Command::WaitFrames { frames } => cs.wait_frames(*frames)?,
            Command::SetPos { target, x, y } => cs.set_pos(*target, *x, *y)?,
            Command::SetScale { target, x, y } => cs.set_scale(*target, *x, *y)?,
            Command::SetPosInFrames {
                target,
                x,
                y,
                frames,
            } => cs.set_pos_in_frames(*target, *x, *y, *frames)?,
            Command::MoveInFrames {
                target,
                dx,
                dy,
                frames,
            } => cs.move_in_frames(*target, *dx, *dy, *frames)?,
            Command::ScaleInFrames {
                target,
                x,
                y,
                frames,
            } => cs.scale_in_frames(*target, *x, *y, *frames)?,
            Command::StartDialogue(dialogue) => cs.start_dialogue(dialogue)?,
            Command::WaitDialogueEnd => cs.wait_dialogue_end()?,
            Command::StartBattle { enemies } => cs.start_battle(enemies)?,
            Command::ExitBattle => cs.exit_battle()?,
            Command::StartBattleDialogue(dialogue) => cs.start_battle_dialogue(dialogue)?,
            Command::BattleAttack { pattern } => cs.battle_attack(*pattern)?,
            Command::WaitBattleAttack => cs.wait_battle_attack()?,
            Command::WaitBattleAction { text_id, actions } => {
                cs.wait_battle_action(*text_id, actions)?
            }
            Command::CmpBattleAction { action } => cs.cmp_battle_action(*action)?,
            Command::CheckHit => cs.check_hit()?,
            Command::JumpIf => return cs.jump_if().map(Some),
            Command::JumpIfNot => return cs.jump_if_not().map(Some),
            Command::Jump => return cs.jump().map(Some),
            Command::Bind { jump } => cs.bind(*jump)?,
            Command::StartBgm { path, looped } => cs.start_bgm(path, *looped)?,
            Command::StopBgm => cs.stop_bgm()?,
        }
        Ok(None)
    }
}

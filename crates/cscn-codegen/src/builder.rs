//! The cutscene builder.
//!
//! Opening a [`Cutscene`] writes the container header. Each instruction
//! method appends one opcode-tagged record and logs its start offset in the
//! [`InstructionMap`]. Jump methods reserve an address field and hand back a
//! [`JumpId`]; [`Cutscene::bind`] later fills that field with the current
//! stream position. [`Cutscene::close`] refuses to finish while any jump is
//! unbound, then patches the container size.

use std::io::{Cursor, Seek, Write};

use cscn_types::{
    to_fixed, to_fixed_delta, CutsceneError, CutsceneResult, JumpId, Opcode, Target,
};
use tracing::{debug, trace};

use crate::container;
use crate::instruction_map::InstructionMap;
use crate::operands::{BattleDialogue, Dialogue};
use crate::reloc::RelocationTable;
use crate::writer::{BinaryWriter, WriterOptions};

// ══════════════════════════════════════════════════════════════════════════════
// Artifact
// ══════════════════════════════════════════════════════════════════════════════

/// What a successfully closed builder hands back.
#[derive(Debug)]
pub struct Artifact<W> {
    /// The released sink, flushed and positioned at the end of the stream.
    pub sink: W,
    /// The value written into the header's size field.
    pub size: u32,
    pub instructions: InstructionMap,
}

impl Artifact<Cursor<Vec<u8>>> {
    pub fn into_bytes(self) -> Vec<u8> {
        self.sink.into_inner()
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Builder
// ══════════════════════════════════════════════════════════════════════════════

/// A single build session over an exclusively owned sink.
#[derive(Debug)]
pub struct Cutscene<W: Write + Seek> {
    wtr: BinaryWriter<W>,
    /// Offset of the header's size field.
    size_field: u64,
    instructions: InstructionMap,
    relocations: RelocationTable,
}

impl Cutscene<Cursor<Vec<u8>>> {
    /// Open a builder that writes into a fresh in-memory buffer.
    pub fn in_memory(options: WriterOptions) -> CutsceneResult<Self> {
        Self::open(BinaryWriter::with_options(Cursor::new(Vec::new()), options))
    }
}

impl<W: Write + Seek> Cutscene<W> {
    /// Take ownership of the sink and write the container header.
    pub fn open(mut wtr: BinaryWriter<W>) -> CutsceneResult<Self> {
        let size_field = container::write_header(&mut wtr)?;
        debug!(size_field, "opened cutscene container");
        Ok(Self {
            wtr,
            size_field,
            instructions: InstructionMap::new(),
            relocations: RelocationTable::new(),
        })
    }

    /// Instructions emitted so far.
    pub fn instructions(&self) -> &InstructionMap {
        &self.instructions
    }

    /// Jumps that have not been bound yet, in ascending order.
    pub fn pending_jumps(&self) -> Vec<JumpId> {
        self.relocations.unresolved()
    }

    /// Current stream position.
    pub fn position(&mut self) -> CutsceneResult<u64> {
        self.wtr.tell()
    }

    /// Verify every jump is bound, patch the size field and release the sink.
    pub fn close(mut self) -> CutsceneResult<Artifact<W>> {
        if !self.relocations.is_empty() {
            return Err(CutsceneError::UnresolvedJumps(self.relocations.unresolved()));
        }
        let size = container::patch_size(&mut self.wtr, self.size_field)?;
        debug!(size, instructions = self.instructions.len(), "closed cutscene container");
        let sink = self.wtr.close()?;
        Ok(Artifact {
            sink,
            size,
            instructions: self.instructions,
        })
    }

    // ── Emission ─────────────────────────────────────────────────────────

    /// Record the instruction start offset, then write the opcode byte.
    /// Returns the instruction's index.
    fn write_header(&mut self, opcode: Opcode) -> CutsceneResult<u32> {
        let offset = self.wtr.tell()?;
        let index = self.instructions.push(offset, opcode);
        trace!(index, offset, %opcode, "emit");
        self.wtr.write_u8(opcode.as_u8())?;
        Ok(index)
    }

    fn write_fixed_pair(&mut self, x: f64, y: f64) -> CutsceneResult<()> {
        self.wtr.write_i32(to_fixed(x))?;
        self.wtr.write_i32(to_fixed(y))
    }

    /// Embed a diagnostic string. Ignored by the interpreter.
    pub fn debug(&mut self, message: &str) -> CutsceneResult<()> {
        self.write_header(Opcode::Debug)?;
        self.wtr.write_string(message)
    }

    pub fn load_sprite(&mut self, x: f64, y: f64, sprite_path: &str) -> CutsceneResult<()> {
        self.write_header(Opcode::LoadSprite)?;
        self.write_fixed_pair(x, y)?;
        self.wtr.write_string(sprite_path)
    }

    /// Unload a sprite by its room sprite id.
    pub fn unload_sprite(&mut self, room_sprite_id: u8) -> CutsceneResult<()> {
        self.write_header(Opcode::UnloadSprite)?;
        self.wtr.write_u8(room_sprite_id)
    }

    pub fn player_control(&mut self, control: bool) -> CutsceneResult<()> {
        self.write_header(Opcode::PlayerControl)?;
        self.wtr.write_bool(control)
    }

    pub fn manual_camera(&mut self, control: bool) -> CutsceneResult<()> {
        self.write_header(Opcode::ManualCamera)?;
        self.wtr.write_bool(control)
    }

    pub fn wait_exit(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::WaitExit).map(drop)
    }

    pub fn wait_enter(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::WaitEnter).map(drop)
    }

    pub fn set_shown(&mut self, target: Target, shown: bool) -> CutsceneResult<()> {
        self.write_header(Opcode::SetShown)?;
        self.wtr.write_target(target)?;
        self.wtr.write_bool(shown)
    }

    pub fn set_animation(&mut self, target: Target, animation: &str) -> CutsceneResult<()> {
        self.write_header(Opcode::SetAnimation)?;
        self.wtr.write_target(target)?;
        self.wtr.write_string(animation)
    }

    pub fn wait_frames(&mut self, frames: u16) -> CutsceneResult<()> {
        self.write_header(Opcode::WaitFrames)?;
        self.wtr.write_u16(frames)
    }

    // ── Navigation ───────────────────────────────────────────────────────

    pub fn set_pos(&mut self, target: Target, x: f64, y: f64) -> CutsceneResult<()> {
        self.write_header(Opcode::SetPos)?;
        self.wtr.write_target(target)?;
        self.write_fixed_pair(x, y)
    }

    pub fn set_scale(&mut self, target: Target, x: f64, y: f64) -> CutsceneResult<()> {
        self.write_header(Opcode::SetScale)?;
        self.wtr.write_target(target)?;
        self.write_fixed_pair(x, y)
    }

    pub fn set_pos_in_frames(
        &mut self,
        target: Target,
        x: f64,
        y: f64,
        frames: u16,
    ) -> CutsceneResult<()> {
        self.write_header(Opcode::SetPosInFrames)?;
        self.wtr.write_target(target)?;
        self.write_fixed_pair(x, y)?;
        self.wtr.write_u16(frames)
    }

    /// Move relative to the current position. Deltas use the
    /// magnitude-then-sign fixed-point conversion.
    pub fn move_in_frames(
        &mut self,
        target: Target,
        dx: f64,
        dy: f64,
        frames: u16,
    ) -> CutsceneResult<()> {
        self.write_header(Opcode::MoveInFrames)?;
        self.wtr.write_target(target)?;
        self.wtr.write_i32(to_fixed_delta(dx))?;
        self.wtr.write_i32(to_fixed_delta(dy))?;
        self.wtr.write_u16(frames)
    }

    pub fn scale_in_frames(
        &mut self,
        target: Target,
        x: f64,
        y: f64,
        frames: u16,
    ) -> CutsceneResult<()> {
        self.write_header(Opcode::ScaleInFrames)?;
        self.wtr.write_target(target)?;
        self.write_fixed_pair(x, y)?;
        self.wtr.write_u16(frames)
    }

    // ── Dialogue ─────────────────────────────────────────────────────────

    pub fn start_dialogue(&mut self, dialogue: &Dialogue) -> CutsceneResult<()> {
        self.write_header(Opcode::StartDialogue)?;
        self.wtr.write_u16(dialogue.text_id)?;
        self.wtr.write_string(&dialogue.speaker)?;
        self.write_fixed_pair(dialogue.x, dialogue.y)?;
        self.wtr.write_string(&dialogue.idle_anim)?;
        self.wtr.write_string(&dialogue.talk_anim)?;
        self.wtr.write_target(dialogue.speaker_target)?;
        self.wtr.write_string(&dialogue.idle_anim2)?;
        self.wtr.write_string(&dialogue.talk_anim2)?;
        self.wtr.write_string(&dialogue.font)?;
        self.wtr.write_u16(dialogue.frames_per_letter)
    }

    pub fn wait_dialogue_end(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::WaitDialogueEnd).map(drop)
    }

    // ── Battle ───────────────────────────────────────────────────────────

    /// The enemy count is a single byte; more than 255 enemies wraps.
    pub fn start_battle(&mut self, enemies: &[u16]) -> CutsceneResult<()> {
        self.write_header(Opcode::StartBattle)?;
        self.wtr.write_u8(enemies.len() as u8)?;
        for &enemy_id in enemies {
            self.wtr.write_u16(enemy_id)?;
        }
        Ok(())
    }

    pub fn exit_battle(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::ExitBattle).map(drop)
    }

    pub fn start_battle_dialogue(&mut self, dialogue: &BattleDialogue) -> CutsceneResult<()> {
        self.write_header(Opcode::StartBattleDialogue)?;
        self.write_fixed_pair(dialogue.x, dialogue.y)?;
        self.wtr.write_u16(dialogue.text_id)?;
        self.wtr.write_target(dialogue.speaker_target)?;
        self.wtr.write_string(&dialogue.idle_anim)?;
        self.wtr.write_string(&dialogue.talk_anim)?;
        self.wtr.write_u16(dialogue.duration)
    }

    pub fn battle_attack(&mut self, attack_pattern_id: u16) -> CutsceneResult<()> {
        self.write_header(Opcode::BattleAttack)?;
        self.wtr.write_u16(attack_pattern_id)
    }

    pub fn wait_battle_attack(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::WaitBattleAttack).map(drop)
    }

    /// The action count is a single byte; more than 255 actions wraps.
    pub fn wait_battle_action(&mut self, text_id: u8, act_actions: &[u8]) -> CutsceneResult<()> {
        self.write_header(Opcode::WaitBattleAction)?;
        self.wtr.write_u8(text_id)?;
        self.wtr.write_u8(act_actions.len() as u8)?;
        for &action in act_actions {
            self.wtr.write_u8(action)?;
        }
        Ok(())
    }

    pub fn cmp_battle_action(&mut self, compare_action: u8) -> CutsceneResult<()> {
        self.write_header(Opcode::CmpBattleAction)?;
        self.wtr.write_u8(compare_action)
    }

    pub fn check_hit(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::CheckHit).map(drop)
    }

    // ── Logic ────────────────────────────────────────────────────────────

    pub fn jump_if(&mut self) -> CutsceneResult<JumpId> {
        self.emit_jump(Opcode::JumpIf)
    }

    pub fn jump_if_not(&mut self) -> CutsceneResult<JumpId> {
        self.emit_jump(Opcode::JumpIfNot)
    }

    pub fn jump(&mut self) -> CutsceneResult<JumpId> {
        self.emit_jump(Opcode::Jump)
    }

    /// Emit a jump with a zeroed address and register it for relocation.
    fn emit_jump(&mut self, opcode: Opcode) -> CutsceneResult<JumpId> {
        let id = JumpId::from_index(self.write_header(opcode)?);
        let placeholder = self.wtr.tell()?;
        self.relocations.reserve(id, placeholder);
        self.wtr.write_u32(0)?;
        Ok(id)
    }

    /// Point `jump` at the current stream position.
    ///
    /// Binding an id that is unknown or already bound does nothing.
    pub fn bind(&mut self, jump: JumpId) -> CutsceneResult<()> {
        let Some(placeholder) = self.relocations.placeholder(jump) else {
            debug!(%jump, "bind ignored: no pending jump with this id");
            return Ok(());
        };
        let landing = self.wtr.tell()?;
        self.wtr.patch_at(placeholder, |w| w.write_u32(landing as u32))?;
        self.relocations.take(jump);
        debug!(%jump, placeholder, landing, "bound jump");
        Ok(())
    }

    // ── Music ────────────────────────────────────────────────────────────

    pub fn start_bgm(&mut self, path: &str, looped: bool) -> CutsceneResult<()> {
        self.write_header(Opcode::StartBgm)?;
        self.wtr.write_bool(looped)?;
        self.wtr.write_string(path)
    }

    pub fn stop_bgm(&mut self) -> CutsceneResult<()> {
        self.write_header(Opcode::StopBgm).map(drop)
    }
}

//! Container framing.
//!
//! ```text
//! offset 0  : [u8; 4] magic "CSCN"
//! offset 4  : u32     format version
//! offset 8  : u32     total size in bytes, patched on close
//! offset 12 : instruction stream
//! ```

use std::io::{Seek, Write};

use cscn_types::{CutsceneResult, CUTSCENE_MAGIC, CUTSCENE_VERSION};

use crate::writer::BinaryWriter;

/// Write the header with a zeroed size field. Returns the size field offset.
pub fn write_header<W: Write + Seek>(wtr: &mut BinaryWriter<W>) -> CutsceneResult<u64> {
    wtr.write_bytes(&CUTSCENE_MAGIC)?;
    wtr.write_u32(CUTSCENE_VERSION)?;
    let size_field = wtr.tell()?;
    wtr.write_u32(0)?;
    Ok(size_field)
}

/// Patch the size field with the current cursor position and leave the
/// cursor at the end of the stream. Returns the size written.
pub fn patch_size<W: Write + Seek>(
    wtr: &mut BinaryWriter<W>,
    size_field: u64,
) -> CutsceneResult<u32> {
    // The format caps containers at 4 GiB.
    let size = wtr.tell()? as u32;
    wtr.patch_at(size_field, |w| w.write_u32(size))?;
    Ok(size)
}

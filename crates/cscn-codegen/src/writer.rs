//! Little-endian byte sink over any seekable writer.
//!
//! Integers are written little-endian, booleans as a single `0`/`1` byte and
//! strings as ascii framed according to [`StringFraming`].

use std::io::{Seek, SeekFrom, Write};
use std::str::FromStr;

use cscn_types::{CutsceneError, CutsceneResult, Target};
use serde::{Deserialize, Serialize};

/// How string operands are delimited in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFraming {
    /// Ascii bytes followed by a `0x00` terminator.
    #[default]
    NulTerminated,
    /// A `u8` byte count followed by the ascii bytes.
    U8Prefixed,
    /// A little-endian `u16` byte count followed by the ascii bytes.
    U16Prefixed,
}

impl StringFraming {
    pub fn name(self) -> &'static str {
        match self {
            StringFraming::NulTerminated => "nul-terminated",
            StringFraming::U8Prefixed => "u8-prefixed",
            StringFraming::U16Prefixed => "u16-prefixed",
        }
    }
}

impl FromStr for StringFraming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nul-terminated" | "nul" => Ok(StringFraming::NulTerminated),
            "u8-prefixed" | "u8" => Ok(StringFraming::U8Prefixed),
            "u16-prefixed" | "u16" => Ok(StringFraming::U16Prefixed),
            other => Err(format!(
                "unknown string framing `{other}` (expected nul-terminated, u8-prefixed or u16-prefixed)"
            )),
        }
    }
}

/// Options controlling how the sink lays out operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterOptions {
    pub string_framing: StringFraming,
}

/// The byte sink the builder writes through.
///
/// Owns its inner writer exclusively until [`BinaryWriter::close`].
#[derive(Debug)]
pub struct BinaryWriter<W: Write + Seek> {
    inner: W,
    options: WriterOptions,
}

impl<W: Write + Seek> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_options(inner, WriterOptions::default())
    }

    pub fn with_options(inner: W, options: WriterOptions) -> Self {
        Self { inner, options }
    }

    pub fn options(&self) -> WriterOptions {
        self.options
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> CutsceneResult<()> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> CutsceneResult<()> {
        self.write_bytes(&[v])
    }

    pub fn write_u16(&mut self, v: u16) -> CutsceneResult<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_u32(&mut self, v: u32) -> CutsceneResult<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_i32(&mut self, v: i32) -> CutsceneResult<()> {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_bool(&mut self, v: bool) -> CutsceneResult<()> {
        self.write_u8(u8::from(v))
    }

    /// Write a target descriptor: the tag byte, then the id for sprites only.
    pub fn write_target(&mut self, target: Target) -> CutsceneResult<()> {
        self.write_u8(target.kind().as_u8())?;
        if let Some(id) = target.sprite_id() {
            self.write_u8(id)?;
        }
        Ok(())
    }

    /// Write an ascii string using the configured framing.
    pub fn write_string(&mut self, s: &str) -> CutsceneResult<()> {
        if !s.is_ascii() {
            return Err(CutsceneError::NonAsciiString(s.to_string()));
        }
        let bytes = s.as_bytes();
        match self.options.string_framing {
            StringFraming::NulTerminated => {
                self.write_bytes(bytes)?;
                self.write_u8(0)
            }
            StringFraming::U8Prefixed => {
                let len = u8::try_from(bytes.len()).map_err(|_| CutsceneError::StringTooLong {
                    len: bytes.len(),
                    max: u8::MAX as usize,
                })?;
                self.write_u8(len)?;
                self.write_bytes(bytes)
            }
            StringFraming::U16Prefixed => {
                let len =
                    u16::try_from(bytes.len()).map_err(|_| CutsceneError::StringTooLong {
                        len: bytes.len(),
                        max: u16::MAX as usize,
                    })?;
                self.write_u16(len)?;
                self.write_bytes(bytes)
            }
        }
    }

    /// Current cursor position.
    pub fn tell(&mut self) -> CutsceneResult<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Move the cursor to an absolute offset.
    pub fn seek(&mut self, offset: u64) -> CutsceneResult<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Run `f` with the cursor at `offset`, then put the cursor back where it
    /// was. The cursor is restored even when `f` fails.
    pub fn patch_at<T>(
        &mut self,
        offset: u64,
        f: impl FnOnce(&mut Self) -> CutsceneResult<T>,
    ) -> CutsceneResult<T> {
        let resume = self.tell()?;
        self.seek(offset)?;
        let result = f(self);
        let restored = self.seek(resume);
        let value = result?;
        restored?;
        Ok(value)
    }

    /// Flush and release the inner writer.
    pub fn close(mut self) -> CutsceneResult<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn writer(framing: StringFraming) -> BinaryWriter<Cursor<Vec<u8>>> {
        BinaryWriter::with_options(
            Cursor::new(Vec::new()),
            WriterOptions {
                string_framing: framing,
            },
        )
    }

    fn bytes(w: BinaryWriter<Cursor<Vec<u8>>>) -> Vec<u8> {
        w.close().unwrap().into_inner()
    }

    #[test]
    fn integers_are_little_endian() {
        let mut w = writer(StringFraming::NulTerminated);
        w.write_u8(0xAB).unwrap();
        w.write_u16(0x1234).unwrap();
        w.write_u32(0xDEADBEEF).unwrap();
        w.write_i32(-2).unwrap();
        w.write_bool(true).unwrap();
        w.write_bool(false).unwrap();
        assert_eq!(
            bytes(w),
            [0xAB, 0x34, 0x12, 0xEF, 0xBE, 0xAD, 0xDE, 0xFE, 0xFF, 0xFF, 0xFF, 1, 0]
        );
    }

    #[test]
    fn targets_write_id_for_sprites_only() {
        let mut w = writer(StringFraming::NulTerminated);
        w.write_target(Target::Null).unwrap();
        w.write_target(Target::Player).unwrap();
        w.write_target(Target::Sprite(4)).unwrap();
        w.write_target(Target::Camera).unwrap();
        assert_eq!(bytes(w), [0, 1, 2, 4, 3]);
    }

    #[test]
    fn string_framings() {
        let mut w = writer(StringFraming::NulTerminated);
        w.write_string("abc").unwrap();
        assert_eq!(bytes(w), b"abc\0");

        let mut w = writer(StringFraming::U8Prefixed);
        w.write_string("abc").unwrap();
        assert_eq!(bytes(w), [3, b'a', b'b', b'c']);

        let mut w = writer(StringFraming::U16Prefixed);
        w.write_string("ab").unwrap();
        assert_eq!(bytes(w), [2, 0, b'a', b'b']);
    }

    #[test]
    fn empty_string_is_just_the_frame() {
        let mut w = writer(StringFraming::NulTerminated);
        w.write_string("").unwrap();
        assert_eq!(bytes(w), [0]);
    }

    #[test]
    fn non_ascii_rejected() {
        let mut w = writer(StringFraming::NulTerminated);
        let err = w.write_string("café").unwrap_err();
        assert!(matches!(err, CutsceneError::NonAsciiString(s) if s == "café"));
        assert_eq!(w.tell().unwrap(), 0, "nothing written for rejected string");
    }

    #[test]
    fn u8_prefix_overflow_rejected() {
        let mut w = writer(StringFraming::U8Prefixed);
        let long = "x".repeat(256);
        let err = w.write_string(&long).unwrap_err();
        assert!(matches!(
            err,
            CutsceneError::StringTooLong { len: 256, max: 255 }
        ));
    }

    #[test]
    fn patch_at_restores_cursor() {
        let mut w = writer(StringFraming::NulTerminated);
        w.write_u32(0).unwrap();
        w.write_u32(7).unwrap();
        w.patch_at(0, |w| w.write_u32(99)).unwrap();
        assert_eq!(w.tell().unwrap(), 8);
        w.write_u8(1).unwrap();
        assert_eq!(bytes(w), [99, 0, 0, 0, 7, 0, 0, 0, 1]);
    }

    #[test]
    fn patch_at_restores_cursor_on_failure() {
        let mut w = writer(StringFraming::NulTerminated);
        w.write_u32(0).unwrap();
        w.write_u16(0).unwrap();
        let result = w.patch_at(0, |w| w.write_string("ü"));
        assert!(result.is_err());
        assert_eq!(w.tell().unwrap(), 6);
    }

    #[test]
    fn framing_from_str() {
        assert_eq!(
            "nul".parse::<StringFraming>(),
            Ok(StringFraming::NulTerminated)
        );
        assert_eq!(
            "u8-prefixed".parse::<StringFraming>(),
            Ok(StringFraming::U8Prefixed)
        );
        assert_eq!(
            "u16".parse::<StringFraming>(),
            Ok(StringFraming::U16Prefixed)
        );
        assert!("utf8".parse::<StringFraming>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag byte identifying what kind of entity an instruction acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TargetKind {
    Null = 0,
    Player = 1,
    Sprite = 2,
    Camera = 3,
}

impl TargetKind {
    /// The tag byte written to the stream.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The entity an instruction operates on.
///
/// Serialized as the tag byte, followed by the sprite id for
/// [`Target::Sprite`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Target {
    #[default]
    Null,
    Player,
    Sprite(u8),
    Camera,
}

impl Target {
    /// Build a target from a tag and an id. The id is dropped for every
    /// kind other than [`TargetKind::Sprite`].
    pub fn new(kind: TargetKind, id: u8) -> Self {
        match kind {
            TargetKind::Null => Target::Null,
            TargetKind::Player => Target::Player,
            TargetKind::Sprite => Target::Sprite(id),
            TargetKind::Camera => Target::Camera,
        }
    }

    pub fn kind(self) -> TargetKind {
        match self {
            Target::Null => TargetKind::Null,
            Target::Player => TargetKind::Player,
            Target::Sprite(_) => TargetKind::Sprite,
            Target::Camera => TargetKind::Camera,
        }
    }

    /// The sprite id, if this target carries one.
    pub fn sprite_id(self) -> Option<u8> {
        match self {
            Target::Sprite(id) => Some(id),
            _ => None,
        }
    }

    /// Number of bytes this target occupies in the stream.
    pub fn encoded_len(self) -> usize {
        if self.sprite_id().is_some() {
            2
        } else {
            1
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Null => write!(f, "null"),
            Target::Player => write!(f, "player"),
            Target::Sprite(id) => write!(f, "sprite#{id}"),
            Target::Camera => write!(f, "camera"),
        }
    }
}

//! Emoji categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight expressions an emoji overlay can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiCategory {
    /// Smiling, both eyes open.
    Smile,
    /// Not smiling, both eyes open.
    Frown,
    /// Smiling, left eye closed.
    LeftWink,
    /// Smiling, right eye closed.
    RightWink,
    /// Not smiling, left eye closed.
    LeftWinkFrown,
    /// Not smiling, right eye closed.
    RightWinkFrown,
    /// Smiling, both eyes closed.
    ClosedEyeSmile,
    /// Not smiling, both eyes closed.
    ClosedEyeFrown,
}

impl EmojiCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Smile,
        Self::Frown,
        Self::LeftWink,
        Self::RightWink,
        Self::LeftWinkFrown,
        Self::RightWinkFrown,
        Self::ClosedEyeSmile,
        Self::ClosedEyeFrown,
    ];

    /// Asset identifier used to look up the emoji image.
    #[must_use]
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Frown => "frown",
            Self::LeftWink => "leftwink",
            Self::RightWink => "rightwink",
            Self::LeftWinkFrown => "leftwinkfrown",
            Self::RightWinkFrown => "rightwinkfrown",
            Self::ClosedEyeSmile => "closed_smile",
            Self::ClosedEyeFrown => "closed_frown",
        }
    }

    /// Snake-case name, as used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Frown => "frown",
            Self::LeftWink => "left_wink",
            Self::RightWink => "right_wink",
            Self::LeftWinkFrown => "left_wink_frown",
            Self::RightWinkFrown => "right_wink_frown",
            Self::ClosedEyeSmile => "closed_eye_smile",
            Self::ClosedEyeFrown => "closed_eye_frown",
        }
    }

    /// Whether the emoji is smiling.
    #[must_use]
    pub const fn is_smiling(self) -> bool {
        matches!(
            self,
            Self::Smile | Self::LeftWink | Self::RightWink | Self::ClosedEyeSmile
        )
    }

    /// Whether the emoji's left eye is drawn closed.
    #[must_use]
    pub const fn left_eye_closed(self) -> bool {
        matches!(
            self,
            Self::LeftWink | Self::LeftWinkFrown | Self::ClosedEyeSmile | Self::ClosedEyeFrown
        )
    }

    /// Whether the emoji's right eye is drawn closed.
    #[must_use]
    pub const fn right_eye_closed(self) -> bool {
        matches!(
            self,
            Self::RightWink | Self::RightWinkFrown | Self::ClosedEyeSmile | Self::ClosedEyeFrown
        )
    }
}

impl fmt::Display for EmojiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

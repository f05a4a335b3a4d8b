use serde::{Deserialize, Serialize};

use crate::geometry::Rectangle;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // UI -> app
    TriggerCapture {
        source: TriggerSource,
    },
    RegionSelected(Rectangle),
    SelectionDismissed,
    CopyRecent(usize),
    ClearRecents,
    ToggleVocalization,
    SelectShortcut(i32),
    Quit,

    // app -> UI
    OpenSurface,
    CloseSurface,
    RecentsChanged(Vec<String>),
    VocalizationChanged(bool),
    ShortcutChanged(ShortcutBinding),
    CaptureStatusUpdate {
        status: String,
        capturing: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Shortcut,
    Menu,
}

/// One of the four system-wide capture shortcuts, `<modifier>+Shift+6..9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ShortcutBinding {
    Six,
    Seven,
    Eight,
    #[default]
    Nine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("shortcut code {requested} is outside the legal range 6-9")]
pub struct ShortcutConflict {
    pub requested: i32,
}

#[cfg(target_os = "macos")]
const MODIFIER_LABEL: &str = "\u{21e7}\u{2318}";
#[cfg(not(target_os = "macos"))]
const MODIFIER_LABEL: &str = "Ctrl+Shift+";

impl ShortcutBinding {
    pub const ALL: [ShortcutBinding; 4] = [Self::Six, Self::Seven, Self::Eight, Self::Nine];

    pub fn code(self) -> i32 {
        match self {
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
        }
    }

    pub fn label(self) -> String {
        format!("{MODIFIER_LABEL}{}", self.code())
    }
}

impl TryFrom<i32> for ShortcutBinding {
    type Error = ShortcutConflict;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            6 => Ok(Self::Six),
            7 => Ok(Self::Seven),
            8 => Ok(Self::Eight),
            9 => Ok(Self::Nine),
            requested => Err(ShortcutConflict { requested }),
        }
    }
}

impl From<ShortcutBinding> for i32 {
    fn from(binding: ShortcutBinding) -> Self {
        binding.code()
    }
}

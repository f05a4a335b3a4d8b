//! What the control window shows, derived from the model.

use textgrab_types::ShortcutBinding;

pub const CAPTURE_TITLE: &str = "Capture Text...";
pub const EMPTY_RECENTS_LABEL: &str = "No recent captures";
/// Characters of a recent capture shown before the ellipsis
pub const RECENT_LABEL_CHARS: usize = 20;

/// Quoted, single-line preview of a recent capture.
pub fn recent_label(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() > RECENT_LABEL_CHARS {
        let head: String = flat.chars().take(RECENT_LABEL_CHARS).collect();
        format!("\"{head}...\"")
    } else {
        format!("\"{flat}\"")
    }
}

pub fn capture_label(binding: ShortcutBinding) -> String {
    format!("{CAPTURE_TITLE}  {}", binding.label())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutItem {
    pub code: i32,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    pub capture_label: String,
    /// One label per history entry, newest first; the index is the
    /// argument for `copy_recent`
    pub recents: Vec<String>,
    pub vocalize: bool,
    pub shortcuts: Vec<ShortcutItem>,
}

impl MenuModel {
    pub fn build(recents: &[String], vocalize: bool, shortcut: ShortcutBinding) -> Self {
        Self {
            capture_label: capture_label(shortcut),
            recents: recents.iter().map(|r| recent_label(r)).collect(),
            vocalize,
            shortcuts: ShortcutBinding::ALL
                .iter()
                .map(|&binding| ShortcutItem {
                    code: binding.code(),
                    label: binding.label(),
                    selected: binding == shortcut,
                })
                .collect(),
        }
    }

    pub fn has_recents(&self) -> bool {
        !self.recents.is_empty()
    }
}

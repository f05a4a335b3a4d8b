use textgrab_core::MenuModel;
use textgrab_types::ShortcutBinding;

/// What the control window currently reflects (separate from the backend
/// model, which is the source of truth)
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub recents: Vec<String>,
    pub vocalize: bool,
    pub shortcut: ShortcutBinding,
    pub status: String,
    pub capturing: bool,
}

impl UiState {
    pub fn new(shortcut: ShortcutBinding) -> Self {
        Self {
            shortcut,
            status: "Ready".to_string(),
            ..Self::default()
        }
    }

    pub fn menu(&self) -> MenuModel {
        MenuModel::build(&self.recents, self.vocalize, self.shortcut)
    }
}

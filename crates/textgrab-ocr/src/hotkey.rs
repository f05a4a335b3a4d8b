use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use textgrab_types::ShortcutBinding;

#[cfg(target_os = "macos")]
const MODIFIERS: Modifiers = Modifiers::SUPER.union(Modifiers::SHIFT);
#[cfg(not(target_os = "macos"))]
const MODIFIERS: Modifiers = Modifiers::CONTROL.union(Modifiers::SHIFT);

/// `<modifier>+Shift+<digit>` for a binding
pub fn hotkey_for(binding: ShortcutBinding) -> HotKey {
    let code = match binding {
        ShortcutBinding::Six => Code::Digit6,
        ShortcutBinding::Seven => Code::Digit7,
        ShortcutBinding::Eight => Code::Digit8,
        ShortcutBinding::Nine => Code::Digit9,
    };
    HotKey::new(Some(MODIFIERS), code)
}

/// Owns the single registered capture shortcut. Must live on the thread
/// running the platform event loop.
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    binding: ShortcutBinding,
    hotkey: HotKey,
}

impl HotkeyManager {
    pub fn new(binding: ShortcutBinding) -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;
        let hotkey = hotkey_for(binding);

        manager
            .register(hotkey)
            .with_context(|| format!("Failed to register {}", binding.label()))?;
        tracing::info!("Capture shortcut {}", binding.label());

        Ok(Self {
            manager,
            binding,
            hotkey,
        })
    }

    /// Replace the registered combination. The old one is released first;
    /// if the new one is refused the old one is restored.
    pub fn rebind(&mut self, binding: ShortcutBinding) -> Result<()> {
        if binding == self.binding {
            return Ok(());
        }

        let next = hotkey_for(binding);
        self.manager
            .unregister(self.hotkey)
            .with_context(|| format!("Failed to unregister {}", self.binding.label()))?;

        if let Err(e) = self.manager.register(next) {
            if let Err(restore) = self.manager.register(self.hotkey) {
                tracing::error!("Failed to restore {}: {}", self.binding.label(), restore);
            }
            return Err(e).with_context(|| format!("Failed to register {}", binding.label()));
        }

        tracing::info!("Capture shortcut {} -> {}", self.binding.label(), binding.label());
        self.binding = binding;
        self.hotkey = next;
        Ok(())
    }

    /// Drain pending hotkey events (non-blocking). True if ours was pressed.
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        let mut pressed = false;
        while let Ok(event) = receiver.try_recv() {
            if event.id == self.hotkey.id() && event.state == HotKeyState::Pressed {
                tracing::debug!("Hotkey {} pressed", self.binding.label());
                pressed = true;
            }
        }
        pressed
    }
}

/// Platform side of the capture shortcut, as seen by the UI.
pub trait ShortcutRegistrar {
    /// The combination that is live right now
    fn binding(&self) -> ShortcutBinding;

    /// Switch to `binding`; on error the previous combination stays live
    fn rebind(&mut self, binding: ShortcutBinding) -> Result<()>;
}

impl ShortcutRegistrar for HotkeyManager {
    fn binding(&self) -> ShortcutBinding {
        self.binding
    }

    fn rebind(&mut self, binding: ShortcutBinding) -> Result<()> {
        HotkeyManager::rebind(self, binding)
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        if let Err(e) = self.manager.unregister(self.hotkey) {
            tracing::debug!("Failed to unregister {}: {}", self.binding.label(), e);
        }
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use slint::{ModelRc, SharedString, VecModel};
use textgrab_core::{CaptureSurface, MenuModel, SurfaceEvent};
use textgrab_ocr::{HotkeyManager, ShortcutRegistrar};
use textgrab_types::{AppEvent, ShortcutBinding};

use crate::bridge::UiBridge;
use crate::overlay::SlintSurface;
use crate::state::UiState;
use crate::{MenuWindow, ShortcutEntry};

/// Everything the UI thread owns.
pub struct UiContext {
    pub surface: RefCell<CaptureSurface<SlintSurface>>,
    pub menu: MenuWindow,
    pub hotkeys: RefCell<Option<HotkeyManager>>,
    pub state: RefCell<UiState>,
}

/// Message the backend gets for a surface outcome
pub fn surface_event_to_app(event: SurfaceEvent) -> AppEvent {
    match event {
        SurfaceEvent::RegionSelected(rect) => AppEvent::RegionSelected(rect),
        SurfaceEvent::Dismissed => AppEvent::SelectionDismissed,
    }
}

/// Outcome of pushing a model shortcut change down to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutUpdate {
    /// Combination that is live, and the one the menu shows as selected
    pub effective: ShortcutBinding,
    /// Set when the request was refused; the model must select this again
    pub revert_to: Option<ShortcutBinding>,
}

pub fn apply_shortcut_change<R: ShortcutRegistrar>(
    registrar: Option<&mut R>,
    requested: ShortcutBinding,
) -> ShortcutUpdate {
    let Some(registrar) = registrar else {
        return ShortcutUpdate {
            effective: requested,
            revert_to: None,
        };
    };

    match registrar.rebind(requested) {
        Ok(()) => ShortcutUpdate {
            effective: requested,
            revert_to: None,
        },
        Err(e) => {
            tracing::error!("[SLINT] {:#}", e);
            let live = registrar.binding();
            ShortcutUpdate {
                effective: live,
                revert_to: Some(live),
            }
        }
    }
}

pub fn handle_events(event: AppEvent, ctx: &Rc<UiContext>, bridge: &UiBridge) {
    match event {
        AppEvent::OpenSurface => {
            let outcome = ctx.surface.borrow_mut().open();
            match outcome {
                Some(event) => bridge.send(surface_event_to_app(event)),
                None => tracing::debug!("[SLINT] Overlay opened"),
            }
        }
        AppEvent::CloseSurface => {
            ctx.surface.borrow_mut().close();
        }
        AppEvent::RecentsChanged(recents) => {
            tracing::debug!("[SLINT] {} recent captures", recents.len());
            ctx.state.borrow_mut().recents = recents;
            apply_menu(ctx);
        }
        AppEvent::VocalizationChanged(enabled) => {
            ctx.state.borrow_mut().vocalize = enabled;
            apply_menu(ctx);
        }
        AppEvent::ShortcutChanged(binding) => {
            let update = apply_shortcut_change(ctx.hotkeys.borrow_mut().as_mut(), binding);
            if let Some(live) = update.revert_to {
                let status = format!("Shortcut {} unavailable", binding.label());
                ctx.menu.set_status(status.clone().into());
                ctx.state.borrow_mut().status = status;
                bridge.send(AppEvent::SelectShortcut(live.code()));
            }
            ctx.state.borrow_mut().shortcut = update.effective;
            apply_menu(ctx);
        }
        AppEvent::CaptureStatusUpdate { status, capturing } => {
            tracing::debug!("[SLINT] Status: {} (capturing: {})", status, capturing);
            {
                let mut state = ctx.state.borrow_mut();
                state.status = status.clone();
                state.capturing = capturing;
            }
            ctx.menu.set_status(status.into());
            ctx.menu.set_is_capturing(capturing);
        }
        other => {
            tracing::trace!("[SLINT] Ignoring {:?}", other);
        }
    }
}

pub fn apply_menu(ctx: &UiContext) {
    let menu = ctx.state.borrow().menu();
    render_menu(&ctx.menu, &menu);
}

fn render_menu(window: &MenuWindow, menu: &MenuModel) {
    window.set_capture_label(menu.capture_label.clone().into());
    window.set_vocalize(menu.vocalize);

    let recents: Vec<SharedString> = menu
        .recents
        .iter()
        .map(|r| SharedString::from(r.as_str()))
        .collect();
    window.set_recents(ModelRc::new(VecModel::from(recents)));

    let shortcuts: Vec<ShortcutEntry> = menu
        .shortcuts
        .iter()
        .map(|item| ShortcutEntry {
            code: item.code,
            label: item.label.clone().into(),
            selected: item.selected,
        })
        .collect();
    window.set_shortcuts(ModelRc::new(VecModel::from(shortcuts)));
}

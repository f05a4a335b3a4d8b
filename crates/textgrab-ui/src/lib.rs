use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use slint::{ComponentHandle, Timer, TimerMode};
use textgrab_core::CaptureSurface;
use textgrab_ocr::HotkeyManager;
use textgrab_types::{AppEvent, Point, ShortcutBinding, TriggerSource};

slint::include_modules!();

mod bridge;
mod events;
mod overlay;
mod state;

pub use bridge::UiBridge;
pub use events::{
    ShortcutUpdate, UiContext, apply_shortcut_change, handle_events, surface_event_to_app,
};
pub use overlay::SlintSurface;
pub use state::UiState;

/// Runs the slint event loop on the calling thread until the control
/// window is closed or Quit is chosen.
pub fn run_ui(
    bridge: UiBridge,
    shortcut: ShortcutBinding,
    delta_time: Duration,
) -> anyhow::Result<()> {
    let overlay = OverlayWindow::new()?;
    let menu = MenuWindow::new()?;

    // Global hotkeys need the platform event loop of this thread
    let hotkeys = match HotkeyManager::new(shortcut) {
        Ok(hotkeys) => Some(hotkeys),
        Err(e) => {
            tracing::error!("[SLINT] Shortcut unavailable, menu only: {:#}", e);
            None
        }
    };

    let ctx = Rc::new(UiContext {
        surface: RefCell::new(CaptureSurface::new(SlintSurface::new(overlay.clone_strong()))),
        menu: menu.clone_strong(),
        hotkeys: RefCell::new(hotkeys),
        state: RefCell::new(UiState::new(shortcut)),
    });
    events::apply_menu(&ctx);

    wire_overlay(&overlay, &ctx, &bridge);
    wire_menu(&menu, &bridge);

    // Poll hotkeys and drain backend events
    let timer = Timer::default();
    {
        let ctx = ctx.clone();
        let bridge = bridge.clone();
        timer.start(TimerMode::Repeated, delta_time, move || {
            let pressed = ctx
                .hotkeys
                .borrow()
                .as_ref()
                .is_some_and(HotkeyManager::poll);
            if pressed {
                bridge.send(AppEvent::TriggerCapture {
                    source: TriggerSource::Shortcut,
                });
            }

            for event in bridge.drain() {
                handle_events(event, &ctx, &bridge);
            }
        });
    }

    menu.show()?;
    tracing::info!("[SLINT] UI running");
    slint::run_event_loop()?;

    timer.stop();
    ctx.surface.borrow_mut().close();
    bridge.send(AppEvent::Quit);
    tracing::info!("[SLINT] UI stopped");
    Ok(())
}

fn wire_overlay(overlay: &OverlayWindow, ctx: &Rc<UiContext>, bridge: &UiBridge) {
    let point = |x: f32, y: f32| Point::new(f64::from(x), f64::from(y));

    {
        let ctx = ctx.clone();
        overlay.on_pointer_down(move |x, y| ctx.surface.borrow_mut().pointer_down(point(x, y)));
    }
    {
        let ctx = ctx.clone();
        overlay.on_pointer_move(move |x, y| ctx.surface.borrow_mut().pointer_move(point(x, y)));
    }
    {
        let ctx = ctx.clone();
        let bridge = bridge.clone();
        overlay.on_pointer_up(move |x, y| {
            let outcome = ctx.surface.borrow_mut().pointer_up(point(x, y));
            if let Some(event) = outcome {
                bridge.send(surface_event_to_app(event));
            }
        });
    }
    {
        let ctx = ctx.clone();
        let bridge = bridge.clone();
        overlay.on_cancel(move || {
            let outcome = ctx.surface.borrow_mut().cancel();
            if let Some(event) = outcome {
                bridge.send(surface_event_to_app(event));
            }
        });
    }
}

fn wire_menu(menu: &MenuWindow, bridge: &UiBridge) {
    {
        let bridge = bridge.clone();
        menu.on_capture(move || {
            bridge.send(AppEvent::TriggerCapture {
                source: TriggerSource::Menu,
            })
        });
    }
    {
        let bridge = bridge.clone();
        menu.on_copy_recent(move |index| {
            if let Ok(index) = usize::try_from(index) {
                bridge.send(AppEvent::CopyRecent(index));
            }
        });
    }
    {
        let bridge = bridge.clone();
        menu.on_clear_recents(move || bridge.send(AppEvent::ClearRecents));
    }
    {
        let bridge = bridge.clone();
        menu.on_toggle_vocalization(move || bridge.send(AppEvent::ToggleVocalization));
    }
    {
        let bridge = bridge.clone();
        menu.on_select_shortcut(move |code| bridge.send(AppEvent::SelectShortcut(code)));
    }
    menu.on_quit(|| {
        if let Err(e) = slint::quit_event_loop() {
            tracing::warn!("[SLINT] {}", e);
        }
    });
}

/// Stop the UI loop from any thread (e.g. a Ctrl+C handler)
pub fn request_quit() {
    if let Err(e) = slint::quit_event_loop() {
        tracing::warn!("[SLINT] {}", e);
    }
}

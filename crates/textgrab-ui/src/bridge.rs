use kanal::{Receiver, Sender};
use textgrab_types::AppEvent;

/// UI-thread end of the channels to the async backend. Both directions are
/// non-blocking from the UI side.
#[derive(Clone)]
pub struct UiBridge {
    to_ui_rx: Receiver<AppEvent>,
    from_ui_tx: Sender<AppEvent>,
}

impl UiBridge {
    pub fn new(to_ui_rx: Receiver<AppEvent>, from_ui_tx: Sender<AppEvent>) -> Self {
        Self {
            to_ui_rx,
            from_ui_tx,
        }
    }

    pub fn send(&self, event: AppEvent) {
        tracing::debug!("[SLINT] -> backend {:?}", event);
        match self.from_ui_tx.try_send(event) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("[SLINT] Backend queue full, event dropped"),
            Err(e) => tracing::warn!("[SLINT] Backend gone: {}", e),
        }
    }

    /// Everything the backend queued since the last call
    pub fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        loop {
            match self.to_ui_rx.try_recv() {
                Ok(Some(event)) => events.push(event),
                Ok(None) => break,
                Err(e) => {
                    if events.is_empty() {
                        tracing::trace!("[SLINT] Backend channel closed: {}", e);
                    }
                    break;
                }
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textgrab_types::TriggerSource;

    #[test]
    fn test_drain_returns_events_in_order() {
        let (to_ui_tx, to_ui_rx) = kanal::unbounded();
        let (from_ui_tx, _from_ui_rx) = kanal::unbounded();
        let bridge = UiBridge::new(to_ui_rx, from_ui_tx);

        to_ui_tx.send(AppEvent::OpenSurface).unwrap();
        to_ui_tx.send(AppEvent::CloseSurface).unwrap();

        assert_eq!(
            bridge.drain(),
            vec![AppEvent::OpenSurface, AppEvent::CloseSurface]
        );
        assert!(bridge.drain().is_empty());
    }

    #[test]
    fn test_send_reaches_backend() {
        let (_to_ui_tx, to_ui_rx) = kanal::unbounded();
        let (from_ui_tx, from_ui_rx) = kanal::unbounded();
        let bridge = UiBridge::new(to_ui_rx, from_ui_tx);

        bridge.send(AppEvent::TriggerCapture {
            source: TriggerSource::Menu,
        });
        assert_eq!(
            from_ui_rx.try_recv().unwrap(),
            Some(AppEvent::TriggerCapture {
                source: TriggerSource::Menu
            })
        );
    }

    #[test]
    fn test_send_after_backend_exit_does_not_panic() {
        let (_to_ui_tx, to_ui_rx) = kanal::unbounded();
        let (from_ui_tx, from_ui_rx) = kanal::unbounded::<AppEvent>();
        drop(from_ui_rx);
        let bridge = UiBridge::new(to_ui_rx, from_ui_tx);
        bridge.send(AppEvent::Quit);
    }
}

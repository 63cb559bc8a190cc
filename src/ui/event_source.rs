use std::{sync::mpsc::Receiver, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput, RelayEvent},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Default)]
pub struct CrosstermEventSource;

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            if key.code == KeyCode::Esc || (key.code == KeyCode::Char('c') && ctrl) {
                return Ok(Some(AppEvent::QuitRequested));
            }

            let named = match key.code {
                KeyCode::Enter => Some("enter"),
                KeyCode::Backspace => Some("backspace"),
                KeyCode::Delete => Some("delete"),
                KeyCode::Left => Some("left"),
                KeyCode::Right => Some("right"),
                KeyCode::Home => Some("home"),
                KeyCode::End => Some("end"),
                _ => None,
            };

            if let Some(name) = named {
                return Ok(Some(AppEvent::InputKey(KeyInput::new(name, ctrl))));
            }

            if let KeyCode::Char(ch) = key.code {
                return Ok(Some(AppEvent::InputKey(KeyInput::new(
                    ch.to_string(),
                    ctrl,
                ))));
            }
        }

        Ok(None)
    }
}

/// Event source fed by the relay socket worker's channel.
pub struct ChannelRelayEventSource {
    events_rx: Receiver<RelayEvent>,
}

impl ChannelRelayEventSource {
    pub fn new(events_rx: Receiver<RelayEvent>) -> Self {
        Self { events_rx }
    }
}

impl AppEventSource for ChannelRelayEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        // A disconnected channel means the worker exited; it already
        // reported a terminal event before doing so.
        Ok(self.events_rx.try_recv().ok().map(AppEvent::Relay))
    }
}

/// Merges relay events with keyboard input for the shell loop.
///
/// Relay events are drained first so inbound messages are appended in
/// transport-delivery order before any new keystroke is handled.
pub struct ShellEventSource {
    keyboard: CrosstermEventSource,
    relay: ChannelRelayEventSource,
}

impl ShellEventSource {
    pub fn new(keyboard: CrosstermEventSource, relay: ChannelRelayEventSource) -> Self {
        Self { keyboard, relay }
    }
}

impl AppEventSource for ShellEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.relay.next_event()? {
            return Ok(Some(event));
        }

        self.keyboard.next_event()
    }
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn channel_source_forwards_relay_events() {
        let (events_tx, events_rx) = mpsc::channel();
        let mut source = ChannelRelayEventSource::new(events_rx);

        events_tx
            .send(RelayEvent::Opened)
            .expect("send must succeed");

        assert_eq!(
            source.next_event().expect("must read channel event"),
            Some(AppEvent::Relay(RelayEvent::Opened))
        );
        assert_eq!(source.next_event().expect("must read empty channel"), None);
    }

    #[test]
    fn channel_source_is_quiet_after_worker_exit() {
        let (events_tx, events_rx) = mpsc::channel();
        let mut source = ChannelRelayEventSource::new(events_rx);
        drop(events_tx);

        assert_eq!(source.next_event().expect("must tolerate hangup"), None);
    }
}

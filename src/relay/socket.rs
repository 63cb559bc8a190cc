use std::{
    sync::mpsc::Sender,
    thread::{self, JoinHandle},
};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{self as async_mpsc, UnboundedReceiver};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    domain::events::RelayEvent,
    usecases::send_message::{FrameTransmitter, TransmitSourceError},
};

const RELAY_RUNTIME_START_FAILED: &str = "RELAY_RUNTIME_START_FAILED";
const RELAY_CONNECT_FAILED: &str = "RELAY_CONNECT_FAILED";
const RELAY_STREAM_FAILED: &str = "RELAY_STREAM_FAILED";
const RELAY_SEND_FAILED: &str = "RELAY_SEND_FAILED";
const RELAY_CHANNEL_CLOSED: &str = "RELAY_CHANNEL_CLOSED";
const RELAY_SOCKET_SHUTDOWN_FAILED: &str = "RELAY_SOCKET_SHUTDOWN_FAILED";

/// Owner of the single relay channel for a shell instance.
///
/// The socket itself lives on a dedicated worker thread; this handle feeds
/// it outbound frames and receives transport events through channels. The
/// channel is opened at most once: `Errored` is terminal and no reconnection
/// is attempted, so a finished worker is never restarted.
#[derive(Debug)]
pub struct RelayConnection {
    endpoint: String,
    outbound_tx: Option<async_mpsc::UnboundedSender<String>>,
    stop_tx: Option<async_mpsc::UnboundedSender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl RelayConnection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            outbound_tx: None,
            stop_tx: None,
            worker: None,
        }
    }

    /// Establishes the channel, delivering transport events to `events_tx`.
    ///
    /// Calling `open` while a channel was already started is a no-op, so
    /// duplicate calls cannot create a second connection.
    ///
    /// # Errors
    /// Returns `RelaySocketStartError` if the worker thread cannot spawn.
    pub fn open(&mut self, events_tx: Sender<RelayEvent>) -> Result<(), RelaySocketStartError> {
        if self.worker.is_some() {
            tracing::debug!("relay channel already started; ignoring duplicate open");
            return Ok(());
        }

        let (outbound_tx, outbound_rx) = async_mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = async_mpsc::unbounded_channel();
        let endpoint = self.endpoint.clone();

        let worker = thread::Builder::new()
            .name("rmc-relay-socket".to_owned())
            .spawn(move || run_socket(endpoint, events_tx, outbound_rx, stop_rx))
            .map_err(RelaySocketStartError::WorkerSpawn)?;

        self.outbound_tx = Some(outbound_tx);
        self.stop_tx = Some(stop_tx);
        self.worker = Some(worker);
        Ok(())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_started(&self) -> bool {
        self.worker.is_some()
    }
}

impl FrameTransmitter for RelayConnection {
    fn transmit(&self, frame: &str) -> Result<(), TransmitSourceError> {
        let Some(outbound_tx) = self.outbound_tx.as_ref() else {
            return Err(TransmitSourceError::ChannelUnavailable);
        };

        outbound_tx
            .send(frame.to_owned())
            .map_err(|_| TransmitSourceError::ChannelUnavailable)
    }
}

impl Drop for RelayConnection {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(worker) = self.worker.take() {
            if let Err(error) = worker.join() {
                tracing::warn!(
                    code = RELAY_SOCKET_SHUTDOWN_FAILED,
                    error = ?error,
                    "relay socket worker panicked on shutdown"
                );
            }
        }
    }
}

fn run_socket(
    endpoint: String,
    events_tx: Sender<RelayEvent>,
    outbound_rx: UnboundedReceiver<String>,
    stop_rx: UnboundedReceiver<()>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(
                code = RELAY_RUNTIME_START_FAILED,
                error = %error,
                "failed to start relay socket runtime"
            );
            let _ = events_tx.send(RelayEvent::Errored {
                code: RELAY_RUNTIME_START_FAILED.to_owned(),
            });
            return;
        }
    };

    runtime.block_on(drive_channel(endpoint, events_tx, outbound_rx, stop_rx));
}

async fn drive_channel(
    endpoint: String,
    events_tx: Sender<RelayEvent>,
    mut outbound_rx: UnboundedReceiver<String>,
    mut stop_rx: UnboundedReceiver<()>,
) {
    let (stream, _response) = match connect_async(endpoint.as_str()).await {
        Ok(connected) => connected,
        Err(error) => {
            tracing::error!(code = RELAY_CONNECT_FAILED, error = %error, "relay connect failed");
            let _ = events_tx.send(RelayEvent::Errored {
                code: RELAY_CONNECT_FAILED.to_owned(),
            });
            return;
        }
    };

    let _ = events_tx.send(RelayEvent::Opened);
    let (mut sink, mut inbound) = stream.split();

    loop {
        tokio::select! {
            _ = stop_rx.recv() => {
                let _ = sink.send(Message::Close(None)).await;
                return;
            }
            frame = outbound_rx.recv() => {
                let Some(frame) = frame else { return };
                if let Err(error) = sink.send(Message::Text(frame.into())).await {
                    tracing::error!(code = RELAY_SEND_FAILED, error = %error, "relay send failed");
                    let _ = events_tx.send(RelayEvent::Errored {
                        code: RELAY_SEND_FAILED.to_owned(),
                    });
                    return;
                }
            }
            received = inbound.next() => match received {
                Some(Ok(Message::Text(frame))) => {
                    let _ = events_tx.send(RelayEvent::Frame(frame.as_str().to_owned()));
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::warn!(code = RELAY_CHANNEL_CLOSED, "relay closed the channel");
                    let _ = events_tx.send(RelayEvent::Errored {
                        code: RELAY_CHANNEL_CLOSED.to_owned(),
                    });
                    return;
                }
                // Binary, ping and pong frames carry no chat payload.
                Some(Ok(_)) => {}
                Some(Err(error)) => {
                    tracing::error!(code = RELAY_STREAM_FAILED, error = %error, "relay stream failed");
                    let _ = events_tx.send(RelayEvent::Errored {
                        code: RELAY_STREAM_FAILED.to_owned(),
                    });
                    return;
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum RelaySocketStartError {
    WorkerSpawn(std::io::Error),
}

impl std::fmt::Display for RelaySocketStartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkerSpawn(source) => write!(f, "worker spawn failed: {source}"),
        }
    }
}

impl std::error::Error for RelaySocketStartError {}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, time::Duration};

    use super::*;

    const EVENT_WAIT: Duration = Duration::from_secs(10);

    // Nothing listens on this port; connect fails fast without leaving the host.
    const UNREACHABLE_ENDPOINT: &str = "ws://127.0.0.1:9/socket";

    #[test]
    fn transmit_without_open_reports_channel_unavailable() {
        let connection = RelayConnection::new(UNREACHABLE_ENDPOINT);

        assert_eq!(
            connection.transmit("{}"),
            Err(TransmitSourceError::ChannelUnavailable)
        );
    }

    #[test]
    fn unreachable_endpoint_surfaces_errored_event() {
        let (events_tx, events_rx) = mpsc::channel();
        let mut connection = RelayConnection::new(UNREACHABLE_ENDPOINT);

        connection.open(events_tx).expect("worker must spawn");

        let event = events_rx
            .recv_timeout(EVENT_WAIT)
            .expect("worker must report a transport event");
        assert_eq!(
            event,
            RelayEvent::Errored {
                code: RELAY_CONNECT_FAILED.to_owned(),
            }
        );
    }

    #[test]
    fn duplicate_open_is_a_no_op() {
        let (events_tx, events_rx) = mpsc::channel();
        let mut connection = RelayConnection::new(UNREACHABLE_ENDPOINT);

        connection.open(events_tx.clone()).expect("first open must spawn");
        connection.open(events_tx).expect("second open must be a no-op");

        assert!(connection.is_started());

        // Only the first worker reports; a duplicate would produce a second event.
        let _ = events_rx
            .recv_timeout(EVENT_WAIT)
            .expect("worker must report a transport event");
        assert!(events_rx.recv_timeout(Duration::from_millis(500)).is_err());
    }

    #[test]
    fn drop_joins_the_worker() {
        let (events_tx, _events_rx) = mpsc::channel();
        let mut connection = RelayConnection::new(UNREACHABLE_ENDPOINT);
        connection.open(events_tx).expect("worker must spawn");

        drop(connection);
    }
}

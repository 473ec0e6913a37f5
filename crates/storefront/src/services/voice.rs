//! Voice search relay.
//!
//! Bridges a browser WebSocket to the upstream speech-transcription
//! socket. Client audio is re-chunked on a fixed ~3-second cadence
//! before being forwarded; upstream text fragments are appended to a
//! running transcript that is pushed back to the client after every
//! fragment. There is no reconnect protocol: either side closing tears
//! the relay down.

use std::time::Duration;

use axum::extract::ws::{Message as ClientMessage, WebSocket};
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as UpstreamMessage;

/// Forwarding cadence for buffered audio.
const CHUNK_INTERVAL: Duration = Duration::from_secs(3);

/// Errors from the voice relay.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// The upstream transcription socket failed.
    #[error("transcription service error: {0}")]
    Upstream(#[from] tokio_tungstenite::tungstenite::Error),

    /// The client socket failed.
    #[error("client socket error: {0}")]
    Client(#[from] axum::Error),
}

/// Accumulates raw audio between cadence ticks.
#[derive(Debug, Default)]
struct AudioChunker {
    buffer: Vec<u8>,
}

impl AudioChunker {
    fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Take the buffered audio, leaving the chunker empty. Returns
    /// `None` when nothing arrived since the last tick.
    fn take(&mut self) -> Option<Vec<u8>> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// The running transcript, built by appending upstream fragments.
#[derive(Debug, Default)]
struct TranscriptBuffer {
    text: String,
}

impl TranscriptBuffer {
    fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_owned();
        }
    }

    fn as_str(&self) -> &str {
        &self.text
    }
}

/// Run the relay until either socket closes.
///
/// # Errors
///
/// Returns `VoiceError` if the upstream connection cannot be
/// established or either socket errors mid-stream.
pub async fn relay(client: WebSocket, asr_url: &str) -> Result<(), VoiceError> {
    let (upstream, _) = connect_async(asr_url).await?;
    tracing::debug!("connected to transcription upstream");

    let (mut upstream_tx, mut upstream_rx) = upstream.split();
    let (mut client_tx, mut client_rx) = client.split();

    let mut chunker = AudioChunker::default();
    let mut transcript = TranscriptBuffer::default();

    let mut cadence = tokio::time::interval(CHUNK_INTERVAL);
    cadence.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            message = client_rx.next() => match message {
                Some(Ok(ClientMessage::Binary(data))) => chunker.push(&data),
                Some(Ok(ClientMessage::Close(_))) | None => break,
                Some(Ok(_)) => {} // ignore client text/ping traffic
                Some(Err(e)) => return Err(e.into()),
            },
            _ = cadence.tick() => {
                if let Some(chunk) = chunker.take() {
                    upstream_tx.send(UpstreamMessage::Binary(chunk.into())).await?;
                }
            }
            message = upstream_rx.next() => match message {
                Some(Ok(UpstreamMessage::Text(fragment))) => {
                    transcript.append(fragment.as_str());
                    client_tx
                        .send(ClientMessage::Text(transcript.as_str().to_owned().into()))
                        .await?;
                }
                Some(Ok(UpstreamMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    // Forward whatever audio is still buffered so the tail of the
    // utterance is not dropped.
    if let Some(chunk) = chunker.take() {
        let _ = upstream_tx.send(UpstreamMessage::Binary(chunk.into())).await;
    }
    let _ = client_tx.close().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunker_batches_between_ticks() {
        let mut chunker = AudioChunker::default();
        assert!(chunker.take().is_none());

        chunker.push(&[1, 2]);
        chunker.push(&[3]);
        assert_eq!(chunker.take(), Some(vec![1, 2, 3]));

        // Empty again after a take
        assert!(chunker.take().is_none());
    }

    #[test]
    fn test_transcript_appends_and_trims() {
        let mut transcript = TranscriptBuffer::default();
        transcript.append("hello ");
        assert_eq!(transcript.as_str(), "hello");
        transcript.append(" milk and bread ");
        assert_eq!(transcript.as_str(), "hello milk and bread");
    }
}

//! Scripted test doubles for the protocol core.
//!
//! `ScriptedConnection` plays the device side of the link: each write pops
//! the next scripted outcome and emits its replies on the event stream, and
//! every write is recorded for order assertions.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

use crate::core::{
    AckRecord, Connection, EncodeError, LinkError, LinkEvent, Packet, PacketEncoder,
    ProtocolVersion,
};

/// Scripted outcome for one `write` call.
#[derive(Debug, Clone)]
pub(crate) enum WriteScript {
    /// Write succeeds and these events follow immediately.
    Reply(Vec<LinkEvent>),
    /// Write succeeds and the device stays silent.
    Silent,
    /// Write fails with this error.
    Fail(LinkError),
}

/// Connection double driven by a per-write script.
///
/// Unscripted writes default to [`WriteScript::Silent`], so an exhausted
/// script models a device that stops answering.
pub(crate) struct ScriptedConnection {
    connected: AtomicBool,
    events: broadcast::Sender<LinkEvent>,
    script: Mutex<VecDeque<WriteScript>>,
    written: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedConnection {
    pub(crate) fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            connected: AtomicBool::new(true),
            events,
            script: Mutex::new(VecDeque::new()),
            written: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub(crate) fn push(&self, script: WriteScript) {
        self.script.lock().unwrap().push_back(script);
    }

    /// Next write is answered with the baseline ACK code.
    pub(crate) fn push_ack(&self) {
        let codes = ProtocolVersion::V1.command_codes();
        self.push(WriteScript::Reply(vec![LinkEvent::Ack(AckRecord::new(
            codes.ack,
        ))]));
    }

    /// Next write is answered with the baseline NACK code.
    pub(crate) fn push_nack(&self) {
        let codes = ProtocolVersion::V1.command_codes();
        self.push(WriteScript::Reply(vec![LinkEvent::Ack(AckRecord::new(
            codes.nack,
        ))]));
    }

    /// Next write goes unanswered.
    pub(crate) fn push_silent(&self) {
        self.push(WriteScript::Silent);
    }

    /// Next write is followed by these events, in order.
    pub(crate) fn push_replies(&self, events: Vec<LinkEvent>) {
        self.push(WriteScript::Reply(events));
    }

    /// Next write fails with `err`.
    pub(crate) fn push_fail(&self, err: LinkError) {
        self.push(WriteScript::Fail(err));
    }

    /// Emit an event outside any write (e.g. after a timeout has fired).
    pub(crate) fn emit(&self, event: LinkEvent) {
        // No subscriber is not an error here: a settled attempt has already
        // dropped its receiver.
        let _ = self.events.send(event);
    }

    /// Every payload written so far, in order.
    pub(crate) fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().unwrap().clone()
    }

    pub(crate) fn write_count(&self) -> usize {
        self.written.lock().unwrap().len()
    }
}

impl Connection for ScriptedConnection {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn write(&self, data: &[u8]) -> Result<(), LinkError> {
        self.written.lock().unwrap().push(data.to_vec());

        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(WriteScript::Silent);

        match next {
            WriteScript::Fail(err) => Err(err),
            WriteScript::Silent => Ok(()),
            WriteScript::Reply(events) => {
                for event in events {
                    let _ = self.events.send(event);
                }
                Ok(())
            }
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<LinkEvent> {
        self.events.subscribe()
    }
}

/// Encoder double that splits the payload into fixed-size chunks.
pub(crate) struct ChunkEncoder {
    chunk_size: usize,
}

impl ChunkEncoder {
    pub(crate) fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }
}

impl PacketEncoder for ChunkEncoder {
    fn encode(
        &self,
        payload: &[u8],
        _command: u8,
        _version: ProtocolVersion,
    ) -> Result<Vec<Packet>, EncodeError> {
        if payload.is_empty() {
            return Err(EncodeError::InvalidPayload("empty payload".into()));
        }
        Ok(payload
            .chunks(self.chunk_size)
            .map(|chunk| Packet::new(chunk.to_vec()))
            .collect())
    }
}

//! Remote controller link.
//!
//! The hand-held controller sends short ASCII packets: a packet containing
//! `b` is a trigger pull, one containing `c` ends the session. Everything
//! else is rejected.

use std::io::Read;
use std::sync::mpsc::Sender;

use vrdefense_core::commands::ControlSignal;

use crate::state::GameLoopCommand;

const FIRE_BYTE: u8 = b'b';
const END_SESSION_BYTE: u8 = b'c';

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("empty packet")]
    Empty,

    #[error("unrecognized packet {0:?}")]
    Unrecognized(Vec<u8>),

    #[error("link read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode one packet. Fire wins if a packet carries both signals.
pub fn decode(packet: &[u8]) -> Result<ControlSignal, LinkError> {
    if packet.is_empty() {
        return Err(LinkError::Empty);
    }
    if packet.contains(&FIRE_BYTE) {
        Ok(ControlSignal::Fire)
    } else if packet.contains(&END_SESSION_BYTE) {
        Ok(ControlSignal::EndSession)
    } else {
        Err(LinkError::Unrecognized(packet.to_vec()))
    }
}

/// Read packets from `reader` and forward decoded signals to the game loop.
///
/// Returns once the reader hits end of stream, the loop hangs up, or an
/// end-session signal has been forwarded. Bad packets are logged and
/// skipped.
pub fn pump<R: Read>(mut reader: R, commands: &Sender<GameLoopCommand>) -> Result<(), LinkError> {
    let mut buf = [0u8; 64];
    loop {
        let read = match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        let signal = match decode(&buf[..read]) {
            Ok(signal) => signal,
            Err(err) => {
                log::warn!("link: {err}");
                continue;
            }
        };
        log::debug!("link: {signal:?}");
        if commands.send(GameLoopCommand::Signal(signal)).is_err() {
            return Ok(());
        }
        if signal == ControlSignal::EndSession {
            return Ok(());
        }
    }
}

//! Non-blocking character sources for the CLI.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::mpsc;

/// A character source the CLI polls once per tick. `ready` must never
/// block; `getchar` returns the next available character after `ready`
/// reported true.
pub trait Reader {
    fn ready(&mut self) -> bool;
    fn getchar(&mut self) -> u8;
}

/// Reader pumping stdin through a background thread, so the single-threaded
/// tick never blocks on the terminal. The pump thread is the only auxiliary
/// thread in the crate; it exits when stdin closes.
pub struct StdinReader {
    rx: mpsc::Receiver<u8>,
    pending: Option<u8>,
}

impl StdinReader {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for byte in stdin.lock().bytes() {
                let Ok(byte) = byte else { break };
                if tx.send(byte).is_err() {
                    break;
                }
            }
        });
        Self { rx, pending: None }
    }
}

impl Reader for StdinReader {
    fn ready(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.rx.try_recv().ok();
        }
        self.pending.is_some()
    }

    fn getchar(&mut self) -> u8 {
        self.pending.take().unwrap_or(0)
    }
}

/// Reader fed from a string script, for tests.
#[derive(Default)]
pub struct TestReader {
    queue: VecDeque<u8>,
}

impl TestReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk of input as if the user had typed it.
    pub fn feed(&mut self, input: &str) {
        self.queue.extend(input.bytes());
    }
}

impl Reader for TestReader {
    fn ready(&mut self) -> bool {
        !self.queue.is_empty()
    }

    fn getchar(&mut self) -> u8 {
        self.queue.pop_front().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_yields_fed_bytes_in_order() {
        let mut reader = TestReader::new();
        assert!(!reader.ready());
        reader.feed("ab");
        assert!(reader.ready());
        assert_eq!(reader.getchar(), b'a');
        assert_eq!(reader.getchar(), b'b');
        assert!(!reader.ready());
    }
}

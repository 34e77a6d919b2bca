// NoiseNode — TCP Transport Client
//
// Persistent connection to the collection server. A background thread owns
// the connect/reconnect cycle with exponential backoff; senders only ever
// touch the shared stream under a short bounded mutex wait and skip the send
// when they cannot get it. Each record is framed as a u32 little-endian
// length prefix followed by the payload; the server tells record types apart
// by their fixed payload sizes.

use std::io::Write;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::thread;
use std::time::Duration;

use crate::config::*;
use crate::net::Transport;

pub struct TcpTransport {
    stream: Mutex<Option<TcpStream>>,
    connected: AtomicBool,
    addr: String,
}

impl TcpTransport {
    /// Create the transport and spawn its reconnect thread. The returned
    /// handle is immediately usable; sends simply fail until the first
    /// connection is up.
    pub fn start(addr: &str) -> anyhow::Result<Arc<Self>> {
        let transport = Arc::new(Self {
            stream: Mutex::new(None),
            connected: AtomicBool::new(false),
            addr: addr.to_owned(),
        });

        let worker = Arc::clone(&transport);
        thread::Builder::new()
            .name("net".into())
            .stack_size(STACK_NET)
            .spawn(move || worker.run())?;

        Ok(transport)
    }

    /// Reconnect loop: dial whenever the connection is down, backing off
    /// exponentially between failed attempts.
    fn run(&self) {
        let mut backoff = Duration::from_millis(RECONNECT_BACKOFF_MIN_MS);

        loop {
            if !self.connected.load(Ordering::Acquire) {
                match TcpStream::connect(&self.addr) {
                    Ok(stream) => {
                        let _ = stream.set_nodelay(true);
                        *self.stream.lock().unwrap() = Some(stream);
                        self.connected.store(true, Ordering::Release);
                        backoff = Duration::from_millis(RECONNECT_BACKOFF_MIN_MS);
                        log::info!("transport connected to {}", self.addr);
                    }
                    Err(e) => {
                        log::warn!("connect to {} failed: {} — retrying in {:?}", self.addr, e, backoff);
                        thread::sleep(backoff);
                        backoff = (backoff * 2).min(Duration::from_millis(RECONNECT_BACKOFF_MAX_MS));
                        continue;
                    }
                }
            }
            thread::sleep(Duration::from_millis(500));
        }
    }

    /// Acquire the send mutex with a short bounded wait instead of blocking:
    /// a sender that loses the race skips its record rather than stalling.
    fn lock_stream(&self) -> Option<MutexGuard<'_, Option<TcpStream>>> {
        for _ in 0..SEND_LOCK_WAIT_MS {
            match self.stream.try_lock() {
                Ok(guard) => return Some(guard),
                Err(TryLockError::WouldBlock) => thread::sleep(Duration::from_millis(1)),
                Err(TryLockError::Poisoned(e)) => return Some(e.into_inner()),
            }
        }
        None
    }
}

impl Transport for TcpTransport {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn send_binary(&self, payload: &[u8]) -> bool {
        if !self.is_connected() {
            return false;
        }

        let Some(mut guard) = self.lock_stream() else {
            log::debug!("send path busy — record skipped");
            return false;
        };
        let Some(stream) = guard.as_mut() else {
            return false;
        };

        let frame_len = (payload.len() as u32).to_le_bytes();
        let result = stream.write_all(&frame_len).and_then(|_| stream.write_all(payload));

        if let Err(e) = result {
            log::warn!("send failed: {} — connection marked down", e);
            *guard = None;
            self.connected.store(false, Ordering::Release);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::time::Instant;

    fn wait_connected(transport: &TcpTransport, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if transport.is_connected() {
                return true;
            }
            thread::sleep(Duration::from_millis(10));
        }
        false
    }

    #[test]
    fn frames_payloads_with_a_length_prefix() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let transport = TcpTransport::start(&addr).unwrap();
        let (mut peer, _) = listener.accept().unwrap();
        assert!(wait_connected(&transport, Duration::from_secs(2)));

        assert!(transport.send_binary(b"hello"));

        let mut frame = [0u8; 9];
        peer.read_exact(&mut frame).unwrap();
        assert_eq!(&frame[..4], &5u32.to_le_bytes());
        assert_eq!(&frame[4..], b"hello");
    }

    #[test]
    fn send_fails_while_disconnected() {
        // Nothing listens on the reserved port; connect attempts keep failing.
        let transport = TcpTransport::start("127.0.0.1:1").unwrap();
        assert!(!transport.is_connected());
        assert!(!transport.send_binary(b"dropped"));
    }

    #[test]
    fn write_error_marks_the_connection_down() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let transport = TcpTransport::start(&addr).unwrap();
        let (peer, _) = listener.accept().unwrap();
        assert!(wait_connected(&transport, Duration::from_secs(2)));

        drop(peer);
        drop(listener);

        // The peer is gone; within a few writes the failure surfaces and the
        // transport reports itself down instead of erroring forever.
        let deadline = Instant::now() + Duration::from_secs(2);
        while transport.is_connected() && Instant::now() < deadline {
            transport.send_binary(&[0u8; 1024]);
            thread::sleep(Duration::from_millis(10));
        }
        assert!(!transport.is_connected());
    }
}

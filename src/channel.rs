//! Outbound host-channel abstraction.
//!
//! The [`HostChannel`] trait decouples the notifier and prompt engine from
//! the physical transport (a serial line in the firmware, stdout in the
//! simulator, a capture buffer in tests). Writes are synchronous and
//! best-effort: the protocol layer treats the channel as unable to fail,
//! so the trait returns nothing and implementations absorb I/O errors.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Synchronous, best-effort writer for the outbound line protocol.
///
/// A logical protocol line is produced as one or more fragments followed
/// by a single [`end_line`](HostChannel::end_line) call. Implementations
/// must not buffer across lines.
pub trait HostChannel {
    /// Append a fragment to the line under construction.
    fn write_fragment(&mut self, fragment: &str);

    /// Append a single character to the line under construction.
    fn write_char(&mut self, c: char) {
        self.write_fragment(c.encode_utf8(&mut [0u8; 4]));
    }

    /// Terminate the current line.
    fn end_line(&mut self);
}

/// Production channel writing newline-terminated lines to any [`Write`].
///
/// I/O errors are swallowed: the host link is fire-and-forget and a lost
/// line must never destabilise the surrounding control loop.
pub struct SerialChannel<W: Write> {
    out: W,
}

impl<W: Write> SerialChannel<W> {
    /// Wrap a writer as a host channel.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> HostChannel for SerialChannel<W> {
    fn write_fragment(&mut self, fragment: &str) {
        let _ = self.out.write_all(fragment.as_bytes());
    }

    fn end_line(&mut self) {
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
    }
}

/// Capture channel accumulating protocol output in memory.
///
/// Clones share the same buffer, so a test can hand one clone to the
/// engine and keep another to read back the emitted lines.
#[derive(Debug, Clone, Default)]
pub struct BufferChannel {
    inner: Arc<Mutex<String>>,
}

impl BufferChannel {
    /// Create an empty capture channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All complete lines emitted so far, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.inner.lock().map_or_else(
            |_| Vec::new(),
            |buf| buf.lines().map(ToOwned::to_owned).collect(),
        )
    }

    /// Drain the buffer, returning everything emitted so far.
    #[must_use]
    pub fn take(&self) -> String {
        self.inner
            .lock()
            .map_or_else(|_| String::new(), |mut buf| std::mem::take(&mut *buf))
    }
}

impl HostChannel for BufferChannel {
    fn write_fragment(&mut self, fragment: &str) {
        if let Ok(mut buf) = self.inner.lock() {
            buf.push_str(fragment);
        }
    }

    fn end_line(&mut self) {
        if let Ok(mut buf) = self.inner.lock() {
            buf.push('\n');
        }
    }
}

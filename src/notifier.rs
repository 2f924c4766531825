//! Action notifier — fire-and-forget host notifications.
//!
//! Emits single-line `//action:` messages identifying named lifecycle
//! events (kill, pause, paused, resume, resumed, cancel) and free-text
//! notifications. Stateless: every call is one synchronous write to the
//! host channel, no buffering and no observable failure.

use tracing::trace;

use crate::channel::HostChannel;
use crate::config::ActionNames;

/// Marker prefixing every outbound action line.
pub const ACTION_PREFIX: &str = "//action:";

/// Formats and emits `//action:` lines over a [`HostChannel`].
///
/// The named single-shot events are each present only if configured with
/// a wire name; a disabled event is a silent no-op so call sites need no
/// gating of their own.
pub struct ActionNotifier {
    channel: Box<dyn HostChannel>,
    actions: ActionNames,
}

impl ActionNotifier {
    /// Build a notifier over the given channel with the configured event names.
    #[must_use]
    pub fn new(channel: Box<dyn HostChannel>, actions: ActionNames) -> Self {
        Self { channel, actions }
    }

    /// Emit `//action:<fragment>`, terminating the line when `eol` is set.
    ///
    /// Callers that pass `eol = false` continue the same logical line with
    /// [`append`](Self::append) and finish it with [`end_line`](Self::end_line).
    pub fn action(&mut self, fragment: &str, eol: bool) {
        trace!(fragment, eol, "host action");
        self.channel.write_fragment(ACTION_PREFIX);
        self.channel.write_fragment(fragment);
        if eol {
            self.channel.end_line();
        }
    }

    /// Append a fragment to a line opened with `action(.., false)`.
    pub fn append(&mut self, fragment: &str) {
        self.channel.write_fragment(fragment);
    }

    /// Append a single character to the line under construction.
    pub fn append_char(&mut self, c: char) {
        self.channel.write_char(c);
    }

    /// Terminate the line under construction.
    pub fn end_line(&mut self) {
        self.channel.end_line();
    }

    /// Write a raw (unprefixed) single line, e.g. a diagnostic echo.
    pub fn raw_line(&mut self, line: &str) {
        self.channel.write_fragment(line);
        self.channel.end_line();
    }

    /// Emit a free-text notification: `//action:notification <text>`.
    pub fn notify(&mut self, text: &str) {
        self.action("notification ", false);
        self.append(text);
        self.end_line();
    }

    /// Announce a firmware kill, if the event is configured.
    pub fn kill(&mut self) {
        self.named(|a| a.kill.clone());
    }

    /// Ask the host to pause, if the event is configured.
    pub fn pause(&mut self) {
        self.named(|a| a.pause.clone());
    }

    /// Report that the printer paused, if the event is configured.
    pub fn paused(&mut self) {
        self.named(|a| a.paused.clone());
    }

    /// Ask the host to resume, if the event is configured.
    pub fn resume(&mut self) {
        self.named(|a| a.resume.clone());
    }

    /// Report that the printer resumed, if the event is configured.
    pub fn resumed(&mut self) {
        self.named(|a| a.resumed.clone());
    }

    /// Ask the host to cancel the job, if the event is configured.
    pub fn cancel(&mut self) {
        self.named(|a| a.cancel.clone());
    }

    fn named(&mut self, pick: impl Fn(&ActionNames) -> Option<String>) {
        if let Some(name) = pick(&self.actions) {
            self.action(&name, true);
        }
    }
}

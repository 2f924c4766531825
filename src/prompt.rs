//! Interactive host-prompt engine and response dispatcher.
//!
//! Owns the single pending-prompt state and emits the four-step prompt
//! protocol (`prompt_begin`, `prompt_button`, `prompt_show`, `prompt_end`)
//! over the action notifier. At most one prompt is ever outstanding:
//! opening a new prompt while one is pending implicitly ends the old one,
//! and resolving a host response clears the pending reason before any
//! side effect runs, so a stale or duplicate response can never act twice.

use tracing::{debug, warn};

use crate::config::HostConfig;
use crate::hooks::{PauseMenuResponse, PrinterHooks, RESUME_COMMAND};
use crate::notifier::ActionNotifier;

/// Why a prompt was opened — and therefore how its response code is
/// interpreted once the host reports it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptReason {
    /// No prompt is awaiting a response.
    #[default]
    None,
    /// Filament ran out; the host offers purge / continue choices.
    FilamentRunout,
    /// The motion loop is blocked waiting for the user to acknowledge.
    UserContinue,
    /// The host may resume a paused print.
    PauseResume,
    /// Informational message requiring only dismissal.
    Info,
}

/// Prompt lifecycle state machine and response dispatcher.
///
/// The engine holds the notifier it emits through and the one
/// [`PromptReason`] cell; collaborator state (pause flow, runout sensor,
/// command queue) is reached only through [`PrinterHooks`] arguments.
pub struct PromptEngine {
    notifier: ActionNotifier,
    config: HostConfig,
    reason: PromptReason,
}

impl PromptEngine {
    /// Build an engine at rest (no prompt outstanding).
    #[must_use]
    pub fn new(notifier: ActionNotifier, config: HostConfig) -> Self {
        Self {
            notifier,
            config,
            reason: PromptReason::None,
        }
    }

    /// The reason currently awaiting a host response, if any.
    #[must_use]
    pub fn pending_reason(&self) -> PromptReason {
        self.reason
    }

    /// Access the underlying notifier for one-shot events.
    pub fn notifier_mut(&mut self) -> &mut ActionNotifier {
        &mut self.notifier
    }

    /// Emit `//action:prompt_<step>`, optionally leaving the line open.
    fn prompt_step(&mut self, step: &str, eol: bool) {
        self.notifier.action("prompt_", false);
        self.notifier.append(step);
        if eol {
            self.notifier.end_line();
        }
    }

    /// Emit `//action:prompt_<step> <text>[extra]` as one line.
    fn prompt_step_with(&mut self, step: &str, text: &str, extra: Option<char>) {
        self.prompt_step(step, false);
        self.notifier.append_char(' ');
        self.notifier.append(text);
        if let Some(c) = extra {
            self.notifier.append_char(c);
        }
        self.notifier.end_line();
    }

    /// Open a prompt for `reason`, superseding any prompt already open.
    ///
    /// If a prompt is outstanding its `prompt_end` line is emitted first,
    /// so the host never renders two logical prompts at once. On a quiet
    /// engine no `end` is emitted.
    pub fn begin(&mut self, reason: PromptReason, text: &str, extra: Option<char>) {
        if self.reason != PromptReason::None {
            debug!(superseded = ?self.reason, opening = ?reason, "prompt superseded");
            self.end();
        }
        self.reason = reason;
        self.prompt_step_with("begin", text, extra);
    }

    /// Attach a button label to the prompt under construction.
    ///
    /// With no prompt open this still emits the line (a caller bug the
    /// host will ignore, not a safety violation).
    pub fn button(&mut self, label: &str) {
        self.prompt_step_with("button", label, None);
    }

    /// Signal that the prompt definition is complete and should render.
    pub fn show(&mut self) {
        self.prompt_step("show", true);
    }

    /// Close the prompt display. Does not clear the pending reason —
    /// resolution happens only in [`handle_response`](Self::handle_response).
    pub fn end(&mut self) {
        self.prompt_step("end", true);
    }

    /// Standard prompt construction: open, add up to two buttons, show.
    pub fn do_prompt(
        &mut self,
        reason: PromptReason,
        text: &str,
        button1: Option<&str>,
        button2: Option<&str>,
    ) {
        self.begin(reason, text, None);
        if let Some(label) = button1 {
            self.button(label);
        }
        if let Some(label) = button2 {
            self.button(label);
        }
        self.show();
    }

    /// Open the filament-load prompt.
    ///
    /// Offers "PurgeMore" and, depending on the sensor state at open time,
    /// either "DisableRunout" (sensor tripped) or "Continue".
    pub fn filament_load_prompt(&mut self, hooks: &dyn PrinterHooks) {
        let disable_to_continue = self.config.filament_sensor && hooks.filament_ran_out();
        self.do_prompt(
            PromptReason::FilamentRunout,
            "Paused",
            Some("PurgeMore"),
            Some(if disable_to_continue {
                "DisableRunout"
            } else {
                "Continue"
            }),
        );
    }

    /// Resolve a host response code against the pending reason.
    ///
    /// The pending reason is cleared before any side effect runs, so a
    /// second response with no new prompt open resolves to UNKNOWN STATE
    /// and touches nothing. Per-reason code meaning:
    ///
    /// - `FilamentRunout`: `0` purge more (re-opens the prompt),
    ///   `1` continue / disable runout; other codes are ignored.
    /// - `UserContinue`, `PauseResume`, `Info`: the code is not inspected.
    ///
    /// Always emits one `M876 Responding PROMPT_…` diagnostic line.
    pub fn handle_response(&mut self, code: u8, hooks: &mut dyn PrinterHooks) {
        let pending = std::mem::take(&mut self.reason);
        debug!(reason = ?pending, code, "host response received");

        let mut msg = "UNKNOWN STATE";
        match pending {
            PromptReason::FilamentRunout => {
                msg = "FILAMENT_RUNOUT";
                match code {
                    // "Purge More": feed filament and ask again.
                    0 => {
                        if self.config.advanced_pause {
                            hooks.set_pause_response(PauseMenuResponse::ExtrudeMore);
                        }
                        self.filament_load_prompt(hooks);
                    }
                    // "Continue" / "Disable Runout": resume the print.
                    1 => {
                        if self.config.advanced_pause {
                            hooks.set_pause_response(PauseMenuResponse::ResumePrint);
                        }
                        if self.config.filament_sensor && hooks.filament_ran_out() {
                            hooks.disable_runout();
                            hooks.reset_runout();
                        }
                    }
                    other => {
                        warn!(code = other, "unrecognised filament-runout response code");
                    }
                }
            }
            PromptReason::UserContinue => {
                msg = "FILAMENT_RUNOUT_CONTINUE";
                if self.config.resume_continue {
                    hooks.clear_wait_for_user();
                }
            }
            PromptReason::PauseResume => {
                msg = "LCD_PAUSE_RESUME";
                if self.config.advanced_pause {
                    hooks.inject_command(RESUME_COMMAND);
                }
            }
            PromptReason::Info => {
                msg = "GCODE_INFO";
            }
            PromptReason::None => {
                warn!(code, "host response with no prompt outstanding");
            }
        }

        self.notifier.raw_line(&format!("M876 Responding PROMPT_{msg}"));
    }
}

//! Collaborator seam between the prompt engine and the rest of the printer.
//!
//! The [`PrinterHooks`] trait decouples response dispatch from the
//! pause-flow, the filament-runout sensor, the command queue, and the
//! wait-for-user flag. The firmware supplies the real implementation;
//! [`SimPrinter`] is the in-memory one used by the simulator binary and
//! the tests.

/// Pause-flow response value set on behalf of the host's button choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseMenuResponse {
    /// Feed more filament before resuming.
    ExtrudeMore,
    /// Resume the print as-is.
    ResumePrint,
}

/// Command injected to resume a paused print.
pub const RESUME_COMMAND: &str = "M24";

/// Interface the prompt engine uses to act on the printer.
///
/// All operations are synchronous and infallible; the engine never holds
/// collaborator state of its own.
pub trait PrinterHooks {
    /// Record the host's choice in the pause flow.
    fn set_pause_response(&mut self, response: PauseMenuResponse);

    /// Whether the filament-runout sensor is currently tripped.
    fn filament_ran_out(&self) -> bool;

    /// Disable the runout sensor.
    fn disable_runout(&mut self);

    /// Clear the sensor's tripped state so it does not immediately re-fire.
    fn reset_runout(&mut self);

    /// Clear the flag the motion loop blocks on while awaiting the user.
    fn clear_wait_for_user(&mut self);

    /// Queue a command for later execution.
    fn inject_command(&mut self, command: &str);
}

/// In-memory printer state for the simulator and for tests.
#[derive(Debug, Default)]
pub struct SimPrinter {
    /// Last pause-flow response recorded.
    pub pause_response: Option<PauseMenuResponse>,
    /// Sensor tripped state.
    pub runout_tripped: bool,
    /// Sensor enabled state.
    pub runout_enabled: bool,
    /// Motion-loop blocking flag.
    pub wait_for_user: bool,
    /// Commands queued for execution, oldest first.
    pub queued_commands: Vec<String>,
}

impl SimPrinter {
    /// Fresh printer with the runout sensor enabled and nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runout_enabled: true,
            ..Self::default()
        }
    }
}

impl PrinterHooks for SimPrinter {
    fn set_pause_response(&mut self, response: PauseMenuResponse) {
        self.pause_response = Some(response);
    }

    fn filament_ran_out(&self) -> bool {
        self.runout_tripped
    }

    fn disable_runout(&mut self) {
        self.runout_enabled = false;
    }

    fn reset_runout(&mut self) {
        self.runout_tripped = false;
    }

    fn clear_wait_for_user(&mut self) {
        self.wait_for_user = false;
    }

    fn inject_command(&mut self, command: &str) {
        self.queued_commands.push(command.to_owned());
    }
}

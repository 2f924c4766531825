//! Unit tests for host-response dispatch.
//!
//! Cover the clear-before-act ordering, every reason branch, unknown
//! codes, and the configuration gates on collaborator mutation.

use hostlink::channel::BufferChannel;
use hostlink::hooks::{PauseMenuResponse, SimPrinter};
use hostlink::notifier::ActionNotifier;
use hostlink::prompt::{PromptEngine, PromptReason};
use hostlink::HostConfig;

fn engine_with(config: HostConfig) -> (PromptEngine, BufferChannel) {
    let channel = BufferChannel::new();
    let notifier = ActionNotifier::new(Box::new(channel.clone()), config.actions.clone());
    (PromptEngine::new(notifier, config), channel)
}

fn engine() -> (PromptEngine, BufferChannel) {
    engine_with(HostConfig::default())
}

/// The pending reason is cleared no matter which branch runs.
#[test]
fn any_response_clears_pending_reason() {
    for reason in [
        PromptReason::FilamentRunout,
        PromptReason::UserContinue,
        PromptReason::PauseResume,
        PromptReason::Info,
    ] {
        let (mut engine, _channel) = engine();
        let mut printer = SimPrinter::new();
        engine.begin(reason, "x", None);
        // Code 1 is terminal for every reason, including the runout prompt.
        engine.handle_response(1, &mut printer);
        assert_eq!(engine.pending_reason(), PromptReason::None, "{reason:?}");
    }
}

/// A second response with no new prompt resolves to UNKNOWN STATE and
/// touches no collaborator state.
#[test]
fn duplicate_response_degrades_to_unknown_state() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();

    engine.begin(PromptReason::PauseResume, "Resume Print", None);
    engine.handle_response(0, &mut printer);
    assert_eq!(printer.queued_commands, vec!["M24"]);
    let _ = channel.take();

    engine.handle_response(0, &mut printer);
    assert_eq!(
        channel.lines(),
        vec!["M876 Responding PROMPT_UNKNOWN STATE"]
    );
    // No second injection.
    assert_eq!(printer.queued_commands, vec!["M24"]);
}

/// A response with no prompt ever opened is equally harmless.
#[test]
fn response_without_prompt_is_unknown_state() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();
    engine.handle_response(3, &mut printer);
    assert_eq!(
        channel.lines(),
        vec!["M876 Responding PROMPT_UNKNOWN STATE"]
    );
    assert_eq!(printer.pause_response, None);
    assert!(printer.queued_commands.is_empty());
}

/// Purge More: pause flow is told to extrude and the prompt re-opens.
#[test]
fn runout_code_zero_extrudes_and_reopens() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();
    printer.runout_tripped = true;

    engine.filament_load_prompt(&printer);
    let _ = channel.take();

    engine.handle_response(0, &mut printer);
    assert_eq!(printer.pause_response, Some(PauseMenuResponse::ExtrudeMore));
    // The prompt loops until a terminal choice is made.
    assert_eq!(engine.pending_reason(), PromptReason::FilamentRunout);
    assert_eq!(
        channel.lines(),
        vec![
            "//action:prompt_begin Paused",
            "//action:prompt_button PurgeMore",
            "//action:prompt_button DisableRunout",
            "//action:prompt_show",
            "M876 Responding PROMPT_FILAMENT_RUNOUT",
        ]
    );
}

/// Continue with a tripped sensor: resume, disable the sensor, reset it.
#[test]
fn runout_code_one_resumes_and_disables_tripped_sensor() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();
    printer.runout_tripped = true;

    engine.filament_load_prompt(&printer);
    let _ = channel.take();

    engine.handle_response(1, &mut printer);
    assert_eq!(printer.pause_response, Some(PauseMenuResponse::ResumePrint));
    assert!(!printer.runout_enabled);
    assert!(!printer.runout_tripped);
    assert_eq!(engine.pending_reason(), PromptReason::None);
    // Terminal choice: diagnostic only, no new prompt.
    assert_eq!(
        channel.lines(),
        vec!["M876 Responding PROMPT_FILAMENT_RUNOUT"]
    );
}

/// Continue with an untripped sensor leaves the sensor alone.
#[test]
fn runout_code_one_preserves_untripped_sensor() {
    let (mut engine, _channel) = engine();
    let mut printer = SimPrinter::new();

    engine.filament_load_prompt(&printer);
    engine.handle_response(1, &mut printer);
    assert_eq!(printer.pause_response, Some(PauseMenuResponse::ResumePrint));
    assert!(printer.runout_enabled);
}

/// An unrecognised runout code is a no-op within the branch.
#[test]
fn runout_unknown_code_is_noop() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();
    printer.runout_tripped = true;

    engine.filament_load_prompt(&printer);
    let _ = channel.take();

    engine.handle_response(7, &mut printer);
    assert_eq!(printer.pause_response, None);
    assert!(printer.runout_enabled);
    assert!(printer.runout_tripped);
    assert_eq!(engine.pending_reason(), PromptReason::None);
    assert_eq!(
        channel.lines(),
        vec!["M876 Responding PROMPT_FILAMENT_RUNOUT"]
    );
}

/// User-continue clears the blocking flag regardless of the code.
#[test]
fn user_continue_clears_wait_flag() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();
    printer.wait_for_user = true;

    engine.begin(PromptReason::UserContinue, "Click", None);
    let _ = channel.take();

    engine.handle_response(9, &mut printer);
    assert!(!printer.wait_for_user);
    assert_eq!(
        channel.lines(),
        vec!["M876 Responding PROMPT_FILAMENT_RUNOUT_CONTINUE"]
    );
}

/// Pause-resume injects exactly one resume command, code ignored.
#[test]
fn pause_resume_injects_one_resume_command() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();

    engine.begin(PromptReason::PauseResume, "Resume Print", None);
    let _ = channel.take();

    engine.handle_response(5, &mut printer);
    assert_eq!(printer.queued_commands, vec!["M24"]);
    assert_eq!(
        channel.lines(),
        vec!["M876 Responding PROMPT_LCD_PAUSE_RESUME"]
    );
}

/// Info is acknowledgement only: diagnostic line, no collaborator action.
#[test]
fn info_response_is_diagnostic_only() {
    let (mut engine, channel) = engine();
    let mut printer = SimPrinter::new();

    engine.begin(PromptReason::Info, "Message", None);
    let _ = channel.take();

    engine.handle_response(0, &mut printer);
    assert_eq!(channel.lines(), vec!["M876 Responding PROMPT_GCODE_INFO"]);
    assert_eq!(printer.pause_response, None);
    assert!(printer.queued_commands.is_empty());
    assert!(!printer.wait_for_user);
}

/// With the pause flow disabled, runout responses never set it.
#[test]
fn advanced_pause_gate_blocks_pause_mutations() {
    let config = HostConfig::from_toml_str("advanced_pause = false").expect("config parses");
    let (mut engine, _channel) = engine_with(config);
    let mut printer = SimPrinter::new();

    engine.filament_load_prompt(&printer);
    engine.handle_response(1, &mut printer);
    assert_eq!(printer.pause_response, None);

    engine.begin(PromptReason::PauseResume, "Resume Print", None);
    engine.handle_response(0, &mut printer);
    assert!(printer.queued_commands.is_empty());
}

/// With sensor integration disabled, a tripped sensor is never mutated.
#[test]
fn filament_sensor_gate_blocks_sensor_mutations() {
    let config = HostConfig::from_toml_str("filament_sensor = false").expect("config parses");
    let (mut engine, _channel) = engine_with(config);
    let mut printer = SimPrinter::new();
    printer.runout_tripped = true;

    engine.filament_load_prompt(&printer);
    engine.handle_response(1, &mut printer);
    assert!(printer.runout_enabled);
    assert!(printer.runout_tripped);
}

/// With the wait-flag integration disabled, user-continue leaves it set.
#[test]
fn resume_continue_gate_blocks_wait_flag_clear() {
    let config = HostConfig::from_toml_str("resume_continue = false").expect("config parses");
    let (mut engine, _channel) = engine_with(config);
    let mut printer = SimPrinter::new();
    printer.wait_for_user = true;

    engine.begin(PromptReason::UserContinue, "Click", None);
    engine.handle_response(0, &mut printer);
    assert!(printer.wait_for_user);
}

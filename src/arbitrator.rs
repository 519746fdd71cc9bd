use crate::config::GestureConfig;
use crate::hardware::{TorchControl, TorchDriver};
use crate::input::{evaluate_fling, parse_command, Fling};
use crate::state::FlashlightState;
use crate::surface::Surface;

/// Reconciles the switch, text and gesture producers into one [`FlashlightState`].
///
/// Every accepted event goes through [`InputArbitrator::set_state`], so the switch on the
/// surface always shows the current state and the torch is always told about it.
#[derive(Debug)]
pub struct InputArbitrator<T: TorchControl, S: Surface> {
    state: FlashlightState,
    torch: TorchDriver<T>,
    surface: S,
}

impl<T: TorchControl, S: Surface> InputArbitrator<T, S> {
    pub fn new(torch: TorchDriver<T>, mut surface: S) -> Self {
        let state = FlashlightState::default();
        surface.set_switch(state.is_on());
        InputArbitrator{state, torch, surface}
    }

    pub fn state(&self) -> FlashlightState {self.state}
    pub fn torch(&self) -> &TorchDriver<T> {&self.torch}
    pub fn surface(&self) -> &S {&self.surface}
    pub fn surface_mut(&mut self) -> &mut S {&mut self.surface}

    /// Torch failures become notices; the state stays as set.
    pub fn set_state(&mut self, on: bool) {
        if self.state.set(on) {
            log::info!("flashlight {}", if on {"on"} else {"off"});
        }
        self.surface.set_switch(on);
        if let Err(e) = self.torch.apply_state(on) {
            log::warn!("torch unavailable: {e}");
            self.surface.notice(e.notice());
        }
    }

    pub fn on_switch(&mut self, checked: bool) {
        self.set_state(checked);
    }

    /// Returns the command the text carried, if any.
    pub fn on_text(&mut self, text: &str) -> Option<bool> {
        let command = parse_command(text);
        match command {
            Some(on) => self.set_state(on),
            None => log::debug!("ignoring text {text:?}"),
        }
        command
    }

    /// Returns whether the fling was consumed.
    pub fn on_fling(&mut self, fling: &Fling, config: &GestureConfig) -> bool {
        let outcome = evaluate_fling(fling, config);
        match outcome.state {
            Some(on) => self.set_state(on),
            None => log::debug!("fling below thresholds: {fling:?}"),
        }
        outcome.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::TorchError;
    use crate::input::TouchPoint;
    use crate::notice::Notice;
    use crate::testing::{FakeTorch, RecordingSurface};
    use proptest::prelude::*;

    fn arbitrator(torch: FakeTorch) -> InputArbitrator<FakeTorch, RecordingSurface> {
        InputArbitrator::new(TorchDriver::new(torch), RecordingSurface::default())
    }

    fn fling(delta_y: f64, velocity_y: f64) -> Fling {
        Fling{start: TouchPoint::new(0.0, 400.0), end: TouchPoint::new(0.0, 400.0 + delta_y), velocity: (0.0, velocity_y)}
    }

    #[test]
    fn starts_off_with_switch_off() {
        let arbitrator = arbitrator(FakeTorch::default());
        assert!(!arbitrator.state().is_on());
        assert!(!arbitrator.surface().switch_position());
        assert!(arbitrator.torch().control().calls.is_empty());
    }

    #[test]
    fn setting_on_twice_is_idempotent() {
        let mut arbitrator = arbitrator(FakeTorch::default());
        arbitrator.set_state(true);
        assert!(arbitrator.state().is_on());
        assert!(arbitrator.surface().switch_position());
        arbitrator.set_state(true);
        assert!(arbitrator.state().is_on());
        assert!(arbitrator.surface().switch_position());
        assert_eq!(arbitrator.torch().control().calls, vec![("0".to_string(), true), ("0".to_string(), true)]);
    }

    #[test]
    fn switch_follows_every_producer() {
        let mut arbitrator = arbitrator(FakeTorch::default());
        let config = GestureConfig::default();

        arbitrator.on_text("  on  ");
        assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
        arbitrator.on_fling(&fling(200.0, 300.0), &config);
        assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
        arbitrator.on_switch(true);
        assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
        arbitrator.on_text("xyz");
        assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
        arbitrator.on_fling(&fling(-20.0, -300.0), &config);
        assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
        arbitrator.on_text("Off");
        assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
        assert!(!arbitrator.state().is_on());
    }

    #[test]
    fn text_commands() {
        let mut arbitrator = arbitrator(FakeTorch::default());
        assert_eq!(arbitrator.on_text("  on  "), Some(true));
        assert!(arbitrator.state().is_on());
        assert_eq!(arbitrator.on_text("xyz"), None);
        assert!(arbitrator.state().is_on());
        assert_eq!(arbitrator.on_text("Off"), Some(false));
        assert!(!arbitrator.state().is_on());
        assert_eq!(arbitrator.on_text("xyz"), None);
        assert!(!arbitrator.state().is_on());
    }

    #[test]
    fn unrecognised_text_does_not_touch_the_torch() {
        let mut arbitrator = arbitrator(FakeTorch::default());
        arbitrator.on_text("o");
        arbitrator.on_text("of");
        assert!(arbitrator.torch().control().calls.is_empty());
    }

    #[test]
    fn gesture_thresholds() {
        let mut arbitrator = arbitrator(FakeTorch::default());
        let config = GestureConfig::default();

        assert!(!arbitrator.on_fling(&fling(-50.0, -200.0), &config));
        assert!(!arbitrator.state().is_on());

        assert!(arbitrator.on_fling(&fling(-150.0, -200.0), &config));
        assert!(arbitrator.state().is_on());
        assert!(arbitrator.surface().switch_position());
    }

    #[test]
    fn missing_flash_gives_one_notice_and_no_hardware_call() {
        let mut arbitrator = arbitrator(FakeTorch{has_flash: false, ..FakeTorch::default()});
        arbitrator.set_state(true);

        assert!(arbitrator.torch().control().calls.is_empty());
        assert_eq!(arbitrator.surface().notices, vec![Notice::short("No flashlight available on this device")]);
        assert!(arbitrator.state().is_on());
        assert!(arbitrator.surface().switch_position());
    }

    fn access_failed(_: &str) -> TorchError {
        TorchError::AccessFailed("camera in use".to_string())
    }

    #[test]
    fn access_failure_keeps_the_state() {
        let mut arbitrator = arbitrator(FakeTorch{fail_with: Some(access_failed), ..FakeTorch::default()});
        arbitrator.on_switch(true);

        assert!(arbitrator.state().is_on());
        assert!(arbitrator.surface().switch_position());
        assert_eq!(arbitrator.torch().control().calls, vec![("0".to_string(), true)]);
        assert_eq!(arbitrator.surface().notices, vec![Notice::short("Flashlight not available")]);

        arbitrator.on_switch(false);
        assert_eq!(arbitrator.torch().control().calls.len(), 2);
        assert_eq!(arbitrator.surface().notices.len(), 2);
    }

    #[derive(Debug, Clone)]
    enum Step {
        Switch(bool),
        Text(String),
        Fling(f64, f64),
    }

    fn command_text() -> impl Strategy<Value = String> {
        prop_oneof![
            ("[ ]{0,3}", prop::sample::select(vec!["on", "ON", "oN", "off", "Off", "oFF"]), "[ ]{0,3}")
                .prop_map(|(lead, word, trail)| format!("{lead}{word}{trail}")),
            ".{0,8}",
        ]
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            any::<bool>().prop_map(Step::Switch),
            command_text().prop_map(Step::Text),
            (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(dy, vy)| Step::Fling(dy, vy)),
        ]
    }

    proptest! {
        /// The switch shows the state after every event, and only a recognised command or a
        /// consumed fling moves it.
        #[test]
        fn switch_always_matches_state(steps in prop::collection::vec(step(), 1..40)) {
            let mut arbitrator = arbitrator(FakeTorch::default());
            let config = GestureConfig::default();

            for step in steps {
                let before = arbitrator.state().is_on();
                let expected = match &step {
                    Step::Switch(checked) => {
                        arbitrator.on_switch(*checked);
                        Some(*checked)
                    },
                    Step::Text(text) => {
                        let command = parse_command(text);
                        prop_assert_eq!(arbitrator.on_text(text), command);
                        command
                    },
                    Step::Fling(dy, vy) => {
                        let consumed = arbitrator.on_fling(&fling(*dy, *vy), &config);
                        consumed.then_some(*dy < 0.0)
                    },
                };
                prop_assert_eq!(arbitrator.state().is_on(), expected.unwrap_or(before), "after {:?}", step);
                prop_assert_eq!(arbitrator.surface().switch_position(), arbitrator.state().is_on());
                if let Some(on) = expected {
                    prop_assert_eq!(arbitrator.torch().control().calls.last(), Some(&("0".to_string(), on)));
                }
            }
        }
    }
}

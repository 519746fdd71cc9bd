/// The one piece of application state: whether the torch should be lit.
///
/// Starts off, lives as long as the process and is never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlashlightState {
    on: bool,
}

impl FlashlightState {
    pub fn is_on(&self) -> bool {self.on}

    /// Returns true when the value actually changed.
    pub fn set(&mut self, on: bool) -> bool {
        let changed = self.on != on;
        self.on = on;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_off() {
        assert!(!FlashlightState::default().is_on());
    }

    #[test]
    fn set_reports_changes() {
        let mut state = FlashlightState::default();
        assert!(state.set(true));
        assert!(!state.set(true));
        assert!(state.is_on());
        assert!(state.set(false));
        assert!(!state.is_on());
    }
}

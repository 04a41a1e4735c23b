//! Panel input sampler

use ksdm_core::InputSample;
use ksdm_hal::InputPin;

/// The four panel input lines
///
/// All inputs read high while the driver operates the control.
pub struct PanelInputs<P> {
    /// Selector clockwise detent
    pub mode_up: P,
    /// Selector counter-clockwise detent
    pub mode_down: P,
    /// Idle-stop-go switch
    pub idle_stop_go: P,
    /// Traction / auto-hold button
    pub secondary: P,
}

impl<P: InputPin> PanelInputs<P> {
    /// Read all four lines
    pub fn sample(&self) -> InputSample {
        InputSample {
            mode_up: self.mode_up.is_high(),
            mode_down: self.mode_down.is_high(),
            idle_stop_go: self.idle_stop_go.is_high(),
            secondary: self.secondary.is_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct MockPin(Cell<bool>);

    impl InputPin for MockPin {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_sample_maps_each_line() {
        let inputs = PanelInputs {
            mode_up: MockPin(Cell::new(false)),
            mode_down: MockPin(Cell::new(true)),
            idle_stop_go: MockPin(Cell::new(false)),
            secondary: MockPin(Cell::new(false)),
        };

        let sample = inputs.sample();
        assert!(sample.mode_down);
        assert!(!sample.mode_up && !sample.idle_stop_go && !sample.secondary);

        inputs.secondary.0.set(true);
        assert!(inputs.sample().secondary);
    }
}

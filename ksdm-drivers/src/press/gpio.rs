//! GPIO press emulator
//!
//! Drives the four output lines that are wired in parallel with the
//! factory switches. Every operation blocks on the delay until the line is
//! released again.

use embedded_hal::delay::DelayNs;
use ksdm_core::config::{HardwareRevision, PressTiming};
use ksdm_core::traits::{Direction, PressActuator, PressKind};
use ksdm_hal::{ActiveLevel, OutputPin};

/// The four simulated switch outputs
pub struct PressOutputs<P> {
    /// Selector clockwise detent
    pub clockwise: P,
    /// Selector counter-clockwise detent
    pub counter_clockwise: P,
    /// Idle-stop-go switch
    pub idle_stop_go: P,
    /// Traction / auto-hold button
    pub hold: P,
}

/// Press emulator over GPIO outputs
///
/// Polarity comes from the hardware revision: the hold line is active-low
/// on early boards, the other lines are always active-high.
pub struct GpioPressEmulator<P, D> {
    outputs: PressOutputs<P>,
    delay: D,
    timing: PressTiming,
    revision: HardwareRevision,
}

impl<P: OutputPin, D: DelayNs> GpioPressEmulator<P, D> {
    /// Create a new press emulator
    ///
    /// The outputs are left untouched until [`PressActuator::prime`].
    pub fn new(
        outputs: PressOutputs<P>,
        delay: D,
        timing: PressTiming,
        revision: HardwareRevision,
    ) -> Self {
        Self {
            outputs,
            delay,
            timing,
            revision,
        }
    }

    fn hold_level(&self) -> ActiveLevel {
        self.revision.hold_active_level()
    }

    fn pulse_level(&self) -> ActiveLevel {
        self.revision.pulse_active_level()
    }

    fn set_hold(&mut self, asserted: bool) {
        let level = self.hold_level();
        self.outputs.hold.set_asserted(level, asserted);
    }

    fn prime_levels(&mut self) {
        let pulse = self.pulse_level();
        self.outputs.clockwise.set_asserted(pulse, false);
        self.outputs.counter_clockwise.set_asserted(pulse, false);
        self.outputs.idle_stop_go.set_asserted(pulse, false);
        self.set_hold(false);
    }
}

impl<P: OutputPin, D: DelayNs> PressActuator for GpioPressEmulator<P, D> {
    fn prime(&mut self) {
        self.prime_levels();

        // Early boards need one hold-line blip before the module listens
        if self.revision.needs_hold_wake() {
            let wait = self.timing.pulse_ms;
            self.delay.delay_ms(wait);
            self.set_hold(false);
            self.delay.delay_ms(wait);
            self.set_hold(true);
            self.delay.delay_ms(wait);
            self.set_hold(false);
        }
    }

    fn press_hold(&mut self, kind: PressKind) {
        let duration = match kind {
            PressKind::Short => self.timing.short_press_ms,
            PressKind::Long => self.timing.long_press_ms,
        };

        self.set_hold(true);
        self.delay.delay_ms(duration);
        self.set_hold(false);
    }

    fn toggle_idle_stop_go(&mut self) {
        let level = self.pulse_level();
        self.outputs.idle_stop_go.set_asserted(level, true);
        self.delay.delay_ms(self.timing.pulse_ms);
        self.outputs.idle_stop_go.set_asserted(level, false);
    }

    fn pulse(&mut self, direction: Direction, times: u8) {
        let level = self.pulse_level();
        let pin = match direction {
            Direction::Clockwise => &mut self.outputs.clockwise,
            Direction::CounterClockwise => &mut self.outputs.counter_clockwise,
        };

        for _ in 0..times {
            pin.set_asserted(level, true);
            self.delay.delay_ms(self.timing.pulse_ms);
            pin.set_asserted(level, false);
            self.delay.delay_ms(self.timing.pulse_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared clock and edge log for the mock pins and delay
    #[derive(Default)]
    struct Bench {
        now_ms: u64,
        edges: Vec<(&'static str, bool, u64)>,
    }

    type SharedBench = Rc<RefCell<Bench>>;

    struct MockPin {
        name: &'static str,
        high: bool,
        bench: SharedBench,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            let mut bench = self.bench.borrow_mut();
            let now = bench.now_ms;
            bench.edges.push((self.name, true, now));
        }

        fn set_low(&mut self) {
            self.high = false;
            let mut bench = self.bench.borrow_mut();
            let now = bench.now_ms;
            bench.edges.push((self.name, false, now));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockDelay {
        bench: SharedBench,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.bench.borrow_mut().now_ms += u64::from(ns / 1_000_000);
        }
    }

    fn emulator(revision: u8) -> (GpioPressEmulator<MockPin, MockDelay>, SharedBench) {
        let bench = SharedBench::default();
        let pin = |name| MockPin {
            name,
            high: false,
            bench: bench.clone(),
        };
        let outputs = PressOutputs {
            clockwise: pin("cw"),
            counter_clockwise: pin("ccw"),
            idle_stop_go: pin("isg"),
            hold: pin("hold"),
        };
        let delay = MockDelay {
            bench: bench.clone(),
        };
        let emulator = GpioPressEmulator::new(
            outputs,
            delay,
            PressTiming::DEFAULT,
            HardwareRevision(revision),
        );
        (emulator, bench)
    }

    fn edges_for(bench: &SharedBench, name: &str) -> Vec<(bool, u64)> {
        bench
            .borrow()
            .edges
            .iter()
            .filter(|(pin, _, _)| *pin == name)
            .map(|&(_, level, at)| (level, at))
            .collect()
    }

    #[test]
    fn test_prime_active_high_board() {
        let (mut emulator, bench) = emulator(6);
        emulator.prime();

        assert_eq!(bench.borrow().now_ms, 0);
        for name in ["cw", "ccw", "isg", "hold"] {
            assert_eq!(edges_for(&bench, name), vec![(false, 0)]);
        }
    }

    #[test]
    fn test_prime_wakes_hold_line_on_early_board() {
        let (mut emulator, bench) = emulator(5);
        emulator.prime();

        // Active-low: released is high
        assert_eq!(
            edges_for(&bench, "hold"),
            vec![(true, 0), (true, 500), (false, 1000), (true, 1500)]
        );
        assert_eq!(edges_for(&bench, "cw"), vec![(false, 0)]);
    }

    #[test]
    fn test_short_and_long_press_timing() {
        let (mut emulator, bench) = emulator(6);
        emulator.short_press();
        emulator.long_press();

        assert_eq!(
            edges_for(&bench, "hold"),
            vec![(true, 0), (false, 500), (true, 500), (false, 4000)]
        );
    }

    #[test]
    fn test_hold_press_active_low() {
        let (mut emulator, bench) = emulator(3);
        emulator.press_hold(PressKind::Short);
        assert_eq!(edges_for(&bench, "hold"), vec![(false, 0), (true, 500)]);
    }

    #[test]
    fn test_pulses_are_sequential() {
        let (mut emulator, bench) = emulator(5);
        emulator.pulse(Direction::CounterClockwise, 2);

        assert_eq!(
            edges_for(&bench, "ccw"),
            vec![(true, 0), (false, 500), (true, 1000), (false, 1500)]
        );
        assert_eq!(bench.borrow().now_ms, 2000);
        assert!(edges_for(&bench, "cw").is_empty());
    }

    #[test]
    fn test_zero_pulses_do_nothing() {
        let (mut emulator, bench) = emulator(6);
        emulator.pulse(Direction::Clockwise, 0);
        assert!(bench.borrow().edges.is_empty());
    }

    #[test]
    fn test_idle_stop_go_toggle() {
        let (mut emulator, bench) = emulator(5);
        emulator.toggle_idle_stop_go();
        assert_eq!(edges_for(&bench, "isg"), vec![(true, 0), (false, 500)]);
        assert_eq!(bench.borrow().now_ms, 500);
    }
}

//! Adapters over `embedded-hal` 1.0 digital pins.
//!
//! Wire real GPIO into the decoder without writing a platform HAL:
//! [`PinButtons`] maps three input pins onto [`ButtonBank`] and
//! [`PinOutputs`] maps five output pins onto [`OutputBank`].
//!
//! Pin errors are swallowed: a failed input read counts as "not pressed"
//! and a failed output write is dropped, matching the infallible trait
//! contracts (on AVR/ESP-class targets these operations cannot fail).

use crate::traits::{Button, ButtonBank, OutputBank, OutputLine};
use embedded_hal::digital::{InputPin, OutputPin};

/// [`ButtonBank`] over three `embedded-hal` input pins.
///
/// Buttons are active-high by default (pressed reads high), matching the
/// reference hardware's pull-down wiring; use
/// [`active_low`](Self::active_low) for pull-up wiring.
pub struct PinButtons<M, TA, TB> {
    mode: M,
    trigger_a: TA,
    trigger_b: TB,
    active_low: bool,
}

impl<M: InputPin, TA: InputPin, TB: InputPin> PinButtons<M, TA, TB> {
    /// Wrap the three button pins (active-high).
    pub fn new(mode: M, trigger_a: TA, trigger_b: TB) -> Self {
        Self {
            mode,
            trigger_a,
            trigger_b,
            active_low: false,
        }
    }

    /// Treat a low level as pressed (pull-up wiring).
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    fn read<P: InputPin>(pin: &mut P, active_low: bool) -> bool {
        let high = pin.is_high().unwrap_or(active_low);
        high != active_low
    }
}

impl<M: InputPin, TA: InputPin, TB: InputPin> ButtonBank for PinButtons<M, TA, TB> {
    fn pressed(&mut self, button: Button) -> bool {
        let active_low = self.active_low;
        match button {
            Button::Mode => Self::read(&mut self.mode, active_low),
            Button::TriggerA => Self::read(&mut self.trigger_a, active_low),
            Button::TriggerB => Self::read(&mut self.trigger_b, active_low),
        }
    }
}

/// [`OutputBank`] over five `embedded-hal` output pins.
pub struct PinOutputs<MI, SA, SB, FR, AR> {
    mode_indicator: MI,
    status_a: SA,
    status_b: SB,
    fireplace: FR,
    anvil: AR,
}

impl<MI, SA, SB, FR, AR> PinOutputs<MI, SA, SB, FR, AR>
where
    MI: OutputPin,
    SA: OutputPin,
    SB: OutputPin,
    FR: OutputPin,
    AR: OutputPin,
{
    /// Wrap the five output pins.
    pub fn new(mode_indicator: MI, status_a: SA, status_b: SB, fireplace: FR, anvil: AR) -> Self {
        Self {
            mode_indicator,
            status_a,
            status_b,
            fireplace,
            anvil,
        }
    }
}

fn drive<P: OutputPin>(pin: &mut P, level: bool) {
    let result = if level { pin.set_high() } else { pin.set_low() };
    let _ = result;
}

impl<MI, SA, SB, FR, AR> OutputBank for PinOutputs<MI, SA, SB, FR, AR>
where
    MI: OutputPin,
    SA: OutputPin,
    SB: OutputPin,
    FR: OutputPin,
    AR: OutputPin,
{
    fn set(&mut self, line: OutputLine, level: bool) {
        match line {
            OutputLine::ModeIndicator => drive(&mut self.mode_indicator, level),
            OutputLine::StatusA => drive(&mut self.status_a, level),
            OutputLine::StatusB => drive(&mut self.status_b, level),
            OutputLine::FireplaceRelay => drive(&mut self.fireplace, level),
            OutputLine::AnvilRelay => drive(&mut self.anvil, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct FakePin {
        high: bool,
    }

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn active_high_buttons() {
        let mut buttons = PinButtons::new(
            FakePin { high: true },
            FakePin::default(),
            FakePin::default(),
        );
        assert!(buttons.pressed(Button::Mode));
        assert!(!buttons.pressed(Button::TriggerA));
    }

    #[test]
    fn active_low_buttons_invert() {
        let mut buttons = PinButtons::new(
            FakePin { high: false },
            FakePin { high: true },
            FakePin::default(),
        )
        .active_low();
        assert!(buttons.pressed(Button::Mode));
        assert!(!buttons.pressed(Button::TriggerA));
    }

    #[test]
    fn outputs_drive_pins() {
        let mut outputs = PinOutputs::new(
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
            FakePin::default(),
        );
        outputs.set(OutputLine::FireplaceRelay, true);
        outputs.set(OutputLine::FireplaceRelay, false);
        outputs.clear_animation_lines();
    }
}

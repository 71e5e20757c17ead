//! Information-mode screen sequencer.
//!
//! Information mode walks a fixed, ordered set of settings "screens" on
//! the diagnostic console: first the learned address, then the firmware
//! version. The original firmware blocked inside nested wait loops here;
//! [`InfoScreens`] unrolls the same press-then-release handshake into a
//! poll-driven state machine. Advancing past the last screen ends the
//! mode, so a full pass always consumes exactly one press/release cycle
//! per screen.

/// The settings screens, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoScreen {
    /// The learned bus address.
    Address,
    /// The firmware version banner.
    Firmware,
}

const SCREENS: [InfoScreen; 2] = [InfoScreen::Address, InfoScreen::Firmware];

/// What the decoder should do after feeding one button sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfoStep {
    /// Render this screen to the console.
    Show(InfoScreen),
    /// Nothing to do this poll.
    Idle,
    /// The sequence is complete; return to running mode.
    Done,
}

/// Poll-driven sequencer for the information-mode screens.
#[derive(Debug)]
pub struct InfoScreens {
    index: usize,
    entered: bool,
    awaiting_release: bool,
}

impl InfoScreens {
    /// Start a fresh sequence at the first screen.
    pub fn new() -> Self {
        Self {
            index: 0,
            entered: false,
            awaiting_release: false,
        }
    }

    /// Feed one mode-button level sample.
    ///
    /// The first call shows the first screen. After that, each press edge
    /// arms the advance and the matching release performs it: either the
    /// next screen is shown or, past the last screen, [`InfoStep::Done`]
    /// is returned.
    pub fn poll(&mut self, mode_pressed: bool) -> InfoStep {
        if !self.entered {
            self.entered = true;
            return InfoStep::Show(SCREENS[0]);
        }

        if !self.awaiting_release {
            if mode_pressed {
                self.awaiting_release = true;
            }
            return InfoStep::Idle;
        }

        if mode_pressed {
            return InfoStep::Idle;
        }

        self.awaiting_release = false;
        self.index += 1;
        match SCREENS.get(self.index) {
            Some(screen) => InfoStep::Show(*screen),
            None => InfoStep::Done,
        }
    }
}

impl Default for InfoScreens {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive one full press-then-release cycle, returning the step seen on
    /// the release edge.
    fn cycle(screens: &mut InfoScreens) -> InfoStep {
        assert_eq!(screens.poll(true), InfoStep::Idle);
        screens.poll(false)
    }

    #[test]
    fn first_poll_shows_address() {
        let mut screens = InfoScreens::new();
        assert_eq!(screens.poll(false), InfoStep::Show(InfoScreen::Address));
    }

    #[test]
    fn two_cycles_walk_both_screens_then_done() {
        let mut screens = InfoScreens::new();
        let _ = screens.poll(false);

        assert_eq!(cycle(&mut screens), InfoStep::Show(InfoScreen::Firmware));
        assert_eq!(cycle(&mut screens), InfoStep::Done);
    }

    #[test]
    fn held_button_does_not_advance() {
        let mut screens = InfoScreens::new();
        let _ = screens.poll(false);

        assert_eq!(screens.poll(true), InfoStep::Idle);
        assert_eq!(screens.poll(true), InfoStep::Idle);
        assert_eq!(screens.poll(true), InfoStep::Idle);
        // Only the release advances.
        assert_eq!(screens.poll(false), InfoStep::Show(InfoScreen::Firmware));
    }

    #[test]
    fn idle_polls_do_nothing() {
        let mut screens = InfoScreens::new();
        let _ = screens.poll(false);

        for _ in 0..10 {
            assert_eq!(screens.poll(false), InfoStep::Idle);
        }
    }
}

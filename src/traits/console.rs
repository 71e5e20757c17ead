//! Line-oriented diagnostic output.
//!
//! The decoder narrates mode changes, learned addresses, and audio-module
//! notices to a human-readable text channel (a serial console on real
//! hardware). The output is not a machine-parsed protocol.

/// Diagnostic text sink.
///
/// Infallible by design: a lost diagnostic line never affects decoder
/// behavior, so implementations swallow transport errors.
pub trait Console {
    /// Emit one line of text (without trailing newline).
    fn line(&mut self, text: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collector(Vec<String>);

    impl Console for Collector {
        fn line(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    #[test]
    fn lines_arrive_in_order() {
        let mut console = Collector(Vec::new());
        console.line("first");
        console.line("second");
        assert_eq!(console.0, ["first", "second"]);
    }
}

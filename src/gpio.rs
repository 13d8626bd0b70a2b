use crate::color::Channel;
use crate::config::LineConfig;
use crate::device::Lines;
use crate::multiplex::Multiplex;

use embedded_hal::digital::{Error, ErrorKind, OutputPin, PinState};

impl<A: OutputPin, C: OutputPin, const N: usize> Multiplex<GpioLines<A, C, N>, N> {
    /// Create a new driver on GPIO output pins
    /// # Arguments
    /// * `anodes` - The anode select pins, in LED index order
    /// * `red`, `green`, `blue` - The shared channel pins
    ///
    /// # Returns
    /// A new driver using the default line polarity
    pub fn new_with_pins(anodes: [A; N], red: C, green: C, blue: C) -> Self {
        Self::new(GpioLines::new(anodes, red, green, blue))
    }
}

/// [`Lines`] implementation over `embedded-hal` output pins.
pub struct GpioLines<A, C, const N: usize> {
    anodes: [A; N],
    channels: [C; 3],
    config: LineConfig,
}

impl<A: OutputPin, C: OutputPin, const N: usize> GpioLines<A, C, N> {
    pub fn new(anodes: [A; N], red: C, green: C, blue: C) -> Self {
        Self {
            anodes,
            channels: [red, green, blue],
            config: LineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> LineConfig {
        self.config
    }

    /// Give the pins back, anodes first then red, green, blue
    pub fn release(self) -> ([A; N], [C; 3]) {
        (self.anodes, self.channels)
    }
}

impl<A: OutputPin, C: OutputPin, const N: usize> Lines for GpioLines<A, C, N> {
    type Error = ErrorKind;

    fn anode_count(&self) -> usize {
        N
    }

    fn set_anode(&mut self, index: usize, active: bool) -> Result<(), ErrorKind> {
        let level = PinState::from(self.config.anode.is_high(active));
        match self.anodes.get_mut(index) {
            Some(pin) => pin.set_state(level).map_err(|e| e.kind()),
            None => Ok(()),
        }
    }

    fn set_channel(&mut self, channel: Channel, active: bool) -> Result<(), ErrorKind> {
        let level = PinState::from(self.config.channel.is_high(active));
        self.channels[channel.index()]
            .set_state(level)
            .map_err(|e| e.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::ActiveLevel;
    use crate::test_utils::*;

    use core::cell::Cell;

    #[test]
    fn default_polarity_test() {
        let anodes = [Cell::new(true), Cell::new(true)];
        let channels = [Cell::new(false), Cell::new(false), Cell::new(false)];

        let mut lines = GpioLines::new(
            [FakePin::new(&anodes[0]), FakePin::new(&anodes[1])],
            FakePin::new(&channels[0]),
            FakePin::new(&channels[1]),
            FakePin::new(&channels[2]),
        );

        lines.set_anode(1, true).unwrap();
        lines.set_anode(0, false).unwrap();
        lines.set_channel(Channel::Green, true).unwrap();
        lines.set_channel(Channel::Red, false).unwrap();
        lines.set_channel(Channel::Blue, false).unwrap();

        // Anodes are active high, channels sink current when low
        assert_eq!([anodes[0].get(), anodes[1].get()], [false, true]);
        assert_eq!(
            [channels[0].get(), channels[1].get(), channels[2].get()],
            [true, false, true]
        );
    }

    #[test]
    fn inverted_polarity_test() {
        let anode = Cell::new(true);
        let channels = [Cell::new(false), Cell::new(false), Cell::new(false)];

        let mut lines = GpioLines::new(
            [FakePin::new(&anode)],
            FakePin::new(&channels[0]),
            FakePin::new(&channels[1]),
            FakePin::new(&channels[2]),
        )
        .with_config(LineConfig {
            anode: ActiveLevel::Low,
            channel: ActiveLevel::High,
        });

        lines.set_anode(0, true).unwrap();
        lines.set_channel(Channel::Blue, true).unwrap();

        assert!(!anode.get());
        assert!(channels[2].get());
    }

    #[test]
    fn release_test() {
        let anodes = [Cell::new(false), Cell::new(false)];
        let channels = [Cell::new(false), Cell::new(false), Cell::new(false)];
        let config = LineConfig {
            anode: ActiveLevel::Low,
            channel: ActiveLevel::High,
        };

        let lines = GpioLines::new(
            [FakePin::new(&anodes[0]), FakePin::new(&anodes[1])],
            FakePin::new(&channels[0]),
            FakePin::new(&channels[1]),
            FakePin::new(&channels[2]),
        )
        .with_config(config);
        assert_eq!(lines.config(), config);

        let (mut anode_pins, mut channel_pins) = lines.release();
        anode_pins[1].set_high().unwrap();
        channel_pins[2].set_high().unwrap();

        // Anodes in index order, then red, green, blue
        assert_eq!([anodes[0].get(), anodes[1].get()], [false, true]);
        assert_eq!(
            [channels[0].get(), channels[1].get(), channels[2].get()],
            [false, false, true]
        );
    }

    #[test]
    fn out_of_range_anode_test() {
        let anode = Cell::new(false);
        let channels = [Cell::new(false), Cell::new(false), Cell::new(false)];

        let mut lines = GpioLines::new(
            [FakePin::new(&anode)],
            FakePin::new(&channels[0]),
            FakePin::new(&channels[1]),
            FakePin::new(&channels[2]),
        );

        assert_eq!(lines.set_anode(4, true), Ok(()));
        assert!(!anode.get());
    }

    #[test]
    fn pin_error_kind_test() {
        let anode = Cell::new(false);
        let channels = [Cell::new(false), Cell::new(false), Cell::new(false)];

        let mut lines = GpioLines::new(
            [FakePin::new(&anode)],
            FakePin::failing(&channels[0]),
            FakePin::new(&channels[1]),
            FakePin::new(&channels[2]),
        );

        assert_eq!(lines.set_channel(Channel::Red, true), Err(ErrorKind::Other));
    }

    #[test]
    fn driver_on_pins_test() {
        let anodes = [Cell::new(false), Cell::new(false), Cell::new(false)];
        let channels = [Cell::new(false), Cell::new(false), Cell::new(false)];

        let mut multiplex = Multiplex::new_with_pins(
            [
                FakePin::new(&anodes[0]),
                FakePin::new(&anodes[1]),
                FakePin::new(&anodes[2]),
            ],
            FakePin::new(&channels[0]),
            FakePin::new(&channels[1]),
            FakePin::new(&channels[2]),
        );

        multiplex.begin().unwrap();
        multiplex.set_color(1, Color::Magenta);
        multiplex.update().unwrap();
        multiplex.update().unwrap();

        assert_eq!(
            [anodes[0].get(), anodes[1].get(), anodes[2].get()],
            [false, true, false]
        );
        // Red and blue pulled low, green released
        assert_eq!(
            [channels[0].get(), channels[1].get(), channels[2].get()],
            [false, true, false]
        );
    }
}

use crate::color::Rgb;
use crate::config::*;

/// What a single scan step puts on the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Everything stays inactive
    Blank,
    /// Drive the channels to `rgb` and select the anode of LED `index`
    Lit { index: usize, rgb: Rgb },
}

/// LED table and scan counters of a multiplexed array of `N` LEDs.
pub struct State<const N: usize> {
    leds: [Rgb; N],
    cursor: usize,
    phase: u8,
    brightness: u8,
}

impl<const N: usize> Default for State<N> {
    // All LEDs dark, full brightness, scan at the first LED
    fn default() -> Self {
        Self {
            leds: [Rgb::OFF; N],
            cursor: 0,
            phase: 0,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl<const N: usize> State<N> {
    pub fn leds(&self) -> &[Rgb; N] {
        &self.leds
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.leds.get(index).copied()
    }

    /// Returns false, leaving the table untouched, when `index` is out of range
    pub fn set(&mut self, index: usize, rgb: Rgb) -> bool {
        match self.leds.get_mut(index) {
            Some(led) => {
                *led = rgb;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.leds.fill(Rgb::OFF);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn set_brightness(&mut self, level: u8) {
        self.brightness = level.min(MAX_BRIGHTNESS);
    }

    /// Moves the scan back to the first LED and the first dimming phase
    pub fn restart(&mut self) {
        self.cursor = 0;
        self.phase = 0;
    }

    /// Whether the current dimming phase shows the configured colors.
    pub fn is_lit(&self) -> bool {
        self.brightness > 0 && self.phase < self.brightness
    }

    /// The frame for the LED under the cursor
    pub fn frame(&self) -> Frame {
        if self.is_lit() {
            Frame::Lit {
                index: self.cursor,
                rgb: self.leds[self.cursor],
            }
        } else {
            Frame::Blank
        }
    }

    /// Moves the counters one step on.
    ///
    /// The phase advances when the cursor lands on `N - 2`, one LED before a
    /// pass would complete. For a single LED every step is a boundary.
    pub fn step(&mut self) {
        self.cursor = (self.cursor + 1) % N;
        if self.cursor == N.saturating_sub(2) {
            self.phase = (self.phase + 1) % PWM_PHASES;
        }
    }
}

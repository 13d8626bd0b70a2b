/// One of the three shared color channel lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    /// Channels in line order
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// On/off state of the three channels of one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(false, false, false);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    pub const fn channel(&self, channel: Channel) -> bool {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub const fn is_off(&self) -> bool {
        !(self.red || self.green || self.blue)
    }
}

/// The eight colors a discrete RGB LED can show.
///
/// The discriminant packs the channels as bit 0 = red, bit 1 = green,
/// bit 2 = blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Color {
    #[default]
    Off = 0b000,
    Red = 0b001,
    Green = 0b010,
    Yellow = 0b011,
    Blue = 0b100,
    Magenta = 0b101,
    Cyan = 0b110,
    White = 0b111,
}

impl Color {
    /// Decode a packed value. Only the low three bits are looked at.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0b000 => Color::Off,
            0b001 => Color::Red,
            0b010 => Color::Green,
            0b011 => Color::Yellow,
            0b100 => Color::Blue,
            0b101 => Color::Magenta,
            0b110 => Color::Cyan,
            _ => Color::White,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let bits = color.bits();
        Rgb::new(bits & 0b001 != 0, bits & 0b010 != 0, bits & 0b100 != 0)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::from_bits(rgb.red as u8 | (rgb.green as u8) << 1 | (rgb.blue as u8) << 2)
    }
}

use crate::color::Channel;

/// The output lines of a multiplexed LED array: one anode select line per LED
/// and three channel lines shared by all of them.
///
/// Implementations work in logical terms, `active == true` lights the
/// channel or selects the LED whatever the electrical polarity is.
pub trait Lines {
    type Error;

    /// Number of anode select lines
    fn anode_count(&self) -> usize;

    fn set_anode(&mut self, index: usize, active: bool) -> Result<(), Self::Error>;

    fn set_channel(&mut self, channel: Channel, active: bool) -> Result<(), Self::Error>;
}

impl<T> Lines for &mut T
where
    T: Lines,
{
    type Error = T::Error;

    fn anode_count(&self) -> usize {
        T::anode_count(self)
    }

    fn set_anode(&mut self, index: usize, active: bool) -> Result<(), Self::Error> {
        T::set_anode(self, index, active)
    }

    fn set_channel(&mut self, channel: Channel, active: bool) -> Result<(), Self::Error> {
        T::set_channel(self, channel, active)
    }
}

//! Driver container for interrupt driven scanning.
//!
//! The periodic interrupt and the application both reach the driver through a
//! [`SharedMultiplex`], usually placed in a `static`. Every access runs inside
//! a critical section, so a scan step never sees half of a color change and
//! the scan counters are never written from two contexts at once.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::color::Rgb;
use crate::device::Lines;
use crate::multiplex::{Multiplex, MultiplexError};

/// A [`Multiplex`] shared between an interrupt handler and the application.
///
/// The lines live inside the driver, so [`tick`](Self::tick) and
/// [`update`](Self::update) hold the critical section for the whole step,
/// up to `N + 7` line writes. That is a few register writes with memory
/// mapped GPIO. Lines behind a slow bus, such as an I2C port expander, keep
/// interrupts masked for as long as those transfers take; scan them with
/// [`Multiplex::run`] outside an interrupt instead.
///
/// ```ignore
/// static DISPLAY: SharedMultiplex<Lines, 6> = SharedMultiplex::new();
///
/// fn on_timer() {
///     DISPLAY.tick();
/// }
/// ```
pub struct SharedMultiplex<L, const N: usize> {
    inner: Mutex<RefCell<Option<Multiplex<L, N>>>>,
}

impl<L, const N: usize> Default for SharedMultiplex<L, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L, const N: usize> SharedMultiplex<L, N> {
    /// An empty container. Every operation is a no-op until a driver is
    /// installed.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Move a driver in, returning the one it replaces
    pub fn install(&self, multiplex: Multiplex<L, N>) -> Option<Multiplex<L, N>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(multiplex))
    }

    /// Move the driver out, leaving the container empty
    pub fn release(&self) -> Option<Multiplex<L, N>> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Run `f` on the driver inside a critical section
    ///
    /// # Returns
    /// * `Some` with the closure result, `None` when no driver is installed
    pub fn lock<R>(&self, f: impl FnOnce(&mut Multiplex<L, N>) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }

    pub fn set_rgb(&self, index: usize, red: bool, green: bool, blue: bool) {
        self.lock(|multiplex| multiplex.set_rgb(index, red, green, blue));
    }

    pub fn set_color(&self, index: usize, color: impl Into<Rgb>) {
        let rgb = color.into();
        self.lock(|multiplex| multiplex.set_color(index, rgb));
    }

    pub fn set_global_brightness(&self, level: u8) {
        self.lock(|multiplex| multiplex.set_global_brightness(level));
    }

    pub fn global_brightness(&self) -> Option<u8> {
        self.lock(|multiplex| multiplex.global_brightness())
    }

    pub fn estimated_current(&self) -> Option<f32> {
        self.lock(|multiplex| multiplex.estimated_current())
    }
}

impl<L: Lines, const N: usize> SharedMultiplex<L, N> {
    pub fn off(&self, index: usize) -> Result<(), MultiplexError<L::Error>> {
        self.lock(|multiplex| multiplex.off(index)).unwrap_or(Ok(()))
    }

    pub fn all_off(&self) -> Result<(), MultiplexError<L::Error>> {
        self.lock(|multiplex| multiplex.all_off()).unwrap_or(Ok(()))
    }

    /// One scan step, see [`Multiplex::update`]
    pub fn update(&self) -> Result<(), MultiplexError<L::Error>> {
        self.lock(|multiplex| multiplex.update()).unwrap_or(Ok(()))
    }

    /// Scan step for interrupt handlers: a failed line write is logged and
    /// dropped.
    pub fn tick(&self) {
        match self.update() {
            Ok(()) => {}
            Err(MultiplexError::Anode { index, .. }) => {
                warn!("rgb-multiplex: writing anode {} failed", index);
            }
            Err(MultiplexError::Channel { channel, .. }) => {
                warn!("rgb-multiplex: writing {} channel failed", channel);
            }
        }
    }
}

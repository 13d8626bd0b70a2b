use crate::config::AUTO_UPDATE_PERIOD_US;

/// A platform timer able to raise a periodic interrupt.
pub trait PeriodicTimer {
    type Error;

    /// Arm the timer so that `handler` runs every `period_us` microseconds
    fn start(&mut self, period_us: u32, handler: fn()) -> Result<(), Self::Error>;

    /// Disarm the timer, `handler` is not called anymore
    fn cancel(&mut self) -> Result<(), Self::Error>;
}

impl<T> PeriodicTimer for &mut T
where
    T: PeriodicTimer,
{
    type Error = T::Error;

    fn start(&mut self, period_us: u32, handler: fn()) -> Result<(), Self::Error> {
        T::start(self, period_us, handler)
    }

    fn cancel(&mut self) -> Result<(), Self::Error> {
        T::cancel(self)
    }
}

/// Scans the display from a periodic interrupt, without the application
/// calling [`Multiplex::update`](crate::Multiplex::update).
///
/// The handler carries no argument, so it is bound to exactly one driver,
/// normally a `static` [`SharedMultiplex`](crate::SharedMultiplex) whose
/// [`tick`](crate::SharedMultiplex::tick) it calls.
pub struct AutoUpdate<T> {
    timer: T,
    period_us: u32,
    running: bool,
}

impl<T: PeriodicTimer> AutoUpdate<T> {
    /// Scheduler scanning every [`AUTO_UPDATE_PERIOD_US`]
    pub fn new(timer: T) -> Self {
        Self::with_period(timer, AUTO_UPDATE_PERIOD_US)
    }

    pub fn with_period(timer: T, period_us: u32) -> Self {
        Self {
            timer,
            period_us,
            running: false,
        }
    }

    /// Arm the timer. Does nothing when already running.
    ///
    /// # Arguments
    /// * `handler` - Called from the timer interrupt, one scan step per call
    pub fn start(&mut self, handler: fn()) -> Result<(), T::Error> {
        if self.running {
            return Ok(());
        }
        self.timer.start(self.period_us, handler)?;
        self.running = true;
        debug!("rgb-multiplex: auto update every {} us", self.period_us);
        Ok(())
    }

    /// Disarm the timer. Does nothing when not running.
    pub fn stop(&mut self) -> Result<(), T::Error> {
        if !self.running {
            return Ok(());
        }
        self.timer.cancel()?;
        self.running = false;
        debug!("rgb-multiplex: auto update stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    pub fn inner(&self) -> &T {
        &self.timer
    }

    /// Give the timer back. It stays armed if the scheduler was running.
    pub fn into_inner(self) -> T {
        self.timer
    }
}

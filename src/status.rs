//! Operator status output.
//!
//! The table reports short human-readable messages ("Zeroed!", "Waiting...")
//! to a display or log. [`SharedStatus`] serializes those writes so that a
//! message is never interleaved with another one.

use core::cell::RefCell;

use critical_section::Mutex;

/// Destination for status messages (LCD, serial console, log).
pub trait StatusSink {
    /// Write one complete message.
    fn write_status(&mut self, message: &str);
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn write_status(&mut self, message: &str) {
        (**self).write_status(message)
    }
}

/// A status sink shared between contexts.
///
/// The lock is taken only for the duration of a single write, so it is never
/// held across a move or homing run.
pub struct SharedStatus<S> {
    sink: Mutex<RefCell<S>>,
}

impl<S: StatusSink> SharedStatus<S> {
    /// Wrap a sink.
    pub const fn new(sink: S) -> Self {
        Self {
            sink: Mutex::new(RefCell::new(sink)),
        }
    }

    /// Write one message under the lock.
    pub fn write(&self, message: &str) {
        critical_section::with(|cs| self.sink.borrow_ref_mut(cs).write_status(message));
    }

    /// Run `f` with exclusive access to the sink.
    pub fn with<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        critical_section::with(|cs| f(&mut self.sink.borrow_ref_mut(cs)))
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> S {
        self.sink.into_inner().into_inner()
    }
}

//! In-flight request flag with an RAII guard.

use std::cell::Cell;

#[derive(Debug, Default)]
pub struct BusyFlag(Cell<bool>);

impl BusyFlag {
    /// Mark a request outstanding; `None` if one already is
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        if self.0.replace(true) {
            None
        } else {
            Some(BusyGuard(&self.0))
        }
    }

    pub fn is_busy(&self) -> bool {
        self.0.get()
    }
}

/// Clears the flag when dropped, whichever way the request ended
#[derive(Debug)]
pub struct BusyGuard<'a>(&'a Cell<bool>);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

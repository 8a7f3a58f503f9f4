//! Bypass handles granted to bound peripherals
//!
//! A [`RegisterHandle`] is the narrow capability a peripheral uses to post
//! results (done flags, status codes, classification labels) into its own
//! registers without re-entering the map's permission checks. The only way
//! to obtain one is [`crate::RegisterMap::bind`].

use crate::entry::RegisterEntry;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Unchecked read/write capability for a single register.
///
/// Writes skip the access-mode check and mask the value to the register
/// width, so the entry's range invariant holds on this path too. Intended
/// for the owning peripheral only — external callers go through the
/// checked [`crate::RegisterMap`] API.
#[derive(Clone)]
pub struct RegisterHandle {
    entry: Rc<RefCell<RegisterEntry>>,
}

impl RegisterHandle {
    pub(crate) fn new(entry: Rc<RefCell<RegisterEntry>>) -> Self {
        Self { entry }
    }

    /// Post a value, masked to the register width, ignoring access mode.
    pub fn post(&self, value: u64) {
        self.entry.borrow_mut().force_write(value);
    }

    /// Read the stored value, ignoring access mode.
    pub fn read(&self) -> u64 {
        self.entry.borrow().force_read()
    }

    /// Name of the register this handle points at.
    pub fn register_name(&self) -> String {
        self.entry.borrow().name().to_string()
    }
}

impl fmt::Debug for RegisterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterHandle")
            .field("register", &self.entry.borrow().name())
            .finish()
    }
}

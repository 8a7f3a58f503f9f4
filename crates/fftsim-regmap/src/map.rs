//! The register map: ordered entries, checked access, synchronous dispatch
//!
//! One map serves one peripheral class — the type parameter is that class.
//! Bindings are resolved once, at bind time: [`Peripheral::resolve`] turns a
//! register name into a port tag, and every later write dispatches through
//! the stored tag instead of re-inspecting the peripheral.

use crate::entry::RegisterEntry;
use crate::error::{PeripheralError, RegMapError, Result};
use crate::handle::RegisterHandle;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A component bound to one or more registers that reacts to writes.
///
/// `Port` is the peripheral's own tag for "which register handler" — an
/// enum in practice. The map never stores handler closures; it stores the
/// resolved tag and calls [`Peripheral::handle`] with it.
pub trait Peripheral {
    /// Handler tag resolved at bind time.
    type Port: Copy + fmt::Debug;

    /// Map a register name to a handler tag, or `None` for fallback-only
    /// dispatch. Called once per [`RegisterMap::bind`].
    fn resolve(&self, register: &str) -> Option<Self::Port>;

    /// React to a write on a register with a resolved port. Runs to
    /// completion before the originating `write` call returns.
    ///
    /// # Errors
    ///
    /// Returns the peripheral's own error; the map wraps it as
    /// [`RegMapError::Dispatch`].
    fn handle(&mut self, port: Self::Port, value: u64) -> std::result::Result<(), PeripheralError>;

    /// Diagnostic fallback for writes to bound registers with no resolved
    /// port. Must not carry real register semantics: the default logs a
    /// warning and fails the write.
    ///
    /// # Errors
    ///
    /// The default implementation always returns `UnhandledRegister`.
    fn fallback(
        &mut self,
        register: &str,
        value: u64,
    ) -> std::result::Result<(), PeripheralError> {
        tracing::warn!(register, value, "write dispatched to diagnostic fallback");
        Err(RegMapError::UnhandledRegister {
            register: register.to_string(),
        }
        .into())
    }
}

struct Binding<P: Peripheral> {
    peripheral: Rc<RefCell<P>>,
    port: Option<P::Port>,
}

/// Ordered collection of registers with checked access and dispatch.
///
/// Entries are all constructed at map creation and live as long as the map.
/// Maps are plain owned values — construct one per peripheral instance and
/// pass it to whoever drives the bus; there is no global map.
pub struct RegisterMap<P: Peripheral> {
    order: Vec<String>,
    entries: HashMap<String, Rc<RefCell<RegisterEntry>>>,
    bindings: HashMap<String, Binding<P>>,
}

impl<P: Peripheral> RegisterMap<P> {
    /// Build a map from its full register set.
    ///
    /// # Errors
    ///
    /// `DuplicateRegister` if two entries share a name.
    pub fn new(entries: impl IntoIterator<Item = RegisterEntry>) -> Result<Self> {
        let mut map = Self {
            order: Vec::new(),
            entries: HashMap::new(),
            bindings: HashMap::new(),
        };
        for entry in entries {
            let name = entry.name().to_string();
            if map.entries.contains_key(&name) {
                return Err(RegMapError::DuplicateRegister { name });
            }
            map.order.push(name.clone());
            map.entries.insert(name, Rc::new(RefCell::new(entry)));
        }
        Ok(map)
    }

    /// Checked read.
    ///
    /// # Errors
    ///
    /// `UnknownRegister` if absent, `AccessDenied` if write-only.
    pub fn read(&self, name: &str) -> Result<u64> {
        let entry = self.entries.get(name).ok_or_else(|| RegMapError::unknown(name))?;
        entry.borrow().read()
    }

    /// Checked write with synchronous dispatch.
    ///
    /// The value is stored first, then — if the register has a bound
    /// peripheral — the resolved handler (or the diagnostic fallback) runs
    /// before this call returns. All side effects of the handler are
    /// visible to the caller immediately afterwards.
    ///
    /// # Errors
    ///
    /// `UnknownRegister`, `AccessDenied`, `OutOfRange`, or `Dispatch`
    /// wrapping the peripheral's error.
    pub fn write(&mut self, name: &str, value: u64) -> Result<()> {
        let entry = self.entries.get(name).ok_or_else(|| RegMapError::unknown(name))?;
        entry.borrow_mut().write(value)?;

        if let Some(binding) = self.bindings.get(name) {
            tracing::debug!(register = name, value, port = ?binding.port, "dispatching write");
            let outcome = match binding.port {
                Some(port) => binding.peripheral.borrow_mut().handle(port, value),
                None => binding.peripheral.borrow_mut().fallback(name, value),
            };
            outcome.map_err(|source| RegMapError::Dispatch {
                register: name.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Bind a peripheral to a register and grant the bypass handle for it.
    ///
    /// The peripheral's port for this register is resolved here, once;
    /// binding again replaces the previous binding (last bind wins).
    ///
    /// # Errors
    ///
    /// `UnknownRegister` if the register is absent.
    pub fn bind(&mut self, name: &str, peripheral: &Rc<RefCell<P>>) -> Result<RegisterHandle> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegMapError::unknown(name))?
            .clone();
        let port = peripheral.borrow().resolve(name);
        if port.is_none() {
            tracing::debug!(register = name, "bound with fallback dispatch only");
        }
        self.bindings.insert(
            name.to_string(),
            Binding {
                peripheral: Rc::clone(peripheral),
                port,
            },
        );
        Ok(RegisterHandle::new(entry))
    }

    /// True if the map contains a register with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate entries in insertion order (for register dumps).
    pub fn entries(&self) -> impl Iterator<Item = Ref<'_, RegisterEntry>> {
        self.order.iter().map(|name| self.entries[name].borrow())
    }

    /// Number of registers in the map.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if the map holds no registers.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<P: Peripheral> fmt::Debug for RegisterMap<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterMap")
            .field("registers", &self.order)
            .field("bound", &self.bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Access;

    /// Minimal peripheral: one handled register, everything else falls back.
    #[derive(Debug, Default)]
    struct Recorder {
        handled: Vec<u64>,
    }

    #[derive(Debug, Clone, Copy)]
    enum RecorderPort {
        Trigger,
    }

    impl Peripheral for Recorder {
        type Port = RecorderPort;

        fn resolve(&self, register: &str) -> Option<RecorderPort> {
            (register == "TRIGGER").then_some(RecorderPort::Trigger)
        }

        fn handle(&mut self, _port: RecorderPort, value: u64) -> std::result::Result<(), PeripheralError> {
            self.handled.push(value);
            Ok(())
        }
    }

    fn test_map() -> RegisterMap<Recorder> {
        RegisterMap::new([
            RegisterEntry::new("TRIGGER", 0x00, 1, Access::ReadWrite),
            RegisterEntry::new("RESULT", 0x01, 1, Access::ReadOnly),
            RegisterEntry::new("DATA", 0x02, 4, Access::ReadWrite),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_names_rejected_at_construction() {
        let err = RegisterMap::<Recorder>::new([
            RegisterEntry::new("TRIGGER", 0x00, 1, Access::ReadWrite),
            RegisterEntry::new("TRIGGER", 0x04, 1, Access::ReadWrite),
        ])
        .unwrap_err();
        assert!(matches!(err, RegMapError::DuplicateRegister { .. }));
    }

    #[test]
    fn unknown_register_fails_read_and_write() {
        let mut map = test_map();
        assert!(matches!(map.read("NOPE"), Err(RegMapError::UnknownRegister { .. })));
        assert!(matches!(map.write("NOPE", 1), Err(RegMapError::UnknownRegister { .. })));
    }

    #[test]
    fn write_without_binding_just_stores() {
        let mut map = test_map();
        map.write("DATA", 0x1234).unwrap();
        assert_eq!(map.read("DATA").unwrap(), 0x1234);
    }

    #[test]
    fn bound_handler_runs_before_write_returns() {
        let mut map = test_map();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        map.bind("TRIGGER", &recorder).unwrap();

        map.write("TRIGGER", 1).unwrap();
        assert_eq!(recorder.borrow().handled, vec![1]);
        assert_eq!(map.read("TRIGGER").unwrap(), 1, "value stored before dispatch");
    }

    #[test]
    fn fallback_fails_the_write() {
        let mut map = test_map();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        map.bind("DATA", &recorder).unwrap();

        let err = map.write("DATA", 7).unwrap_err();
        assert!(matches!(err, RegMapError::Dispatch { .. }));
        assert!(recorder.borrow().handled.is_empty());
    }

    #[test]
    fn read_only_register_denies_external_write_but_not_handle() {
        let mut map = test_map();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let handle = map.bind("RESULT", &recorder).unwrap();

        let err = map.write("RESULT", 1).unwrap_err();
        assert!(matches!(err, RegMapError::AccessDenied { .. }));

        handle.post(0x42);
        assert_eq!(map.read("RESULT").unwrap(), 0x42);
    }

    #[test]
    fn handle_masks_posted_value_to_width() {
        let mut map = test_map();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let handle = map.bind("RESULT", &recorder).unwrap();

        handle.post(0xABC);
        assert_eq!(map.read("RESULT").unwrap(), 0xBC);
    }

    #[test]
    fn last_bind_wins() {
        let mut map = test_map();
        let first = Rc::new(RefCell::new(Recorder::default()));
        let second = Rc::new(RefCell::new(Recorder::default()));
        map.bind("TRIGGER", &first).unwrap();
        map.bind("TRIGGER", &second).unwrap();

        map.write("TRIGGER", 9).unwrap();
        assert!(first.borrow().handled.is_empty());
        assert_eq!(second.borrow().handled, vec![9]);
    }

    #[test]
    fn entries_iterate_in_insertion_order() {
        let map = test_map();
        let names: Vec<String> = map.entries().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["TRIGGER", "RESULT", "DATA"]);
    }

    #[test]
    fn out_of_range_write_does_not_dispatch() {
        let mut map = test_map();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        map.bind("TRIGGER", &recorder).unwrap();

        let err = map.write("TRIGGER", 0x100).unwrap_err();
        assert!(matches!(err, RegMapError::OutOfRange { .. }));
        assert!(recorder.borrow().handled.is_empty());
    }
}

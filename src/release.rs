//! Release capability for values owned by a table.
//!
//! A table takes ownership of every inserted value and hands it to its
//! `Destructor` exactly once: on `remove`, on overwrite by `insert`, on
//! `clear`, and on teardown. `take` is the only path that returns the
//! value to the caller instead.

/// Consumes a value the table no longer stores.
///
/// Implementations must not call back into the table that owns them.
pub trait Destructor<V> {
    fn destroy(&mut self, value: V);
}

impl<V, F> Destructor<V> for F
where
    F: FnMut(V),
{
    #[inline]
    fn destroy(&mut self, value: V) {
        self(value)
    }
}

/// Default destructor: the value's own `Drop` is all the cleanup it gets.
#[derive(Copy, Clone, Debug, Default)]
pub struct DropValue;

impl<V> Destructor<V> for DropValue {
    #[inline]
    fn destroy(&mut self, value: V) {
        drop(value);
    }
}

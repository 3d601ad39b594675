//! Derived-state caching keyed on input identity.
//!
//! Derived views (mapped columns, sorted row order, filtered options, keyed
//! selection) are recomputed once per change of their inputs and reused
//! until an input changes again. Shared inputs are compared by pointer, not
//! by content.

use std::fmt;
use std::rc::Rc;

/// Pointer identity of a shared input.
///
/// Holds a strong reference so the address cannot be reused by a different
/// allocation while the cache entry is alive.
pub struct Identity<T: ?Sized>(Rc<T>);

impl<T: ?Sized> Identity<T> {
    pub fn of(input: &Rc<T>) -> Self {
        Self(Rc::clone(input))
    }
}

impl<T: ?Sized> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Identity<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:p})", Rc::as_ptr(&self.0))
    }
}

/// A single-slot cache: `(inputs, view)`.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view for `key`, deriving it first if `key` differs
    /// from the cached inputs. The flag is true when `derive` ran.
    pub fn get_or_derive<F>(&mut self, key: K, derive: F) -> (&V, bool)
    where
        F: FnOnce(&K) -> V,
    {
        let (entry, fresh) = match self.slot.take() {
            Some((cached, view)) if cached == key => ((cached, view), false),
            _ => {
                let view = derive(&key);
                ((key, view), true)
            }
        };
        let (_, view) = self.slot.insert(entry);
        (view, fresh)
    }

    /// The cached view, whatever inputs it was derived from.
    pub fn get(&self) -> Option<&V> {
        self.slot.as_ref().map(|(_, view)| view)
    }
}

#![forbid(unsafe_code)]

//! Callback registration with unsubscribe-on-drop.
//!
//! [`Subscribers<E>`] keeps weak references to callbacks; [`subscribe`]
//! hands back a [`Subscription`] guard owning the strong reference.
//! Dropping the guard unsubscribes. Dead entries are pruned lazily on the
//! next [`notify`].
//!
//! Delivery order between subscribers is not part of the contract.
//!
//! [`subscribe`]: Subscribers::subscribe
//! [`notify`]: Subscribers::notify

use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc<E> = Rc<dyn Fn(&E)>;
type CallbackWeak<E> = Weak<dyn Fn(&E)>;

/// A list of event callbacks.
pub struct Subscribers<E> {
    callbacks: Vec<CallbackWeak<E>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

impl<E: 'static> Subscribers<E> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback`. It stays registered while the returned guard
    /// lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&mut self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: CallbackRc<E> = Rc::new(callback);
        self.callbacks.push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Invoke every live callback with `event`.
    pub fn notify(&mut self, event: &E) {
        self.callbacks.retain(|w| w.strong_count() > 0);
        let live: Vec<CallbackRc<E>> = self.callbacks.iter().filter_map(Weak::upgrade).collect();
        for callback in live {
            callback(event);
        }
    }

    /// Number of registered callbacks, including dead ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Forget every callback. Existing guards become inert.
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

/// RAII guard for a registered callback.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

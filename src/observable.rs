//! Publish/subscribe used to tell an outside observer (typically a renderer) that an
//! entity changed.
//!
//! An [Observable] either fans out every [notify](Observable::notify) immediately, or,
//! in bulk mode, only remembers that a notification is pending until
//! [release_bulk](Observable::release_bulk) is called.
use core::fmt;

/// Handle returned by [Observable::add_listener], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

pub struct Observable<T: ?Sized> {
    listeners: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
    next_id: usize,
    bulk: bool,
    pending: bool,
}

impl<T: ?Sized> Default for Observable<T> {
    fn default() -> Observable<T> {
        Observable::new()
    }
}

impl<T: ?Sized> Observable<T> {
    /// An observable that notifies on every call to [notify](Self::notify).
    pub fn new() -> Observable<T> {
        Observable {
            listeners: Vec::new(),
            next_id: 0,
            bulk: false,
            pending: false,
        }
    }

    /// An observable that defers notifications until [release_bulk](Self::release_bulk).
    pub fn bulk() -> Observable<T> {
        Observable {
            bulk: true,
            ..Observable::new()
        }
    }

    pub fn is_bulk(&self) -> bool {
        self.bulk
    }

    /// Whether a deferred notification is waiting for [release_bulk](Self::release_bulk).
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Listeners are invoked in the order they were added.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns [false] if the listener was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(l, _)| *l == id) {
            Some(ix) => {
                self.listeners.remove(ix);
                true
            }
            None => false,
        }
    }

    pub fn notify(&mut self, entity: &T) {
        if self.bulk {
            self.pending = true;
        } else {
            self.send(entity);
        }
    }

    /// Fires a single notification if any were deferred since the last release.
    pub fn release_bulk(&mut self, entity: &T) {
        if self.pending {
            self.pending = false;
            self.send(entity);
        }
    }

    fn send(&mut self, entity: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(entity);
        }
    }
}

impl<T: ?Sized> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Observable")
            .field("listeners", &self.listeners.len())
            .field("bulk", &self.bulk)
            .field("pending", &self.pending)
            .finish()
    }
}

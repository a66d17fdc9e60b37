use super::types::{AuthChangeEvent, Session};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(AuthChangeEvent, Option<Session>)>;
type Listeners = RefCell<Vec<(u64, Listener)>>;

/// Fan-out of auth state changes to every subscriber of the client.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    listeners: Rc<Listeners>,
    next_id: Rc<Cell<u64>>,
}

impl AuthEventBus {
    pub fn subscribe(&self, listener: impl Fn(AuthChangeEvent, Option<Session>) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        // Listeners may subscribe or unsubscribe while being notified.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        log::debug!("auth event {:?} -> {} listener(s)", event, snapshot.len());
        for listener in snapshot {
            listener(event, session.cloned());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Removes its listener when dropped.
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

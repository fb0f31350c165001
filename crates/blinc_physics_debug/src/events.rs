//! Init/update notifications for tracked shapes

use crate::scene::NodeId;
use crate::shape::Shape;
use crate::world::Body;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned when registering a listener
    pub struct ListenerId;
}

/// Which notification a listener is receiving
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeEventKind {
    /// A renderable was created for this index during the update
    Init,
    /// An existing renderable was reused
    Update,
}

/// Payload handed to listeners, borrowed for the duration of the call
#[derive(Clone, Copy, Debug)]
pub struct ShapeEvent<'a> {
    pub kind: ShapeEventKind,
    pub body: &'a Body,
    pub renderable: NodeId,
    pub shape: &'a Shape,
    /// Flattened (body, shape) index
    pub index: usize,
}

type Callback = Box<dyn FnMut(&ShapeEvent<'_>)>;

struct Listener {
    kind: ShapeEventKind,
    callback: Callback,
}

/// Listener registry for the two event kinds
#[derive(Default)]
pub struct Listeners {
    entries: SlotMap<ListenerId, Listener>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one event kind
    pub fn add(&mut self, kind: ShapeEventKind, callback: impl FnMut(&ShapeEvent<'_>) + 'static) -> ListenerId {
        self.entries.insert(Listener {
            kind,
            callback: Box::new(callback),
        })
    }

    /// Unregister a listener; returns false if it was already gone
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Invoke every listener registered for `event.kind`, in registration order
    pub fn emit(&mut self, event: &ShapeEvent<'_>) {
        for listener in self.entries.values_mut() {
            if listener.kind == event.kind {
                (listener.callback)(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.entries.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_by_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();

        let log = Rc::clone(&seen);
        let init = listeners.add(ShapeEventKind::Init, move |event| log.borrow_mut().push((event.kind, event.index)));
        let log = Rc::clone(&seen);
        listeners.add(ShapeEventKind::Update, move |event| log.borrow_mut().push((event.kind, event.index)));

        let body = Body::new();
        let shape = Shape::sphere(1.0);
        let event = |kind, index| ShapeEvent {
            kind,
            body: &body,
            renderable: NodeId::default(),
            shape: &shape,
            index,
        };

        listeners.emit(&event(ShapeEventKind::Init, 0));
        listeners.emit(&event(ShapeEventKind::Update, 1));
        assert!(listeners.remove(init));
        assert!(!listeners.remove(init));
        listeners.emit(&event(ShapeEventKind::Init, 2));

        assert_eq!(
            *seen.borrow(),
            vec![(ShapeEventKind::Init, 0), (ShapeEventKind::Update, 1)]
        );
    }
}

//! Domain events raised by the translation workflow.
//!
//! Subscribers register callbacks on an [`EventBus`]; each event kind has a
//! fixed payload type.

/// A locale's catalog was created or updated from the master catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUpdated {
    pub locale: String,
}

type Handler<E> = Box<dyn Fn(&E)>;

/// Synchronous callback registry for one event type.
pub struct EventBus<E> {
    handlers: Vec<Handler<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl Fn(&E) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Call every handler in subscription order.
    pub fn emit(&self, event: &E) {
        for handler in &self.handlers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn test_emit_reaches_all_subscribers_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = Rc::clone(&seen);
        bus.subscribe(move |e: &TranslationUpdated| {
            first.borrow_mut().push(format!("a:{}", e.locale))
        });
        let second = Rc::clone(&seen);
        bus.subscribe(move |e: &TranslationUpdated| {
            second.borrow_mut().push(format!("b:{}", e.locale))
        });

        bus.emit(&TranslationUpdated {
            locale: "fr".to_string(),
        });

        assert_eq!(bus.len(), 2);
        assert_eq!(*seen.borrow(), vec!["a:fr", "b:fr"]);
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus: EventBus<TranslationUpdated> = EventBus::new();
        assert!(bus.is_empty());
        bus.emit(&TranslationUpdated {
            locale: "de".to_string(),
        });
    }
}

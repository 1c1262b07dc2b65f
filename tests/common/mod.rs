//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_flow_editor::{NodeId, PointerHost};
use std::cell::RefCell;
use std::rc::Rc;

/// Records listener registrations made by drag sessions.
///
/// Each entry is `(node_id, attached)`; `attached` is false for a release.
#[derive(Default, Clone)]
pub struct ListenerTracker {
    pub events: Rc<RefCell<Vec<(String, bool)>>>,
}

impl ListenerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations not yet released.
    pub fn active(&self) -> usize {
        let events = self.events.borrow();
        let attached = events.iter().filter(|(_, attached)| *attached).count();
        attached - (events.len() - attached)
    }

    pub fn attach_count(&self) -> usize {
        self.events.borrow().iter().filter(|(_, attached)| *attached).count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl PointerHost for ListenerTracker {
    fn attach(&self, owner: &NodeId) {
        self.events.borrow_mut().push((owner.to_string(), true));
    }

    fn detach(&self, owner: &NodeId) {
        self.events.borrow_mut().push((owner.to_string(), false));
    }
}

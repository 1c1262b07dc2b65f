//! Row synchronization from a rendered [`Scene`] into Slint models.
//!
//! Each bound model gets a constructor that turns one scene item into the
//! application's row struct (generated by Slint). [`SceneModels::sync`] then
//! updates rows in place, pushes new ones and truncates the tail, so a
//! `VecModel` bound once stays current across every refresh.
//!
//! ```ignore
//! let nodes = Rc::new(VecModel::<NodeRow>::default());
//! models.bind_nodes(nodes.clone(), |view| NodeRow {
//!     id: view.id.as_str().into(),
//!     x: view.x,
//!     y: view.y,
//!     ..Default::default()
//! });
//! window.set_nodes(ModelRc::from(nodes));
//! ```

use crate::catalog::Archetype;
use crate::compositor::{Connector, NodeView, Scene};
use slint::{Model, VecModel};
use std::rc::Rc;

trait ModelSyncer<T: ?Sized> {
    fn sync(&self, items: &[&T]);
}

struct ConcreteModelSyncer<R, F> {
    model: Rc<VecModel<R>>,
    constructor: F,
}

impl<T, R, F> ModelSyncer<T> for ConcreteModelSyncer<R, F>
where
    T: ?Sized,
    R: Clone + 'static,
    F: Fn(&T) -> R,
{
    fn sync(&self, items: &[&T]) {
        for (i, &item) in items.iter().enumerate() {
            let row = (self.constructor)(item);
            if i < self.model.row_count() {
                self.model.set_row_data(i, row);
            } else {
                self.model.push(row);
            }
        }
        while self.model.row_count() > items.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

fn boxed<T, R, F>(model: Rc<VecModel<R>>, constructor: F) -> Box<dyn ModelSyncer<T>>
where
    T: ?Sized + 'static,
    R: Clone + 'static,
    F: Fn(&T) -> R + 'static,
{
    Box::new(ConcreteModelSyncer { model, constructor })
}

/// Optional Slint models kept in step with the editor.
///
/// The pending cable is synced as a connector model holding zero or one row.
#[derive(Default)]
pub struct SceneModels {
    nodes: Option<Box<dyn ModelSyncer<NodeView>>>,
    connectors: Option<Box<dyn ModelSyncer<Connector>>>,
    pending_cable: Option<Box<dyn ModelSyncer<Connector>>>,
    catalog: Option<Box<dyn ModelSyncer<Archetype>>>,
}

impl SceneModels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_nodes<R, F>(&mut self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&NodeView) -> R + 'static,
    {
        self.nodes = Some(boxed(model, constructor));
    }

    pub fn bind_connectors<R, F>(&mut self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&Connector) -> R + 'static,
    {
        self.connectors = Some(boxed(model, constructor));
    }

    pub fn bind_pending_cable<R, F>(&mut self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&Connector) -> R + 'static,
    {
        self.pending_cable = Some(boxed(model, constructor));
    }

    pub fn bind_catalog<R, F>(&mut self, model: Rc<VecModel<R>>, constructor: F)
    where
        R: Clone + 'static,
        F: Fn(&Archetype) -> R + 'static,
    {
        self.catalog = Some(boxed(model, constructor));
    }

    /// Push a freshly rendered scene into every bound model.
    pub fn sync(&self, scene: &Scene) {
        if let Some(syncer) = &self.nodes {
            let items: Vec<&NodeView> = scene.nodes.iter().collect();
            syncer.sync(&items);
        }
        if let Some(syncer) = &self.connectors {
            let items: Vec<&Connector> = scene.connectors.iter().collect();
            syncer.sync(&items);
        }
        if let Some(syncer) = &self.pending_cable {
            let items: Vec<&Connector> = scene.pending_cable.iter().collect();
            syncer.sync(&items);
        }
    }

    /// Replace the sidebar rows with a search result.
    pub fn sync_catalog(&self, entries: &[&Archetype]) {
        if let Some(syncer) = &self.catalog {
            syncer.sync(entries);
        }
    }
}

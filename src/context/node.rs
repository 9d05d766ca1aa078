use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::attributes::{AttrValue, Attributes};

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Child context '{name}' already exists under '{parent}'")]
    ChildExists { parent: String, name: String },
}

/// A named, independently selectable node in a context tree.
///
/// A parent owns its children through its child map; children point back
/// through a `Weak` link fixed at creation. The node mutex guards only the
/// node's own mutable fields.
#[derive(Debug)]
pub struct ContextNode {
    name: String,
    parent: Option<Weak<ContextNode>>,
    inner: Mutex<NodeInner>,
}

#[derive(Debug)]
struct NodeInner {
    selected: bool,
    children: BTreeMap<String, Arc<ContextNode>>,
    attrs: Attributes,
}

impl ContextNode {
    fn new(name: String, parent: Option<Weak<ContextNode>>) -> Self {
        Self {
            name,
            parent,
            inner: Mutex::new(NodeInner {
                selected: true,
                children: BTreeMap::new(),
                attrs: Attributes::new(),
            }),
        }
    }

    pub fn new_root(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(name.into(), None))
    }

    /// Attach a new selected child.
    ///
    /// Fails if `name` is already a child of this node; the existing child
    /// is left as it was.
    pub fn make_child(self: &Arc<Self>, name: impl Into<String>) -> Result<Arc<Self>, ContextError> {
        let name = name.into();
        let mut inner = self.inner.lock();
        if inner.children.contains_key(&name) {
            warn!(parent = %self.name, child = %name, "duplicate child context");
            return Err(ContextError::ChildExists {
                parent: self.name.clone(),
                name,
            });
        }

        let child = Arc::new(Self::new(name.clone(), Some(Arc::downgrade(self))));
        inner.children.insert(name, Arc::clone(&child));
        debug!(parent = %self.name, child = %child.name, "child context created");
        Ok(child)
    }

    pub fn child(&self, name: &str) -> Option<Arc<Self>> {
        self.inner.lock().children.get(name).cloned()
    }

    /// Child names in sorted order.
    pub fn children(&self) -> Vec<String> {
        self.inner.lock().children.keys().cloned().collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Set this node's own flag. Ancestors and descendants are untouched.
    pub fn select(&self, selected: bool) {
        self.inner.lock().selected = selected;
    }

    pub fn is_self_selected(&self) -> bool {
        self.inner.lock().selected
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.inner.lock().attrs.insert(name, value);
    }

    pub fn replace_attr(&self, name: impl Into<String>, value: Option<AttrValue>) {
        self.inner.lock().attrs.replace(name, value);
    }

    pub fn unset_attr(&self, name: &str) {
        self.inner.lock().attrs.remove(name);
    }

    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        self.inner.lock().attrs.get(name).cloned()
    }

    /// Nodes from `self` up to the furthest reachable ancestor.
    pub fn path(self: &Arc<Self>) -> Vec<Arc<Self>> {
        let mut out = Vec::with_capacity(3);
        let mut cur = Some(Arc::clone(self));
        while let Some(node) = cur {
            cur = node.parent();
            out.push(node);
        }
        out
    }

    pub fn name_path(self: &Arc<Self>) -> Vec<String> {
        self.path().iter().map(|n| n.name.clone()).collect()
    }

    /// True iff this node and every ancestor up to the root is selected.
    ///
    /// A node whose ancestor chain no longer reaches a root (an ancestor
    /// was dropped) is detached and never active.
    pub fn is_active(self: &Arc<Self>) -> bool {
        let path = self.path();
        let reaches_root = path.last().is_some_and(|n| n.is_root());
        reaches_root && path.iter().all(|n| n.is_self_selected())
    }
}

use parking_lot::Mutex;

use crate::attributes::{AttrValue, Attributes};
use crate::types::Literal;

/// A literal promoted to its own lock-protected object.
///
/// The registry hands these out behind `Arc`; the mutex guards only this
/// literal's flag and attributes. The flag is read-only through a handle:
/// selection changes go through [`crate::registry::Registry`] so they stay
/// serialized with its multi-literal checks.
#[derive(Debug)]
pub struct LiteralState {
    literal: Literal,
    inner: Mutex<LiteralInner>,
}

#[derive(Debug)]
struct LiteralInner {
    selected: bool,
    attrs: Attributes,
}

impl LiteralState {
    pub(crate) fn new(literal: Literal, selected: bool) -> Self {
        Self {
            literal,
            inner: Mutex::new(LiteralInner {
                selected,
                attrs: Attributes::new(),
            }),
        }
    }

    pub fn literal(&self) -> &Literal {
        &self.literal
    }

    // Only called with the registry's table lock held
    pub(crate) fn select(&self, selected: bool) {
        self.inner.lock().selected = selected;
    }

    pub fn is_selected(&self) -> bool {
        self.inner.lock().selected
    }

    pub fn set_attr(&self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.inner.lock().attrs.insert(name, value);
    }

    pub fn unset_attr(&self, name: &str) {
        self.inner.lock().attrs.remove(name);
    }

    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        self.inner.lock().attrs.get(name).cloned()
    }
}

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::registry::Registry;
use crate::types::identifiers::{Literal, TermDigest, TermKey};

/// A conjunction of literals.
///
/// The sequence is kept as given for display and indexing, but a term is
/// semantically a set: selection and attribute lookups go through
/// [`TermKey`], which ignores order and duplicates. Equality and hashing
/// compare keys too, so `[a, b]`, `[b, a]` and `[a, b, a]` are one term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term {
    literals: Vec<Literal>,
}

impl Term {
    pub fn new<I, L>(literals: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Self {
            literals: literals.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Literal> {
        self.literals.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.literals.iter()
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn strings(&self) -> Vec<String> {
        self.literals.iter().map(|l| l.as_str().to_string()).collect()
    }

    pub fn key(&self) -> TermKey {
        TermKey::from_literals(&self.literals)
    }

    pub fn digest(&self) -> TermDigest {
        self.key().digest()
    }

    /// True iff every literal of the term is selected in `registry`.
    pub fn is_selected(&self, registry: &Registry) -> bool {
        registry.is_selected(&self.literals)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<L: Into<Literal>> FromIterator<L> for Term {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Term::new(iter)
    }
}

impl<'a> IntoIterator for &'a Term {
    type Item = &'a Literal;
    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

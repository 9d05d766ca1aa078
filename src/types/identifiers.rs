use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An atomic named condition. Literals are interned implicitly by being
/// used as map keys; there is no registration step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Literal(String);

impl Literal {
    pub fn new(name: impl Into<String>) -> Self {
        Literal(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal(s)
    }
}

impl From<&Literal> for Literal {
    fn from(l: &Literal) -> Self {
        l.clone()
    }
}

impl AsRef<str> for Literal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Literal {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Canonical identity of a term: its literals sorted and de-duplicated.
///
/// Order and repetition never change which bucket a term maps to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermKey(Vec<Literal>);

impl TermKey {
    pub fn from_literals<'a>(literals: impl IntoIterator<Item = &'a Literal>) -> Self {
        let mut sorted: Vec<Literal> = literals.into_iter().cloned().collect();
        sorted.sort();
        sorted.dedup();
        TermKey(sorted)
    }

    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    /// Hash the canonical literal list.
    ///
    /// Each literal is length-prefixed so `["ab", "c"]` and `["a", "bc"]`
    /// never feed the same byte stream to the hasher.
    pub fn digest(&self) -> TermDigest {
        let mut hasher = Sha256::new();
        hasher.update((self.0.len() as u64).to_le_bytes());
        for literal in &self.0 {
            let bytes = literal.as_str().as_bytes();
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        let hash = hasher.finalize();
        TermDigest(format!("sha256:{}", hex::encode(hash)))
    }
}

/// Bucket key of a term in the attribute store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermDigest(String);

impl TermDigest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

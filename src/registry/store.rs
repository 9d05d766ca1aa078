use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{error, trace};

use crate::attributes::{AttrValue, Attributes};
use crate::types::{TermDigest, TermKey};

#[derive(Debug, Error)]
pub enum AttrError {
    #[error("Term digest collision on {digest}: bucket holds {stored:?}, lookup was for {requested:?}")]
    DigestCollision {
        digest: TermDigest,
        stored: TermKey,
        requested: TermKey,
    },
}

/// Attribute set of one term, tagged with the key it was created for.
#[derive(Debug)]
struct Bucket {
    key: TermKey,
    attrs: Mutex<Attributes>,
}

impl Bucket {
    fn new(key: TermKey) -> Self {
        Self {
            key,
            attrs: Mutex::new(Attributes::new()),
        }
    }
}

/// Per-term attribute buckets keyed by [`TermDigest`].
///
/// The outer lock covers bucket lookup, creation and deletion; each bucket
/// carries its own lock for the attribute map. Locks are always taken
/// outer first. Buckets never stay empty: removing the last attribute
/// drops the bucket.
#[derive(Debug, Default)]
pub(crate) struct AttributeStore {
    buckets: Mutex<HashMap<TermDigest, Arc<Bucket>>>,
}

/// Read-only view of one bucket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BucketSummary {
    pub digest: TermDigest,
    pub literals: TermKey,
    pub attribute_count: usize,
}

fn verify(digest: &TermDigest, bucket: &Bucket, requested: &TermKey) -> Result<(), AttrError> {
    if bucket.key != *requested {
        error!(
            digest = %digest,
            stored = ?bucket.key,
            requested = ?requested,
            "term digest collision"
        );
        return Err(AttrError::DigestCollision {
            digest: digest.clone(),
            stored: bucket.key.clone(),
            requested: requested.clone(),
        });
    }
    Ok(())
}

impl AttributeStore {
    pub(crate) fn set(&self, key: &TermKey, name: String, value: AttrValue) -> Result<(), AttrError> {
        let digest = key.digest();
        let mut buckets = self.buckets.lock();

        let bucket = buckets.entry(digest.clone()).or_insert_with(|| {
            trace!(digest = %digest, "attribute bucket created");
            Arc::new(Bucket::new(key.clone()))
        });
        verify(&digest, bucket, key)?;

        bucket.attrs.lock().insert(name, value);
        Ok(())
    }

    pub(crate) fn unset(&self, key: &TermKey, name: &str) -> Result<(), AttrError> {
        let digest = key.digest();
        let mut buckets = self.buckets.lock();

        let Some(bucket) = buckets.get(&digest) else {
            return Ok(());
        };
        verify(&digest, bucket, key)?;

        let now_empty = {
            let mut attrs = bucket.attrs.lock();
            attrs.remove(name);
            attrs.is_empty()
        };
        if now_empty {
            buckets.remove(&digest);
            trace!(digest = %digest, "attribute bucket removed");
        }
        Ok(())
    }

    pub(crate) fn get(&self, key: &TermKey, name: &str) -> Result<Option<AttrValue>, AttrError> {
        let digest = key.digest();
        let bucket = {
            let buckets = self.buckets.lock();
            match buckets.get(&digest) {
                Some(bucket) => Arc::clone(bucket),
                None => return Ok(None),
            }
        };
        verify(&digest, &bucket, key)?;

        let value = bucket.attrs.lock().get(name).cloned();
        Ok(value)
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.lock().len()
    }

    pub(crate) fn summaries(&self) -> Vec<BucketSummary> {
        let buckets = self.buckets.lock();
        let mut out: Vec<BucketSummary> = buckets
            .iter()
            .map(|(digest, bucket)| BucketSummary {
                digest: digest.clone(),
                literals: bucket.key.clone(),
                attribute_count: bucket.attrs.lock().len(),
            })
            .collect();
        out.sort_by(|a, b| a.digest.cmp(&b.digest));
        out
    }

    #[cfg(test)]
    fn plant(&self, digest: TermDigest, key: TermKey, name: &str, value: AttrValue) {
        let bucket = Bucket::new(key);
        bucket.attrs.lock().insert(name, value);
        self.buckets.lock().insert(digest, Arc::new(bucket));
    }
}

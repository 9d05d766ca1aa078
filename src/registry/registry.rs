use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::attributes::AttrValue;
use crate::registry::config::{ConfigError, DefaultSelection, RegistryConfig};
use crate::registry::literal::LiteralState;
use crate::registry::snapshot::RegistrySnapshot;
use crate::registry::store::{AttrError, AttributeStore};
use crate::types::{Literal, Term};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Literal selection state and term attributes.
///
/// Each literal lives in its own [`LiteralState`], created lazily on first
/// write. The literal table lock is held for the whole of every
/// multi-literal call, so a concurrent `select` never lands between two
/// literals of one `is_selected` check. Lock order is table then literal;
/// the attribute store is never locked while the table is held.
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    enabled: AtomicBool,
    literals: Mutex<HashMap<Literal, Arc<LiteralState>>>,
    attributes: AttributeStore,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::build(RegistryConfig::v0())
    }

    pub fn with_config(config: RegistryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RegistryConfig) -> Self {
        Self {
            config,
            enabled: AtomicBool::new(true),
            literals: Mutex::new(HashMap::new()),
            attributes: AttributeStore::default(),
        }
    }

    /// The process-wide registry, created with [`RegistryConfig::v0`] on
    /// first use and alive until exit.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn default_selected(&self) -> bool {
        self.config.default_selection == DefaultSelection::Selected
    }

    fn fetch(
        table: &mut HashMap<Literal, Arc<LiteralState>>,
        name: &str,
        default_selected: bool,
    ) -> Arc<LiteralState> {
        if let Some(state) = table.get(name) {
            return Arc::clone(state);
        }
        let literal = Literal::new(name);
        let state = Arc::new(LiteralState::new(literal.clone(), default_selected));
        table.insert(literal, Arc::clone(&state));
        state
    }

    // Selection

    /// Mark every literal selected, registering unseen ones. Idempotent.
    pub fn select<I, L>(&self, literals: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let default_selected = self.default_selected();
        let mut table = self.literals.lock();
        for literal in literals {
            let name = literal.as_ref();
            Self::fetch(&mut table, name, default_selected).select(true);
            debug!(literal = name, "literal selected");
        }
    }

    /// Mark every literal not selected. Idempotent. An unseen literal is
    /// left unregistered under `DefaultSelection::Unselected`, and is
    /// registered with a `false` flag under `DefaultSelection::Selected`.
    pub fn unselect<I, L>(&self, literals: I)
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let default_selected = self.default_selected();
        let mut table = self.literals.lock();
        for literal in literals {
            let name = literal.as_ref();
            match table.get(name) {
                Some(state) => state.select(false),
                // Absent already reads as unselected
                None if !default_selected => continue,
                None => Self::fetch(&mut table, name, default_selected).select(false),
            }
            debug!(literal = name, "literal unselected");
        }
    }

    /// True iff every literal is selected. An empty list is vacuously
    /// selected, even while the registry is disabled.
    pub fn is_selected<I, L>(&self, literals: I) -> bool
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut literals = literals.into_iter().peekable();
        if literals.peek().is_none() {
            return true;
        }
        if !self.is_enabled() {
            return false;
        }

        let default_selected = self.default_selected();
        let table = self.literals.lock();
        literals.all(|literal| {
            table
                .get(literal.as_ref())
                .map_or(default_selected, |state| state.is_selected())
        })
    }

    pub fn is_term_selected(&self, term: &Term) -> bool {
        term.is_selected(self)
    }

    /// Literals currently holding a selected flag, sorted.
    ///
    /// Under `DefaultSelection::Selected`, literals never touched also read
    /// as selected but are not listed.
    pub fn selected_literals(&self) -> Vec<Literal> {
        let table = self.literals.lock();
        let mut out: Vec<Literal> = table
            .values()
            .filter(|state| state.is_selected())
            .map(|state| state.literal().clone())
            .collect();
        out.sort();
        out
    }

    pub fn literal(&self, name: &str) -> Option<Arc<LiteralState>> {
        self.literals.lock().get(name).cloned()
    }

    // Global switch

    /// While disabled every non-empty selection check reports `false`.
    /// Stored selection state is kept and returns on re-enable.
    pub fn set_enabled(&self, enabled: bool) {
        let was = self.enabled.swap(enabled, Ordering::SeqCst);
        if was && !enabled {
            warn!("literal registry disabled; all selection checks now fail");
        } else if !was && enabled {
            debug!("literal registry re-enabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    // Per-literal attributes

    pub fn set_literal_attr(&self, literal: &str, name: impl Into<String>, value: impl Into<AttrValue>) {
        let default_selected = self.default_selected();
        let state = Self::fetch(&mut self.literals.lock(), literal, default_selected);
        state.set_attr(name, value);
    }

    pub fn unset_literal_attr(&self, literal: &str, name: &str) {
        if let Some(state) = self.literal(literal) {
            state.unset_attr(name);
        }
    }

    pub fn literal_attr(&self, literal: &str, name: &str) -> Option<AttrValue> {
        self.literal(literal)?.attr(name)
    }

    // Per-term attributes

    pub fn set_attr(
        &self,
        term: &Term,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> Result<(), AttrError> {
        self.attributes.set(&term.key(), name.into(), value.into())
    }

    /// `None` removes the attribute, same as [`Registry::unset_attr`].
    pub fn replace_attr(
        &self,
        term: &Term,
        name: impl Into<String>,
        value: Option<AttrValue>,
    ) -> Result<(), AttrError> {
        let name = name.into();
        match value {
            Some(v) => self.attributes.set(&term.key(), name, v),
            None => self.attributes.unset(&term.key(), &name),
        }
    }

    pub fn unset_attr(&self, term: &Term, name: &str) -> Result<(), AttrError> {
        self.attributes.unset(&term.key(), name)
    }

    pub fn attr(&self, term: &Term, name: &str) -> Result<Option<AttrValue>, AttrError> {
        self.attributes.get(&term.key(), name)
    }

    /// Number of live attribute buckets.
    pub fn bucket_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            taken_at: Utc::now(),
            enabled: self.is_enabled(),
            default_selection: self.config.default_selection,
            selected: self.selected_literals(),
            buckets: self.attributes.summaries(),
        }
    }
}

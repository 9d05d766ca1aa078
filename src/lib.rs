//! Literal selection, term attributes and scoped context trees.
//!
//! `literal-select` answers "is this combination of conditions switched on"
//! for an in-process caller. Literals are selected or not; a [`types::Term`]
//! is selected when all its literals are. Terms, literals and context nodes
//! can carry named attributes. A [`context::ContextNode`] tree layers
//! scoped on/off switches: a node is active only when it and every ancestor
//! is selected.

pub mod attributes;
pub mod context;
pub mod registry;
pub mod types;

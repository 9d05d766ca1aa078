pub mod node;

pub use node::{ContextError, ContextNode};

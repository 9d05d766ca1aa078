pub mod identifiers;
pub mod term;

pub use identifiers::{Literal, TermDigest, TermKey};
pub use term::Term;

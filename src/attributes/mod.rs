pub mod value;

pub use value::{AttrValue, Attributes};

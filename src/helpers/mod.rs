//! Helper functions shared by the generator, the server and templates

mod date;
mod url;

pub use date::*;
pub use url::*;

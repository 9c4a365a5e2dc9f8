//! A TOML 1.0.0 parser with a structure-preserving document tree and two
//! encoders: TOML re-emission and JSON (plain and typed).
//!
//! The tree keeps the distinctions TOML draws between explicit, implicit,
//! inline, dotted, header, and array-of-tables tables. Those flags are what
//! decide whether a later header or dotted key is legal, and the TOML
//! encoder uses the same flags to pick each table's output form.
//!
//! All storage lives in a caller-supplied [`Arena`]; dropping the arena
//! releases the whole document at once.
//!
//! # Quick start
//!
//! ```
//! # fn main() -> Result<(), toml_reflow::Error> {
//! let arena = toml_reflow::Arena::new();
//! let doc = toml_reflow::parse_string("key = 'value'", &arena)?;
//! assert_eq!(doc.root().get("key").and_then(|v| v.as_str()), Some("value"));
//! # Ok(())
//! # }
//! ```
//!
//! Traverse with [`Table::get`] and the `as_*` accessors on [`Value`]:
//!
//! ```
//! # fn main() -> Result<(), toml_reflow::Error> {
//! # let arena = toml_reflow::Arena::new();
//! let doc = toml_reflow::parse_string(
//!     "[server]\nport = 8080\nhosts = ['alpha', 'beta']",
//!     &arena,
//! )?;
//! let server = doc.root().get("server").and_then(|v| v.as_table()).unwrap();
//! assert_eq!(server.get("port").and_then(|v| v.as_integer()), Some(8080));
//! # Ok(())
//! # }
//! ```
//!
//! Re-emit a document as TOML or JSON:
//!
//! ```
//! # fn main() -> Result<(), toml_reflow::Error> {
//! # let arena = toml_reflow::Arena::new();
//! let doc = toml_reflow::parse_string("a.b = 1", &arena)?;
//! assert_eq!(doc.to_toml(), "a.b = 1\n");
//! assert_eq!(doc.to_json(), r#"{"a":{"b":1}}"#);
//! # Ok(())
//! # }
//! ```

mod arena;
mod array;
mod document;
mod encode;
mod error;
mod json;
mod key;
mod parser;
mod scalar;
mod table;
mod time;
mod value;

pub use arena::Arena;
pub use array::Array;
pub use document::{Document, parse_file, parse_string};
pub use error::{Error, ErrorKind};
pub use table::{Table, TableKind, TableOrigin};
pub use time::{Date, DateTime, Time, TimeOffset};
pub use value::Value;

#[cfg(feature = "serde")]
pub mod impl_serde;

use crate::arena::Arena;
use crate::error::{Error, ErrorKind};
use crate::table::Table;
use crate::{encode, json, parser};
use std::path::Path;

/// A parsed TOML document.
///
/// Owns the root table; all storage lives in the [`Arena`] the document was
/// parsed with, so the document cannot outlive it.
#[derive(Debug)]
pub struct Document<'a> {
    root: Table<'a>,
}

impl<'a> Document<'a> {
    /// Read access to the root table.
    pub fn root(&self) -> &Table<'a> {
        &self.root
    }

    /// Re-emit the document as TOML, choosing `[header]`, `[[array]]`,
    /// inline, or dotted form per table.
    pub fn to_toml(&self) -> String {
        encode::encode(&self.root)
    }

    /// Encode the document as compact JSON.
    pub fn to_json(&self) -> String {
        json::encode(&self.root, false)
    }

    /// Encode the document as typed JSON: every scalar wrapped as
    /// `{"type": …, "value": …}`, the form the toml-test conformance
    /// harness expects.
    pub fn to_json_typed(&self) -> String {
        json::encode(&self.root, true)
    }
}

/// Parses TOML source into a [`Document`] allocated in `arena`.
///
/// This is the primary entry point. The input buffer is not retained: every
/// key and string in the tree is copied into the arena.
pub fn parse_string<'a>(src: &str, arena: &'a Arena) -> Result<Document<'a>, Error> {
    parser::parse(src, arena).map(|root| Document { root })
}

/// Opens `path`, reads it fully into memory, and delegates to
/// [`parse_string`]. I/O failures surface as [`ErrorKind::Io`] with `index`
/// and `line` zero.
pub fn parse_file<'a>(path: impl AsRef<Path>, arena: &'a Arena) -> Result<Document<'a>, Error> {
    let src = std::fs::read_to_string(path).map_err(|e| Error {
        kind: ErrorKind::Io(e.kind()),
        index: 0,
        line: 0,
    })?;
    parse_string(&src, arena)
}

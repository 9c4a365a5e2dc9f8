#![allow(unsafe_code)]

//! The document tree's table type and the navigation operations that enforce
//! TOML's nesting rules.
//!
//! Every table carries two flags beyond its entries: a [`TableKind`] saying
//! how the table was introduced and a [`TableOrigin`] saying whether it has
//! been named outright or only materialized as a path step. Together they
//! decide which headers and dotted keys are legal later in the document, and
//! the TOML encoder picks each table's output form from the same flags.

use crate::arena::Arena;
use crate::array::Array;
use crate::error::ErrorKind;
use crate::key;
use crate::value::Value;
use std::alloc::Layout;
use std::ptr::NonNull;

type TableEntry<'a> = (&'a str, Value<'a>);

const MIN_CAP: u32 = 2;

/// How a table came into being.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableKind {
    /// The document root.
    Root,
    /// Opened by a `[name]` header (or materialized under one).
    Header,
    /// One element of a `[[name]]` array of tables.
    ArrayElement,
    /// An `{ … }` value, sealed at its closing brace.
    Inline,
    /// Materialized by a dotted key path.
    Dotted,
}

/// Whether a table has been named outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableOrigin {
    /// Exists only as an intermediate path step so far.
    Implicit,
    /// Named by a header or by the terminal of a dotted assignment.
    Explicit,
}

/// An ordered key/value mapping with kind and origin metadata.
///
/// Entries keep insertion order; keys are canonical and arena-owned. Lookup
/// is a linear scan: a document is read by iteration far more often than by
/// point lookup, and TOML tables are small.
pub struct Table<'a> {
    len: u32,
    cap: u32,
    ptr: NonNull<TableEntry<'a>>,
    kind: TableKind,
    origin: TableOrigin,
}

impl<'a> Table<'a> {
    pub(crate) fn new(kind: TableKind, origin: TableOrigin) -> Self {
        Self {
            len: 0,
            cap: 0,
            ptr: NonNull::dangling(),
            kind,
            origin,
        }
    }

    /// How this table was introduced.
    #[inline]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Whether this table has been named outright.
    #[inline]
    pub fn origin(&self) -> TableOrigin {
        self.origin
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value for `key`, canonicalizing the argument first so
    /// bare and redundantly-quoted spellings find the same entry.
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        let canonical = key::canonicalize_key(name).ok()?;
        self.get_raw(canonical)
    }

    /// Lookup by an already-canonical key.
    pub(crate) fn get_raw(&self, name: &str) -> Option<&Value<'a>> {
        self.entries()
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns all entries, in insertion order.
    #[inline]
    pub fn entries(&self) -> &[TableEntry<'a>] {
        // Safety: ptr..ptr+len are initialized entries (or len is 0 and the
        // slice is empty off the dangling pointer).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len as usize) }
    }

    #[inline]
    pub(crate) fn entries_mut(&mut self) -> &mut [TableEntry<'a>] {
        // Safety: as for entries; &mut self gives exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len as usize) }
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &Value<'a>)> {
        self.entries().iter().map(|(k, v)| (*k, v))
    }

    pub(crate) fn find_index(&self, name: &str) -> Option<usize> {
        self.entries().iter().position(|(k, _)| *k == name)
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> &mut Value<'a> {
        &mut self.entries_mut()[index].1
    }

    /// Insert keeping the encoder's ordering discipline: header tables and
    /// arrays of tables go to the tail, everything else lands just before
    /// the first header-like sibling.
    pub(crate) fn put_ordered(
        &mut self,
        name: &'a str,
        value: Value<'a>,
        arena: &'a Arena,
    ) -> &mut Value<'a> {
        let at = if value.is_header_like() {
            self.len()
        } else {
            self.entries()
                .iter()
                .position(|(_, v)| v.is_header_like())
                .unwrap_or(self.len())
        };
        self.insert_entry(at, name, value, arena)
    }

    fn insert_table_ordered(
        &mut self,
        name: &'a str,
        table: Table<'a>,
        arena: &'a Arena,
    ) -> &mut Table<'a> {
        match self.put_ordered(name, Value::Table(table), arena) {
            Value::Table(t) => t,
            _ => unreachable!("inserted value is a table"),
        }
    }

    fn insert_entry(
        &mut self,
        at: usize,
        name: &'a str,
        value: Value<'a>,
        arena: &'a Arena,
    ) -> &mut Value<'a> {
        debug_assert!(at <= self.len());
        if self.len == self.cap {
            self.grow(arena);
        }
        let len = self.len as usize;
        // Safety: grow() ensured len < cap; at <= len, so shifting len-at
        // entries up by one stays in bounds and the write at `at` lands in
        // initialized-capacity storage. Entries have no drop glue.
        unsafe {
            let base = self.ptr.as_ptr();
            let moving = len - at;
            if moving > 0 {
                std::ptr::copy(base.add(at), base.add(at + 1), moving);
            }
            base.add(at).write((name, value));
        }
        self.len += 1;
        // Safety: the entry at `at` was just written.
        unsafe { &mut (*self.ptr.as_ptr().add(at)).1 }
    }

    #[cold]
    fn grow(&mut self, arena: &'a Arena) {
        let new_cap = if self.cap == 0 {
            MIN_CAP
        } else {
            self.cap.checked_mul(2).expect("capacity overflow")
        };
        let new_layout =
            Layout::array::<TableEntry<'_>>(new_cap as usize).expect("layout overflow");
        let new_ptr = arena.alloc(new_layout).cast::<TableEntry<'a>>();
        if self.cap > 0 {
            // Safety: old buffer holds self.len initialized entries; the new
            // buffer has room for new_cap >= self.len. The old buffer is
            // abandoned to the arena.
            unsafe {
                std::ptr::copy_nonoverlapping(
                    self.ptr.as_ptr(),
                    new_ptr.as_ptr(),
                    self.len as usize,
                );
            }
        }
        self.ptr = new_ptr;
        self.cap = new_cap;
    }
}

/// Navigation operations. Paths arrive as canonical key parts; each op
/// enforces the invariants that make a later statement legal or a
/// redefinition.
impl<'a> Table<'a> {
    /// Walk `parts` creating missing steps, making the terminal an explicit
    /// table of `kind`. This is the `[path]` header operation.
    pub(crate) fn create_table<'t>(
        &'t mut self,
        parts: &[&str],
        kind: TableKind,
        arena: &'a Arena,
    ) -> Result<&'t mut Table<'a>, ErrorKind> {
        let (last, intermediate) = parts.split_last().ok_or(ErrorKind::InvalidTableHeader)?;
        let mut current = self;
        for part in intermediate {
            current = Table::descend(current, part, arena, ErrorKind::InvalidTableNesting)?;
        }
        match current.find_index(last) {
            Some(idx) => match current.value_at_mut(idx) {
                Value::Table(t) => {
                    if t.kind == TableKind::Inline {
                        Err(ErrorKind::ImmutableInlineTable)
                    } else if t.origin == TableOrigin::Explicit {
                        Err(ErrorKind::TableRedefinition)
                    } else {
                        // An implicit step being named outright: it now owns
                        // its header form.
                        t.origin = TableOrigin::Explicit;
                        if matches!(t.kind, TableKind::Dotted | TableKind::Header) {
                            t.kind = kind;
                        }
                        Ok(t)
                    }
                }
                _ => Err(ErrorKind::DuplicateTableHeader),
            },
            None => {
                let name = arena.alloc_str(last);
                Ok(current.insert_table_ordered(
                    name,
                    Table::new(kind, TableOrigin::Explicit),
                    arena,
                ))
            }
        }
    }

    /// Walk `parts` to the array a `[[path]]` header appends to, creating a
    /// new empty array at the leaf when absent. An existing leaf must be a
    /// non-empty array of array-element tables.
    pub(crate) fn get_or_create_array<'t>(
        &'t mut self,
        parts: &[&str],
        arena: &'a Arena,
    ) -> Result<&'t mut Array<'a>, ErrorKind> {
        let (last, intermediate) = parts
            .split_last()
            .ok_or(ErrorKind::InvalidTableArrayHeader)?;
        let mut current = self;
        for part in intermediate {
            current = Table::descend(current, part, arena, ErrorKind::ExpectedTable)?;
        }
        match current.find_index(last) {
            Some(idx) => match current.value_at_mut(idx) {
                Value::Array(arr) => {
                    let is_aot = !arr.is_empty()
                        && arr.iter().all(
                            |v| matches!(v, Value::Table(t) if t.kind == TableKind::ArrayElement),
                        );
                    if is_aot {
                        Ok(arr)
                    } else {
                        Err(ErrorKind::ExpectedArrayOfTables)
                    }
                }
                Value::Table(_) => Err(ErrorKind::ExpectedArray),
                _ => Err(ErrorKind::ExpectedArray),
            },
            None => {
                let name = arena.alloc_str(last);
                // A new array of tables orders with headers: tail append.
                let at = current.len();
                match current.insert_entry(at, name, Value::Array(Array::new()), arena) {
                    Value::Array(a) => Ok(a),
                    _ => unreachable!("inserted value is an array"),
                }
            }
        }
    }

    /// Walk an existing `parts` path descending into the most recent element
    /// of every array-valued step, returning the innermost array. Resolves
    /// continuation paths against the element currently being filled.
    pub fn get_last_array<'t>(
        &'t mut self,
        parts: &[&str],
    ) -> Result<&'t mut Array<'a>, ErrorKind> {
        let (last, intermediate) = parts
            .split_last()
            .ok_or(ErrorKind::InvalidTableArrayHeader)?;
        let mut current = self;
        for part in intermediate {
            current = Table::descend_existing(current, part)?;
        }
        match current.find_index(last) {
            Some(idx) => match current.value_at_mut(idx) {
                Value::Array(arr) => Ok(arr),
                _ => Err(ErrorKind::ExpectedArrayOfTables),
            },
            None => Err(ErrorKind::ExpectedArrayOfTables),
        }
    }

    /// Place `value` at the end of a dotted key path, materializing the
    /// intermediate steps as dotted tables. This is the `key.path = value`
    /// operation.
    pub(crate) fn add_key_value(
        &mut self,
        parts: &[&str],
        value: Value<'a>,
        arena: &'a Arena,
    ) -> Result<(), ErrorKind> {
        let (last, intermediate) = parts.split_last().ok_or(ErrorKind::InvalidKey)?;
        let mut current = self;
        for part in intermediate {
            current = Table::descend_dotted(current, part, arena)?;
        }
        if let Some(idx) = current.find_index(last) {
            return Err(match current.entries()[idx].1 {
                Value::Table(_) => ErrorKind::KeyValueRedefinition,
                _ => ErrorKind::DuplicateKeyValuePair,
            });
        }
        let name = arena.alloc_str(last);
        current.put_ordered(name, value, arena);
        // The deepest dotted step is now named outright: a later header for
        // it would be a redefinition.
        if !intermediate.is_empty() {
            current.origin = TableOrigin::Explicit;
        }
        Ok(())
    }

    /// One header-path step: enter an existing table (or the most recent
    /// element of an array of tables), or create an implicit header table.
    fn descend<'t>(
        table: &'t mut Table<'a>,
        part: &str,
        arena: &'a Arena,
        non_table: ErrorKind,
    ) -> Result<&'t mut Table<'a>, ErrorKind> {
        match table.find_index(part) {
            Some(idx) => match table.value_at_mut(idx) {
                Value::Table(t) => {
                    if t.kind == TableKind::Inline {
                        Err(ErrorKind::ImmutableInlineTable)
                    } else {
                        Ok(t)
                    }
                }
                Value::Array(arr) => {
                    let is_aot = matches!(
                        arr.first(),
                        Some(Value::Table(t)) if t.kind == TableKind::ArrayElement
                    );
                    if !is_aot {
                        return Err(non_table);
                    }
                    match arr.last_mut() {
                        Some(Value::Table(t)) => Ok(t),
                        _ => Err(non_table),
                    }
                }
                _ => Err(non_table),
            },
            None => {
                let name = arena.alloc_str(part);
                Ok(table.insert_table_ordered(
                    name,
                    Table::new(TableKind::Header, TableOrigin::Implicit),
                    arena,
                ))
            }
        }
    }

    /// One step of [`get_last_array`]: existing entries only, arrays resolve
    /// to their most recent element.
    fn descend_existing<'t>(
        table: &'t mut Table<'a>,
        part: &str,
    ) -> Result<&'t mut Table<'a>, ErrorKind> {
        match table.find_index(part) {
            Some(idx) => match table.value_at_mut(idx) {
                Value::Table(t) => Ok(t),
                Value::Array(arr) => match arr.last_mut() {
                    Some(Value::Table(t)) => Ok(t),
                    _ => Err(ErrorKind::ExpectedTable),
                },
                _ => Err(ErrorKind::ExpectedTable),
            },
            None => Err(ErrorKind::ExpectedTable),
        }
    }

    /// One dotted-key step. Dotted tables may be re-entered freely; explicit
    /// header-family tables may not (that is what keeps `[a]` and a later
    /// `a.b = …` from two different statements apart); inline tables are
    /// sealed.
    fn descend_dotted<'t>(
        table: &'t mut Table<'a>,
        part: &str,
        arena: &'a Arena,
    ) -> Result<&'t mut Table<'a>, ErrorKind> {
        match table.find_index(part) {
            Some(idx) => match table.value_at_mut(idx) {
                Value::Table(t) => match t.kind {
                    TableKind::Inline => Err(ErrorKind::ImmutableInlineTable),
                    TableKind::Dotted => Ok(t),
                    _ => {
                        if t.origin == TableOrigin::Explicit {
                            Err(ErrorKind::TableRedefinition)
                        } else {
                            Ok(t)
                        }
                    }
                },
                _ => Err(ErrorKind::KeyValueTypeOverride),
            },
            None => {
                let name = arena.alloc_str(part);
                Ok(table.insert_table_ordered(
                    name,
                    Table::new(TableKind::Dotted, TableOrigin::Implicit),
                    arena,
                ))
            }
        }
    }
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.entries() {
            map.entry(k, v);
        }
        map.finish()
    }
}

/// Structural equality over entries in order; kind and origin are metadata
/// about how the table was written, not what it contains.
impl PartialEq for Table<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .entries()
                .iter()
                .zip(other.entries())
                .all(|(a, b)| a.0 == b.0 && a.1 == b.1)
    }
}

#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

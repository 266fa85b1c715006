//! Domain models for the roster pipeline.
//!
//! - [`Record`] - one character's attributes, in source order
//! - [`Entry`] - a dataset slot: a record or a verbatim placeholder
//! - [`Dataset`] - list- or mapping-shaped collection of entries
//! - [`Identity`] - the `id` attribute of a record
//! - [`TierKey`] - sort key derived from the `tier` attribute

use std::cmp::Ordering;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{LoadError, LoadResult};

/// Attribute holding the identity value.
pub const ID_FIELD: &str = "id";

/// Attribute holding the sort priority.
pub const TIER_FIELD: &str = "tier";

/// Attribute holding the display name (matched case-insensitively).
pub const NAME_FIELD: &str = "name";

// =============================================================================
// Identity
// =============================================================================

/// Identity value of a record.
///
/// Integers order before text; within a kind the natural order applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identity {
    Number(i64),
    Text(String),
}

impl Identity {
    /// Build an identity from a JSON value. `null` has no identity.
    ///
    /// Values that are neither integers nor strings are keyed by their JSON
    /// text so they still take part in duplicate detection.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Identity::Text(s.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => Identity::Number(i),
                None => Identity::Text(n.to_string()),
            }),
            other => Some(Identity::Text(other.to_string())),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Number(n) => write!(f, "{}", n),
            Identity::Text(s) => write!(f, "{}", s),
        }
    }
}

// =============================================================================
// Tier
// =============================================================================

/// Sort key for the `tier` attribute.
///
/// Numbers < text < absent. A `null` tier is absent.
#[derive(Debug, Clone)]
pub enum TierKey {
    Number(f64),
    Text(String),
    Absent,
}

impl TierKey {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => TierKey::Absent,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(TierKey::Number)
                .unwrap_or_else(|| TierKey::Text(n.to_string())),
            Some(Value::String(s)) => TierKey::Text(s.clone()),
            Some(other) => TierKey::Text(other.to_string()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TierKey::Absent)
    }

    fn rank(&self) -> u8 {
        match self {
            TierKey::Number(_) => 0,
            TierKey::Text(_) => 1,
            TierKey::Absent => 2,
        }
    }
}

impl Ord for TierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (TierKey::Number(a), TierKey::Number(b)) => a.total_cmp(b),
            (TierKey::Text(a), TierKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for TierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TierKey {}

// =============================================================================
// Record
// =============================================================================

/// One character record: attribute name to JSON value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Keep only the attributes for which `keep` returns true, in order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|k, _| keep(k));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The identity value, if present and not null.
    pub fn id(&self) -> Option<Identity> {
        self.get(ID_FIELD).and_then(Identity::from_value)
    }

    pub fn tier(&self) -> TierKey {
        TierKey::from_value(self.get(TIER_FIELD))
    }

    /// The first attribute whose key is `name` in any letter case.
    pub fn name(&self) -> Option<(&str, &Value)> {
        self.iter().find(|(k, _)| is_name_key(k))
    }

    /// True if any attribute holds `null`.
    pub fn has_null_attribute(&self) -> bool {
        self.0.values().any(Value::is_null)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Case-insensitive match against the display-name attribute.
pub fn is_name_key(key: &str) -> bool {
    key.eq_ignore_ascii_case(NAME_FIELD)
}

// =============================================================================
// Entry
// =============================================================================

/// A dataset slot.
///
/// Non-object slots (such as `null` placeholders) are never treated as
/// records but are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Record(Record),
    Placeholder(Value),
}

impl Entry {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Entry::Record(Record(map)),
            other => Entry::Placeholder(other),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Entry::Record(record) => Value::Object(record.0),
            Entry::Placeholder(value) => value,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Entry::Record(record) => Some(record),
            Entry::Placeholder(_) => None,
        }
    }

    /// Tier of the record; placeholders have none.
    pub fn tier(&self) -> TierKey {
        self.as_record().map(Record::tier).unwrap_or(TierKey::Absent)
    }
}

impl From<Record> for Entry {
    fn from(record: Record) -> Self {
        Entry::Record(record)
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Collection shape as loaded from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    List,
    Mapping,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::List => write!(f, "list"),
            Shape::Mapping => write!(f, "mapping"),
        }
    }
}

/// Position of an entry in its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKey<'a> {
    Index(usize),
    Name(&'a str),
}

/// The full collection of entries, list- or mapping-shaped.
///
/// Both shapes expose the same ordered view through [`Dataset::entries`];
/// the shape only matters when the dataset is written back.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    List(Vec<Entry>),
    Mapping(Vec<(String, Entry)>),
}

impl Dataset {
    /// Build a dataset from a parsed JSON document.
    pub fn from_json(value: Value) -> LoadResult<Self> {
        match value {
            Value::Array(items) => Ok(Dataset::List(
                items.into_iter().map(Entry::from_value).collect(),
            )),
            Value::Object(map) => Ok(Dataset::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Entry::from_value(v)))
                    .collect(),
            )),
            other => Err(LoadError::MalformedSource(format!(
                "expected a list or mapping of records, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Rebuild the JSON document, keeping the loaded shape.
    pub fn into_json(self) -> Value {
        match self {
            Dataset::List(entries) => {
                Value::Array(entries.into_iter().map(Entry::into_value).collect())
            }
            Dataset::Mapping(pairs) => Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, e)| (k, e.into_value()))
                    .collect(),
            ),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Dataset::List(_) => Shape::List,
            Dataset::Mapping(_) => Shape::Mapping,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::List(entries) => entries.len(),
            Dataset::Mapping(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in order, with their position.
    pub fn entries(&self) -> impl Iterator<Item = (EntryKey<'_>, &Entry)> + '_ {
        let (list, mapping) = match self {
            Dataset::List(entries) => (Some(entries), None),
            Dataset::Mapping(pairs) => (None, Some(pairs)),
        };
        let indexed = list
            .into_iter()
            .flat_map(|v| v.iter().enumerate().map(|(i, e)| (EntryKey::Index(i), e)));
        let named = mapping
            .into_iter()
            .flat_map(|v| v.iter().map(|(k, e)| (EntryKey::Name(k.as_str()), e)));
        indexed.chain(named)
    }

    /// Object-valued entries only, in order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.entries().filter_map(|(_, entry)| entry.as_record())
    }

    /// Stable reorder of entries by a derived key. Mapping keys travel with
    /// their entries.
    pub fn reorder_by_key<K, F>(self, mut key: F) -> Self
    where
        K: Ord,
        F: FnMut(&Entry) -> K,
    {
        match self {
            Dataset::List(mut entries) => {
                entries.sort_by_cached_key(|e| key(e));
                Dataset::List(entries)
            }
            Dataset::Mapping(mut pairs) => {
                pairs.sort_by_cached_key(|(_, e)| key(e));
                Dataset::Mapping(pairs)
            }
        }
    }

    /// Apply `f` to every record; placeholders are carried through.
    pub fn map_records<F>(self, mut f: F) -> Self
    where
        F: FnMut(Record) -> Record,
    {
        let mut apply = |entry: Entry| match entry {
            Entry::Record(record) => Entry::Record(f(record)),
            placeholder => placeholder,
        };
        match self {
            Dataset::List(entries) => Dataset::List(entries.into_iter().map(&mut apply).collect()),
            Dataset::Mapping(pairs) => Dataset::Mapping(
                pairs.into_iter().map(|(k, e)| (k, apply(e))).collect(),
            ),
        }
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dataset::List(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for entry in entries {
                    seq.serialize_element(entry)?;
                }
                seq.end()
            }
            Dataset::Mapping(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, entry) in pairs {
                    map.serialize_entry(key, entry)?;
                }
                map.end()
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

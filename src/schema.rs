//! Schema node model.
//!
//! A [`Schema`] is an immutable tree describing the shape a JSON value is
//! expected to have. Leaves (`Number`, `String`, `Boolean`, `Literal`) carry
//! no children; composites (`Array`, `Object`, `Union`) own their children
//! exclusively, so a schema is always a finite tree.
//!
//! Construction is total except for the empty union, which is rejected here
//! (at build time) rather than surfacing later as a validation failure.
use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde_json::Value;

use crate::error::SchemaError;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Number,
    String,
    Boolean,
    /// exactly one primitive value
    Literal(Literal),
    /// homogeneous sequence; the box is the element schema
    Array(Box<Schema>),
    Object(ObjectShape),
    /// tried in declaration order, first match wins
    Union(Alternatives),
}

/// The value a [`Schema::Literal`] matches. Literals are restricted to
/// strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Number(OrderedFloat<f64>),
    String(String),
}

/// Declared properties of an object schema, kept in declaration order so
/// validation (and the first reported failure) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectShape {
    fields: IndexMap<String, Schema>,
}

/// The alternatives of a union. Never empty: the only ways to build one are
/// [`union`] (non-empty by signature) and [`try_union`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternatives(Vec<Schema>);

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

pub fn number() -> Schema {
    Schema::Number
}

pub fn string() -> Schema {
    Schema::String
}

pub fn bool() -> Schema {
    Schema::Boolean
}

pub fn literal(value: impl Into<Literal>) -> Schema {
    Schema::Literal(value.into())
}

pub fn array(item: Schema) -> Schema {
    Schema::Array(Box::new(item))
}

/// Object schema over the given `(key, schema)` pairs.
///
/// A repeated key replaces the earlier entry but keeps its position. Use
/// [`try_object`] to treat repeats as a build error instead.
pub fn object<I, K>(fields: I) -> Schema
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    let fields = fields
        .into_iter()
        .map(|(k, s)| (k.into(), s))
        .collect::<IndexMap<_, _>>();
    Schema::Object(ObjectShape { fields })
}

pub fn try_object<I, K>(fields: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = (K, Schema)>,
    K: Into<String>,
{
    let mut out = IndexMap::new();
    for (k, s) in fields {
        let k = k.into();
        if out.contains_key(&k) {
            return Err(SchemaError::DuplicateKey(k));
        }
        out.insert(k, s);
    }
    Ok(Schema::Object(ObjectShape { fields: out }))
}

/// Union of `first` and every schema in `rest`, in that order.
pub fn union<I>(first: Schema, rest: I) -> Schema
where
    I: IntoIterator<Item = Schema>,
{
    let mut alts = vec![first];
    alts.extend(rest);
    Schema::Union(Alternatives(alts))
}

/// Union over a runtime-sized list of alternatives.
pub fn try_union<I>(alternatives: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = Schema>,
{
    let alts: Vec<Schema> = alternatives.into_iter().collect();
    if alts.is_empty() {
        return Err(SchemaError::EmptyUnion);
    }
    Ok(Schema::Union(Alternatives(alts)))
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Schema {
    pub fn number() -> Self { number() }
    pub fn string() -> Self { string() }
    pub fn bool() -> Self { bool() }
    pub fn literal(value: impl Into<Literal>) -> Self { literal(value) }
    pub fn array(item: Schema) -> Self { array(item) }

    /// Validate with the default [`Config`](crate::validate::Config).
    pub fn validate<'v>(&self, value: &'v Value) -> crate::validate::Outcome<'v> {
        crate::validate::validate(self, value)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Number | Self::String | Self::Boolean | Self::Literal(_))
    }

    /// Number of nodes in the tree, this one included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            match node {
                Self::Array(item) => stack.push(item),
                Self::Object(shape) => stack.extend(shape.fields.values()),
                Self::Union(alts) => stack.extend(alts.iter()),
                _ => {}
            }
        }
        count
    }
}

impl Literal {
    /// Primitive equality against a candidate value.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Number(x), Value::Number(n)) => n.as_f64() == Some(x.0),
            (Self::String(x), Value::String(s)) => x == s,
            _ => false,
        }
    }
}

impl ObjectShape {
    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.fields.get(key)
    }
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(k, s)| (k.as_str(), s))
    }
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Alternatives {
    pub fn iter(&self) -> std::slice::Iter<'_, Schema> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn first(&self) -> &Schema {
        // non-empty by construction
        &self.0[0]
    }
    pub fn as_slice(&self) -> &[Schema] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Alternatives {
    type Item = &'a Schema;
    type IntoIter = std::slice::Iter<'a, Schema>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Only types every value of which is an exact `f64`. `i64`/`u64` above 2^53
// and `f32` (0.1f32 != 0.1) would silently change the literal.
macro_rules! literal_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Literal {
                fn from(n: $t) -> Self { Literal::Number(OrderedFloat(n as f64)) }
            }
        )*
    };
}

literal_from_number!(i8, i16, i32, u8, u16, u32, f64);

impl From<&str> for Literal {
    fn from(s: &str) -> Self { Literal::String(s.to_owned()) }
}

impl From<String> for Literal {
    fn from(s: String) -> Self { Literal::String(s) }
}

// ————————————————————————————————————————————————————————————————————————————
// DISPLAY
// ————————————————————————————————————————————————————————————————————————————

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n.0),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Compact type notation, e.g. `{ id: number, tags: array<string> }`.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::Boolean => f.write_str("boolean"),
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Array(item) => write!(f, "array<{item}>"),
            Self::Object(shape) if shape.is_empty() => f.write_str("{}"),
            Self::Object(shape) => {
                f.write_str("{ ")?;
                for (i, (k, s)) in shape.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {s}")?;
                }
                f.write_str(" }")
            }
            Self::Union(alts) => {
                for (i, s) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    // nested unions stay grouped
                    if matches!(s, Self::Union(_)) {
                        write!(f, "({s})")?;
                    } else {
                        write!(f, "{s}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

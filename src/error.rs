//! Error representation.
//!
//! Two families, never mixed:
//! - [`SchemaError`]: the schema itself is malformed. Raised while building,
//!   before any data is looked at.
//! - [`ValidationError`]: a candidate value does not conform. Always returned
//!   as a value and carries the path to the first mismatch.
use std::fmt;

use thiserror::Error;

use crate::kind::Kind;
use crate::schema::Literal;

// ————————————————————————————————————————————————————————————————————————————
// SCHEMA (BUILD-TIME) ERRORS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("union requires at least one alternative")]
    EmptyUnion,

    #[error("duplicate object key `{0}`")]
    DuplicateKey(String),

    /// Sample values admit no expressible schema (e.g. only nulls).
    #[error("cannot infer a schema: {reason}")]
    Uninferable { reason: String },
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATION ERRORS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a failure inside the candidate, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}{kind}", path_context(.path))]
pub struct ValidationError {
    path: Path,
    kind: ErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Primitive kind differs from the expected one.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch { expected: Kind, actual: Kind },

    /// `actual` is the candidate rendered as JSON text (or `missing`).
    #[error("expected literal {expected}, got {actual}")]
    LiteralMismatch { expected: Literal, actual: String },

    /// Not an array/object where one was expected. A null candidate is
    /// reported distinctly from other kinds.
    #[error("{}", shape_message(.expected, .actual))]
    ShapeMismatch { expected: Kind, actual: Kind },

    /// Only raised when unknown keys are rejected.
    #[error("unknown property {key}")]
    UnknownKey { key: String },

    /// Every union alternative failed. `alternatives` holds one failure per
    /// alternative (paths relative to the union) unless detail is discarded.
    #[error("no alternative matched{}", alternatives_detail(.alternatives))]
    UnionExhausted { alternatives: Vec<ValidationError> },

    /// A validated value could not be viewed as the statically projected type.
    #[error("value passed validation but could not be projected onto {target}")]
    Unprojectable { target: &'static str },
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl PathSegment {
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// RFC 6901 JSON Pointer (`""` for the root).
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for seg in &self.0 {
            out.push('/');
            match seg {
                PathSegment::Key(k) => out.push_str(&k.replace('~', "~0").replace('/', "~1")),
                PathSegment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// jq-style, `$` is the root: `$.items[1].id`
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in &self.0 {
            match seg {
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

impl ValidationError {
    pub fn new(path: Path, kind: ErrorKind) -> Self {
        Self { path, kind }
    }

    pub fn at_root(kind: ErrorKind) -> Self {
        Self { path: Path::root(), kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_parts(self) -> (Path, ErrorKind) {
        (self.path, self.kind)
    }

    /// Wrap this failure in one more level of context, e.g. the property of
    /// an enclosing object.
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.0.insert(0, segment);
        self
    }
}

// ------------------------------ Rendering -------------------------------- //

/// Renders the path as nested context: `index 1: property id: `
struct PathContext<'a>(&'a Path);

fn path_context(path: &Path) -> PathContext<'_> {
    PathContext(path)
}

impl fmt::Display for PathContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in self.0.segments() {
            match seg {
                PathSegment::Key(k) => write!(f, "property {k}: ")?,
                PathSegment::Index(i) => write!(f, "index {i}: ")?,
            }
        }
        Ok(())
    }
}

fn shape_message(expected: &Kind, actual: &Kind) -> String {
    match actual {
        Kind::Null => format!("got null, expected {expected}"),
        _ => format!("expected {expected}, got {actual}"),
    }
}

fn alternatives_detail(alternatives: &[ValidationError]) -> String {
    if alternatives.is_empty() {
        return String::new();
    }
    let parts = alternatives.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!(" ({})", parts.join("; "))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn type_mismatch(expected: Kind, actual: Kind) -> ErrorKind {
        ErrorKind::TypeMismatch { expected, actual }
    }

    #[test]
    fn nested_context_message() {
        let err = ValidationError::at_root(type_mismatch(Kind::Number, Kind::String))
            .within(PathSegment::key("id"))
            .within(PathSegment::Index(1));
        assert_eq!(err.to_string(), "index 1: property id: expected number, got string");
        assert_eq!(err.path().to_string(), "$[1].id");
        assert_eq!(err.path().pointer(), "/1/id");
    }

    #[test]
    fn null_shape_message_is_distinct() {
        let null = ErrorKind::ShapeMismatch { expected: Kind::Object, actual: Kind::Null };
        let num = ErrorKind::ShapeMismatch { expected: Kind::Object, actual: Kind::Number };
        assert_eq!(null.to_string(), "got null, expected object");
        assert_eq!(num.to_string(), "expected object, got number");
    }

    #[test]
    fn union_detail_lists_alternatives() {
        let bare = ErrorKind::UnionExhausted { alternatives: Vec::new() };
        assert_eq!(bare.to_string(), "no alternative matched");

        let detailed = ErrorKind::UnionExhausted {
            alternatives: vec![
                ValidationError::at_root(type_mismatch(Kind::Number, Kind::Boolean)),
                ValidationError::at_root(type_mismatch(Kind::String, Kind::Boolean)),
            ],
        };
        assert_eq!(
            detailed.to_string(),
            "no alternative matched (expected number, got boolean; expected string, got boolean)"
        );
    }

    #[test]
    fn pointer_escapes_reserved_chars() {
        let path: Path = [PathSegment::key("a/b"), PathSegment::key("m~n")].into_iter().collect();
        assert_eq!(path.pointer(), "/a~1b/m~0n");
        assert_eq!(Path::root().pointer(), "");
        assert!(Path::root().is_root());
    }
}

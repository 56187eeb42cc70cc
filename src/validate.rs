//! Validator: walks a [`Schema`] and a candidate [`Value`] in lock-step.
//!
//! The walk is iterative. Pending `(schema, value)` pairs live on an explicit
//! frame stack and the current location on a path stack, so deep inputs do
//! not grow the call stack and the failure path is just a copy of the path
//! stack. Only union alternatives recurse (once per alternative, bounded by
//! schema depth).
//!
//! Order is depth-first, array elements index-ascending, object properties in
//! declaration order. The first failure ends the walk.
use serde_json::Value;

use crate::error::{ErrorKind, Path, PathSegment, ValidationError};
use crate::kind::Kind;
use crate::schema::{Literal, ObjectShape, Schema};

/// Success carries the candidate itself, untouched.
pub type Outcome<'v> = Result<&'v Value, ValidationError>;

// ————————————————————————————————————————————————————————————————————————————
// CONFIG
// ————————————————————————————————————————————————————————————————————————————

/// What to do with candidate properties an object schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    #[default]
    Ignore,
    Reject,
}

/// Whether a failed union keeps the failure of every alternative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnionDetail {
    #[default]
    Collect,
    Discard,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub unknown_keys: UnknownKeys,
    pub union_detail: UnionDetail,
}

impl Config {
    pub fn strict() -> Self {
        Self { unknown_keys: UnknownKeys::Reject, ..Self::default() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATOR
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    config: Config,
}

/// Path step borrowed from the schema; owned only once a failure is reported.
#[derive(Debug, Clone, Copy)]
enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

struct Frame<'s, 'v> {
    schema: &'s Schema,
    value: Option<&'v Value>,
    depth: usize,
    step: Option<Step<'s>>,
}

/// Validate with the default [`Config`].
pub fn validate<'v>(schema: &Schema, value: &'v Value) -> Outcome<'v> {
    Validator::default().validate(schema, value)
}

impl Validator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn validate<'v>(&self, schema: &Schema, value: &'v Value) -> Outcome<'v> {
        match self.check(schema, Some(value)) {
            Ok(()) => Ok(value),
            Err(err) => {
                tracing::debug!(path = %err.path(), error = %err, "value rejected");
                Err(err)
            }
        }
    }

    pub fn is_valid(&self, schema: &Schema, value: &Value) -> bool {
        self.check(schema, Some(value)).is_ok()
    }

    fn without_union_detail(&self) -> Self {
        Self { config: Config { union_detail: UnionDetail::Discard, ..self.config } }
    }

    /// Core walk. `None` is an absent object property.
    fn check<'s, 'v>(&self, root: &'s Schema, value: Option<&'v Value>) -> Result<(), ValidationError> {
        let mut path: Vec<Step<'s>> = Vec::new();
        let mut stack = vec![Frame { schema: root, value, depth: 0, step: None }];

        while let Some(frame) = stack.pop() {
            path.truncate(frame.depth.saturating_sub(1));
            if let Some(step) = frame.step {
                path.push(step);
            }
            let value = frame.value;

            match frame.schema {
                Schema::Number => expect_kind(&path, Kind::Number, value)?,
                Schema::String => expect_kind(&path, Kind::String, value)?,
                Schema::Boolean => expect_kind(&path, Kind::Boolean, value)?,
                Schema::Literal(lit) => expect_literal(&path, lit, value)?,
                Schema::Array(item) => {
                    let Some(Value::Array(xs)) = value else {
                        return Err(shape_mismatch(&path, Kind::Array, value));
                    };
                    // reversed so the lowest index is popped first
                    for (i, x) in xs.iter().enumerate().rev() {
                        stack.push(Frame {
                            schema: item,
                            value: Some(x),
                            depth: frame.depth + 1,
                            step: Some(Step::Index(i)),
                        });
                    }
                }
                Schema::Object(shape) => {
                    let Some(Value::Object(map)) = value else {
                        return Err(shape_mismatch(&path, Kind::Object, value));
                    };
                    if self.config.unknown_keys == UnknownKeys::Reject {
                        reject_unknown_keys(&path, shape, map)?;
                    }
                    for (key, child) in shape.iter().rev() {
                        stack.push(Frame {
                            schema: child,
                            value: map.get(key),
                            depth: frame.depth + 1,
                            step: Some(Step::Key(key)),
                        });
                    }
                }
                Schema::Union(alts) => {
                    // nested unions skip their detail until this one is known to fail
                    let quick = self.without_union_detail();
                    if !alts.iter().any(|alt| quick.check(alt, value).is_ok()) {
                        let alternatives = match self.config.union_detail {
                            UnionDetail::Collect => alts.iter().filter_map(|alt| self.check(alt, value).err()).collect(),
                            UnionDetail::Discard => Vec::new(),
                        };
                        return Err(fail(&path, ErrorKind::UnionExhausted { alternatives }));
                    }
                }
            }
        }

        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn fail(path: &[Step<'_>], kind: ErrorKind) -> ValidationError {
    let path = path
        .iter()
        .map(|step| match *step {
            Step::Key(k) => PathSegment::Key(k.to_owned()),
            Step::Index(i) => PathSegment::Index(i),
        })
        .collect::<Path>();
    ValidationError::new(path, kind)
}

fn expect_kind(path: &[Step<'_>], expected: Kind, value: Option<&Value>) -> Result<(), ValidationError> {
    let actual = Kind::of(value);
    if actual == expected {
        Ok(())
    } else {
        Err(fail(path, ErrorKind::TypeMismatch { expected, actual }))
    }
}

fn expect_literal(path: &[Step<'_>], lit: &Literal, value: Option<&Value>) -> Result<(), ValidationError> {
    match value {
        Some(v) if lit.matches(v) => Ok(()),
        Some(v) => Err(fail(path, ErrorKind::LiteralMismatch { expected: lit.clone(), actual: v.to_string() })),
        None => Err(fail(path, ErrorKind::LiteralMismatch {
            expected: lit.clone(),
            actual: Kind::Missing.to_string(),
        })),
    }
}

fn shape_mismatch(path: &[Step<'_>], expected: Kind, value: Option<&Value>) -> ValidationError {
    fail(path, ErrorKind::ShapeMismatch { expected, actual: Kind::of(value) })
}

fn reject_unknown_keys(
    path: &[Step<'_>],
    shape: &ObjectShape,
    map: &serde_json::Map<String, Value>,
) -> Result<(), ValidationError> {
    match map.keys().find(|k| !shape.contains_key(k)) {
        Some(key) => Err(fail(path, ErrorKind::UnknownKey { key: key.clone() })),
        None => Ok(()),
    }
}

// ------------------------------- Tests ------------------------------------ //

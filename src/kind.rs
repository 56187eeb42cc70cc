use std::fmt;

use serde_json::Value;

/// Runtime tag of a candidate slot.
///
/// `Missing` stands for a property the candidate object does not have; it is
/// what an absent key is validated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Missing,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn of(value: Option<&Value>) -> Self {
        match value {
            None => Self::Missing,
            Some(v) => Self::of_value(v),
        }
    }

    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Null      => Self::Null,
            Value::Bool(_)   => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_)  => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Null    => "null",
            Self::Boolean => "boolean",
            Self::Number  => "number",
            Self::String  => "string",
            Self::Array   => "array",
            Self::Object  => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Schema inference from sample values.
//!
//! Stream JSON samples in, accumulate evidence per kind with a join (⊔), then
//! lower the evidence to the narrowest [`Schema`] that accepts every sample.
//!
//! - Join is associative/commutative/idempotent → order-independent.
//! - At most one arm per kind; several arms lower to a `Union` in the fixed
//!   order array, object, number, string, boolean.
//! - The schema model has no null and no optional property. Null evidence is
//!   therefore not expressible: a field that is absent or null in some sample
//!   is left out of the object shape (undeclared keys are tolerated anyway).
//!   A slot with any inexpressible evidence is itself inexpressible: dropped
//!   from its object, or an error at the root.
pub mod arr;
pub mod obj;
pub mod str;

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::{self, Schema};

pub use arr::ArrC;
pub use obj::{FieldC, ObjC};
pub use str::StrC;

// ------------------------------- Policy ---------------------------------- //

const STRING_ENUM_MAX: usize = 8;          // small, human-ish enum threshold
const STRING_ENUM_MAX_LEN: usize = 16;     // max literal length for enum

// literal cap to avoid ballooning before lowering prunes
const MAX_STR_LITS: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferConfig {
    /// Lower small sets of human-ish strings to a union of string literals.
    pub string_enums: bool,
}

// ------------------------------ State ------------------------------------ //

/// Evidence for one slot, one optional arm per kind.
#[derive(Clone, Debug, Default)]
pub struct U {
    pub nullable: bool,
    pub has_bool: bool,
    pub has_num: bool,
    pub str_: Option<StrC>,
    pub arr: Option<ArrC>,
    pub obj: Option<ObjC>,
}

impl U {
    pub fn empty() -> Self { Self::default() }

    pub fn is_bottom(&self) -> bool {
        !self.nullable && !self.has_bool && !self.has_num
            && self.str_.is_none() && self.arr.is_none() && self.obj.is_none()
    }

    pub fn join(a: &Self, b: &Self) -> Self {
        Self {
            nullable: a.nullable || b.nullable,
            has_bool: a.has_bool || b.has_bool,
            has_num: a.has_num || b.has_num,
            str_: join_arm(&a.str_, &b.str_, StrC::join),
            arr: join_arm(&a.arr, &b.arr, ArrC::join),
            obj: join_arm(&a.obj, &b.obj, ObjC::join),
        }
    }
}

fn join_arm<T: Clone>(a: &Option<T>, b: &Option<T>, f: impl FnOnce(&T, &T) -> T) -> Option<T> {
    match (a, b) {
        (None, None) => None,
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (Some(x), Some(y)) => Some(f(x, y)),
    }
}

// ------------------------------ Observe ---------------------------------- //

pub fn observe_value(v: &Value) -> U {
    match v {
        Value::Null => U { nullable: true, ..U::default() },
        Value::Bool(_) => U { has_bool: true, ..U::default() },
        Value::Number(_) => U { has_num: true, ..U::default() },
        Value::String(s) => U { str_: Some(StrC::observe(s)), ..U::default() },
        Value::Array(xs) => observe_array(xs),
        Value::Object(m) => observe_object(m),
    }
}

fn observe_array(xs: &[Value]) -> U {
    let mut item = U::empty();
    for el in xs { item = U::join(&item, &observe_value(el)); }
    let arr = ArrC { item: Box::new(item) };
    U { arr: Some(arr), ..U::default() }
}

fn observe_object(map: &Map<String, Value>) -> U {
    let mut obj = ObjC { seen_objects: 1, ..ObjC::default() };
    for (k, v) in map {
        obj.fields.insert(k.clone(), FieldC {
            ty: observe_value(v),
            non_null_in: if v.is_null() { 0 } else { 1 },
        });
    }
    U { obj: Some(obj), ..U::default() }
}

// ------------------------------- Lower ----------------------------------- //

/// Lower evidence to a schema accepting every observed value, or `None` when
/// some observed value has no expressible schema.
pub fn lower(u: &U, config: &InferConfig) -> Option<Schema> {
    if u.nullable || u.is_bottom() {
        return None;
    }

    let mut arms: Vec<Schema> = Vec::new();

    // 1) Arrays first. Items never observed (only empty arrays) admit no
    // element schema; the whole slot is then inexpressible.
    if let Some(arr) = &u.arr {
        arms.push(schema::array(lower(&arr.item, config)?));
    }

    // 2) Objects next
    if let Some(obj) = &u.obj {
        let fields = obj.fields.iter()
            // "required" = present & non-null in every object
            .filter(|(_, f)| f.non_null_in == obj.seen_objects)
            .filter_map(|(k, f)| Some((k.clone(), lower(&f.ty, config)?)));
        arms.push(schema::object(fields));
    }

    // 3) Numbers
    if u.has_num {
        arms.push(schema::number());
    }

    // 4) Strings: tiny human enum → literal arms, else plain string
    if let Some(str_c) = &u.str_ {
        let tiny = config.string_enums
            && !str_c.lits.is_empty()
            && str_c.lits.len() <= STRING_ENUM_MAX
            && str_c.lits.iter().all(|s| str::looks_humanish(s));
        if tiny {
            arms.extend(str_c.lits.iter().map(|s| schema::literal(s.as_str())));
        } else {
            arms.push(schema::string());
        }
    }

    // 5) Bool
    if u.has_bool {
        arms.push(schema::bool());
    }

    match arms.len() {
        1 => arms.pop(),
        _ => schema::try_union(arms).ok(),
    }
}

// ------------------------------- Front API -------------------------------- //

#[derive(Debug, Default)]
pub struct Inference {
    state: U,
    samples: u64,
}

impl Inference {
    pub fn new() -> Self { Self::default() }

    pub fn observe_value(&mut self, v: &Value) {
        let obs = observe_value(v);
        self.state = U::join(&self.state, &obs);
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 { self.samples }

    pub fn evidence(&self) -> &U { &self.state }

    pub fn solve(&self, config: &InferConfig) -> Result<Schema, SchemaError> {
        if self.samples == 0 {
            return Err(SchemaError::Uninferable { reason: "no samples observed".into() });
        }
        let schema = lower(&self.state, config).ok_or_else(|| SchemaError::Uninferable {
            reason: "samples include null or only empty arrays at the root".into(),
        })?;
        tracing::debug!(samples = self.samples, nodes = schema.node_count(), "schema inferred");
        Ok(schema)
    }
}

pub fn infer_from_values<'a, I>(values: I, config: &InferConfig) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = &'a Value>
{
    let mut inf = Inference::new();
    for v in values {
        inf.observe_value(v);
    }
    inf.solve(config)
}

// ------------------------------- Tests ------------------------------------ //

//! Static type projection.
//!
//! A [`Shape`] is a zero-sized type standing for a schema. Its associated
//! `Output` is the Rust type of every value the schema accepts, so the
//! mapping schema → value type is computed by the compiler:
//!
//! | shape                 | schema            | `Output`                 |
//! |-----------------------|-------------------|--------------------------|
//! | [`Num`]               | `number()`        | `f64`                    |
//! | [`Str`]               | `string()`        | `String`                 |
//! | [`Bool`]              | `bool()`          | `bool`                   |
//! | `literal!(X = v)`     | `literal(v)`      | `X` (singleton type)     |
//! | [`ArrayOf<S>`]        | `array(S)`        | `Vec<S::Output>`         |
//! | `record! { .. }`      | `object({..})`    | the generated struct     |
//! | [`Union2<A, B>`] ..   | `union(A, [B])`   | [`OneOf2<A::Output, ..>`]|
//!
//! [`parse`] runs the ordinary [`Validator`] against `S::schema()` and only
//! then builds the projected value, so error reporting is identical to the
//! untyped path.
//!
//! ```
//! use json_shape::typed::{self, ArrayOf, Num, Str};
//! use serde_json::json;
//!
//! json_shape::record! {
//!     #[derive(Debug, PartialEq)]
//!     pub struct Point {
//!         label: Str,
//!         coords: ArrayOf<Num>,
//!     }
//! }
//!
//! let p = typed::parse::<Point>(json!({"label": "a", "coords": [1, 2]})).unwrap();
//! assert_eq!(p.coords, vec![1.0, 2.0]);
//! ```
use std::marker::PhantomData;

use serde_json::Value;

use crate::error::{ErrorKind, ValidationError};
use crate::schema::{self, Schema};
use crate::validate::Validator;

pub trait Shape {
    type Output;

    /// The runtime schema this shape stands for.
    fn schema() -> Schema;

    /// Build the projected value. Only called on values that `validator`
    /// already accepted against `Self::schema()`; `None` means the two
    /// disagree. Union shapes pick their arm with the same `validator`.
    fn project(value: Value, validator: &Validator) -> Option<Self::Output>;
}

/// Validate with the default config, then project.
pub fn parse<S: Shape>(value: Value) -> Result<S::Output, ValidationError> {
    parse_with::<S>(&Validator::default(), value)
}

pub fn parse_with<S: Shape>(validator: &Validator, value: Value) -> Result<S::Output, ValidationError> {
    validator.validate(&S::schema(), &value)?;
    project_checked::<S>(validator, value)
}

fn project_checked<S: Shape>(validator: &Validator, value: Value) -> Result<S::Output, ValidationError> {
    S::project(value, validator).ok_or_else(|| {
        ValidationError::at_root(ErrorKind::Unprojectable {
            target: std::any::type_name::<S::Output>(),
        })
    })
}

/// A shape with its schema built once, for repeated parsing.
pub struct Typed<S: Shape> {
    schema: Schema,
    validator: Validator,
    _shape: PhantomData<fn() -> S>,
}

impl<S: Shape> Typed<S> {
    pub fn new() -> Self {
        Self::with_validator(Validator::default())
    }

    pub fn with_validator(validator: Validator) -> Self {
        Self { schema: S::schema(), validator, _shape: PhantomData }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn parse(&self, value: Value) -> Result<S::Output, ValidationError> {
        self.validator.validate(&self.schema, &value)?;
        project_checked::<S>(&self.validator, value)
    }
}

impl<S: Shape> Default for Typed<S> {
    fn default() -> Self {
        Self::new()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// LEAF SHAPES
// ————————————————————————————————————————————————————————————————————————————

pub struct Num;
pub struct Str;
pub struct Bool;

impl Shape for Num {
    type Output = f64;
    fn schema() -> Schema { schema::number() }
    fn project(value: Value, _: &Validator) -> Option<f64> { value.as_f64() }
}

impl Shape for Str {
    type Output = String;
    fn schema() -> Schema { schema::string() }
    fn project(value: Value, _: &Validator) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Shape for Bool {
    type Output = bool;
    fn schema() -> Schema { schema::bool() }
    fn project(value: Value, _: &Validator) -> Option<bool> { value.as_bool() }
}

// ————————————————————————————————————————————————————————————————————————————
// COMPOSITE SHAPES
// ————————————————————————————————————————————————————————————————————————————

pub struct ArrayOf<S>(PhantomData<fn() -> S>);

impl<S: Shape> Shape for ArrayOf<S> {
    type Output = Vec<S::Output>;
    fn schema() -> Schema { schema::array(S::schema()) }
    fn project(value: Value, validator: &Validator) -> Option<Self::Output> {
        match value {
            Value::Array(xs) => xs.into_iter().map(|x| S::project(x, validator)).collect(),
            _ => None,
        }
    }
}

macro_rules! union_shape {
    ($(#[$meta:meta])* $union:ident => $one_of:ident { $first:ident $(, $rest:ident)+ }) => {
        /// Value of a union shape, tagged by the alternative that matched first.
        #[derive(Debug, Clone, PartialEq)]
        pub enum $one_of<$first, $($rest),+> {
            $first($first),
            $($rest($rest),)+
        }

        $(#[$meta])*
        pub struct $union<$first, $($rest),+>(PhantomData<fn() -> ($first, $($rest),+)>);

        impl<$first: Shape, $($rest: Shape),+> Shape for $union<$first, $($rest),+> {
            type Output = $one_of<<$first as Shape>::Output, $(<$rest as Shape>::Output),+>;

            fn schema() -> Schema {
                schema::union(<$first as Shape>::schema(), [$(<$rest as Shape>::schema()),+])
            }

            fn project(value: Value, validator: &Validator) -> Option<Self::Output> {
                if validator.is_valid(&<$first as Shape>::schema(), &value) {
                    return <$first as Shape>::project(value, validator).map($one_of::$first);
                }
                $(
                    if validator.is_valid(&<$rest as Shape>::schema(), &value) {
                        return <$rest as Shape>::project(value, validator).map($one_of::$rest);
                    }
                )+
                None
            }
        }
    };
}

union_shape!(Union2 => OneOf2 { A, B });
union_shape!(Union3 => OneOf3 { A, B, C });
union_shape!(Union4 => OneOf4 { A, B, C, D });

// ————————————————————————————————————————————————————————————————————————————
// DECLARATION MACROS
// ————————————————————————————————————————————————————————————————————————————

/// Declare a unit type that is the singleton type of a string or number
/// literal, and make it a [`Shape`](crate::typed::Shape).
///
/// ```
/// json_shape::literal!(pub Admin = "admin");
/// ```
#[macro_export]
macro_rules! literal {
    ($(#[$meta:meta])* $vis:vis $name:ident = $value:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::typed::Shape for $name {
            type Output = $name;

            fn schema() -> $crate::Schema {
                $crate::schema::literal($value)
            }

            fn project(
                value: $crate::serde_json::Value,
                _: &$crate::Validator,
            ) -> ::std::option::Option<$name> {
                $crate::schema::Literal::from($value).matches(&value).then_some($name)
            }
        }
    };
}

/// Declare a struct whose fields are typed by shapes, and make it the
/// [`Shape`](crate::typed::Shape) of the matching object schema.
///
/// Field types are `<S as Shape>::Output`; every field is `pub`. Keys not
/// declared here are ignored, as with any object schema.
///
/// The JSON key is the field name with any `r#` prefix removed. A field can
/// name its key explicitly when it is not a Rust identifier:
///
/// ```
/// use json_shape::typed::{self, Str};
/// use serde_json::json;
///
/// json_shape::record! {
///     pub struct Person {
///         r#type: Str,
///         first_name = "first-name": Str,
///     }
/// }
///
/// let p = typed::parse::<Person>(json!({"type": "human", "first-name": "Ada"})).unwrap();
/// assert_eq!((p.r#type.as_str(), p.first_name.as_str()), ("human", "Ada"));
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident $(= $key:literal)? : $shape:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: <$shape as $crate::typed::Shape>::Output, )*
        }

        impl $crate::typed::Shape for $name {
            type Output = $name;

            fn schema() -> $crate::Schema {
                let fields: ::std::vec::Vec<(&'static str, $crate::Schema)> = ::std::vec![
                    $( ($crate::__record_key!($field $(, $key)?), <$shape as $crate::typed::Shape>::schema()), )*
                ];
                $crate::schema::object(fields)
            }

            #[allow(unused_mut, unused_variables)]
            fn project(
                value: $crate::serde_json::Value,
                validator: &$crate::Validator,
            ) -> ::std::option::Option<$name> {
                let $crate::serde_json::Value::Object(mut map) = value else {
                    return ::std::option::Option::None;
                };
                ::std::option::Option::Some($name {
                    $(
                        $field: <$shape as $crate::typed::Shape>::project(
                            map.remove($crate::__record_key!($field $(, $key)?))?,
                            validator,
                        )?,
                    )*
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_key {
    ($field:ident) => {
        $crate::typed::field_key(stringify!($field))
    };
    ($field:ident, $key:literal) => {
        $key
    };
}

/// JSON key for a `record!` field: the identifier without a raw `r#` prefix.
#[doc(hidden)]
pub fn field_key(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathSegment;
    use serde_json::json;

    crate::literal!(Admin = "admin");
    crate::literal!(Five = 5);

    crate::record! {
        #[derive(Debug, Clone, PartialEq)]
        struct User {
            name: Str,
            age: Num,
            tags: ArrayOf<Str>,
        }
    }

    crate::record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Item {
            id: Num,
        }
    }

    crate::record! {
        #[derive(Debug, PartialEq)]
        struct Empty {}
    }

    crate::record! {
        #[derive(Debug, Clone, PartialEq)]
        struct Wide {
            id: Num,
            x: Num,
        }
    }

    crate::record! {
        #[derive(Debug, PartialEq)]
        struct Tagged {
            r#type: Str,
            first_name = "first-name": Str,
        }
    }

    #[test]
    fn leaves_project_to_primitives() {
        assert_eq!(parse::<Num>(json!(1.5)).unwrap(), 1.5);
        assert_eq!(parse::<Str>(json!("x")).unwrap(), "x");
        assert!(parse::<Bool>(json!(true)).unwrap());
        assert!(parse::<Num>(json!("1")).is_err());
    }

    #[test]
    fn literal_is_a_singleton_type() {
        assert_eq!(Admin::schema(), schema::literal("admin"));
        assert_eq!(parse::<Admin>(json!("admin")).unwrap(), Admin);
        assert_eq!(parse::<Five>(json!(5)).unwrap(), Five);
        let err = parse::<Five>(json!(6)).unwrap_err();
        assert_eq!(err.to_string(), "expected literal 5, got 6");
    }

    #[test]
    fn record_projects_declared_fields() {
        let user: User = parse::<User>(json!({
            "name": "a",
            "age": 1,
            "tags": ["x", "y"],
            "extra": true,
        }))
        .unwrap();
        assert_eq!(user, User { name: "a".into(), age: 1.0, tags: vec!["x".into(), "y".into()] });

        let err = parse::<User>(json!({"name": "a", "tags": []})).unwrap_err();
        assert_eq!(err.path().segments(), &[PathSegment::key("age")]);
    }

    #[test]
    fn record_schema_matches_declaration() {
        assert_eq!(
            User::schema(),
            schema::object([
                ("name", schema::string()),
                ("age", schema::number()),
                ("tags", schema::array(schema::string())),
            ])
        );
        assert_eq!(parse::<Empty>(json!({"anything": 1})).unwrap(), Empty {});
    }

    #[test]
    fn nested_records_and_arrays() {
        let items = parse::<ArrayOf<Item>>(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(items, vec![Item { id: 1.0 }, Item { id: 2.0 }]);

        let err = parse::<ArrayOf<Item>>(json!([{"id": 1}, {"id": "x"}])).unwrap_err();
        assert_eq!(err.path().segments(), &[PathSegment::Index(1), PathSegment::key("id")]);
    }

    #[test]
    fn unions_tag_first_matching_alternative() {
        type NumOrStr = Union2<Num, Str>;
        assert_eq!(parse::<NumOrStr>(json!(1)).unwrap(), OneOf2::A(1.0));
        assert_eq!(parse::<NumOrStr>(json!("x")).unwrap(), OneOf2::B("x".into()));
        assert!(parse::<NumOrStr>(json!(true)).is_err());

        // both alternatives accept 5; declaration order decides
        type Overlap = Union3<Five, Num, Admin>;
        assert_eq!(parse::<Overlap>(json!(5)).unwrap(), OneOf3::A(Five));
        assert_eq!(parse::<Overlap>(json!(6)).unwrap(), OneOf3::B(6.0));
        assert_eq!(parse::<Overlap>(json!("admin")).unwrap(), OneOf3::C(Admin));
    }

    #[test]
    fn typed_handle_reuses_schema() {
        let users = Typed::<ArrayOf<Union2<Item, Num>>>::new();
        assert_eq!(users.schema(), &<ArrayOf<Union2<Item, Num>>>::schema());
        let out = users.parse(json!([{"id": 3}, 4])).unwrap();
        assert_eq!(out, vec![OneOf2::A(Item { id: 3.0 }), OneOf2::B(4.0)]);
    }

    #[test]
    fn union_arm_follows_the_active_validator() {
        let strict = Validator::new(crate::validate::Config::strict());
        let value = json!({"id": 1, "x": 2});

        // lax: the narrower record already accepts the extra key
        assert_eq!(parse::<Union2<Item, Wide>>(value.clone()).unwrap(), OneOf2::A(Item { id: 1.0 }));

        // strict: only the wide record matches, and the tag says so
        let out = parse_with::<Union2<Item, Wide>>(&strict, value.clone()).unwrap();
        assert_eq!(out, OneOf2::B(Wide { id: 1.0, x: 2.0 }));

        let handle = Typed::<ArrayOf<Union2<Item, Wide>>>::with_validator(strict);
        let out = handle.parse(json!([{"id": 1}, value])).unwrap();
        assert_eq!(out, vec![OneOf2::A(Item { id: 1.0 }), OneOf2::B(Wide { id: 1.0, x: 2.0 })]);
    }

    #[test]
    fn record_keys_strip_raw_prefix_and_accept_explicit_names() {
        assert_eq!(
            Tagged::schema(),
            schema::object([("type", schema::string()), ("first-name", schema::string())])
        );
        let t = parse::<Tagged>(json!({"type": "a", "first-name": "b"})).unwrap();
        assert_eq!(t, Tagged { r#type: "a".into(), first_name: "b".into() });

        let err = parse::<Tagged>(json!({"type": "a", "first_name": "b"})).unwrap_err();
        assert_eq!(err.path().segments(), &[PathSegment::key("first-name")]);
    }

    #[test]
    fn strict_validator_applies_to_typed_parse() {
        let strict = Validator::new(crate::validate::Config::strict());
        let err = parse_with::<Item>(&strict, json!({"id": 1, "x": 2})).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownKey { .. }));
    }
}

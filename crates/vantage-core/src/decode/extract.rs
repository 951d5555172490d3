use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};

use crate::error::{Mismatch, SchemaMismatch};

/// A JSON value read as an object whose members keep document order,
/// repeated keys included. Anything else records the type that was found.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Members<V> {
    Object(Vec<(String, V)>),
    Other(&'static str),
}

impl<V> Members<V> {
    pub(crate) fn into_object(
        self,
        section: &str,
        field: &str,
    ) -> Result<Vec<(String, V)>, SchemaMismatch> {
        match self {
            Self::Object(members) => Ok(members),
            Self::Other(found) => Err(SchemaMismatch::new(
                section,
                field,
                Mismatch::NotObject { found },
            )),
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Members<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MembersVisitor(PhantomData))
    }
}

struct MembersVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for MembersVisitor<V> {
    type Value = Members<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(member) = map.next_entry::<String, V>()? {
            members.push(member);
        }
        Ok(Members::Object(members))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Members::Other("array"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Members::Other("string"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Members::Other("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Members::Other("number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Members::Other("number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Members::Other("number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Members::Other("null"))
    }
}

/// Return the text stored under `field`, unmodified.
///
/// `section` only labels the error so a failure points at the exact place in
/// the response that broke.
pub fn text_field<'a>(
    object: &'a Map<String, Value>,
    section: &str,
    field: &str,
) -> Result<&'a str, SchemaMismatch> {
    match object.get(field) {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(SchemaMismatch::new(
            section,
            field,
            Mismatch::NotText {
                found: type_name(other),
            },
        )),
        None => Err(SchemaMismatch::new(section, field, Mismatch::Missing)),
    }
}

/// Return the nested object stored under `field`, or `None` when absent.
pub fn object_field<'a>(
    object: &'a Map<String, Value>,
    section: &str,
    field: &str,
) -> Result<Option<&'a Map<String, Value>>, SchemaMismatch> {
    match object.get(field) {
        Some(value) => as_object(value, section, field).map(Some),
        None => Ok(None),
    }
}

/// Like [`object_field`], but absence is an error.
pub fn required_object_field<'a>(
    object: &'a Map<String, Value>,
    section: &str,
    field: &str,
) -> Result<&'a Map<String, Value>, SchemaMismatch> {
    object_field(object, section, field)?
        .ok_or_else(|| SchemaMismatch::new(section, field, Mismatch::Missing))
}

pub fn as_object<'a>(
    value: &'a Value,
    section: &str,
    field: &str,
) -> Result<&'a Map<String, Value>, SchemaMismatch> {
    value.as_object().ok_or_else(|| {
        SchemaMismatch::new(
            section,
            field,
            Mismatch::NotObject {
                found: type_name(value),
            },
        )
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

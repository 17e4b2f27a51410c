use indexmap::IndexMap;
use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    mem,
};

/// Order preserving mapping used for objects. Inserting an existing key
/// replaces its value in place.
pub type Map = IndexMap<Value, Value>;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    String(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Array(Vec<Value>),
    Object(Map),
}

/// Runtime type of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Null,
    Bool,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    Array,
    Object,
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Self::Null => Tag::Null,
            Self::Bool(_) => Tag::Bool,
            Self::String(_) => Tag::String,
            Self::Int8(_) => Tag::Int8,
            Self::Int16(_) => Tag::Int16,
            Self::Int32(_) => Tag::Int32,
            Self::Int64(_) => Tag::Int64,
            Self::UInt8(_) => Tag::UInt8,
            Self::UInt16(_) => Tag::UInt16,
            Self::UInt32(_) => Tag::UInt32,
            Self::UInt64(_) => Tag::UInt64,
            Self::Float(_) => Tag::Float,
            Self::Double(_) => Tag::Double,
            Self::Array(_) => Tag::Array,
            Self::Object(_) => Tag::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(str) => Some(str),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(bool) => Some(*bool),
            _ => None,
        }
    }

    /// Any signed or unsigned integer that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int8(num) => Some(num.into()),
            Self::Int16(num) => Some(num.into()),
            Self::Int32(num) => Some(num.into()),
            Self::Int64(num) => Some(num),
            Self::UInt8(num) => Some(num.into()),
            Self::UInt16(num) => Some(num.into()),
            Self::UInt32(num) => Some(num.into()),
            Self::UInt64(num) => i64::try_from(num).ok(),
            _ => None,
        }
    }

    /// Any non negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Self::UInt8(num) => Some(num.into()),
            Self::UInt16(num) => Some(num.into()),
            Self::UInt32(num) => Some(num.into()),
            Self::UInt64(num) => Some(num),
            Self::Int8(_) | Self::Int16(_) | Self::Int32(_) | Self::Int64(_) => {
                self.as_i64().and_then(|num| u64::try_from(num).ok())
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(num) => Some(num.into()),
            Self::Double(num) => Some(num),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up a string key when `self` is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(&Value::String(key.to_owned()))
    }

    pub fn unwrap_null(&self) {
        match self {
            Self::Null => (),
            _ => panic!("Try to get null, but value is not null: {}", self),
        }
    }

    pub fn unwrap_string(&self) -> &str {
        match self {
            Self::String(str) => str,
            _ => panic!("Try to get string, but value is not a string: {}", self),
        }
    }

    pub fn unwrap_bool(&self) -> bool {
        match self {
            Self::Bool(bool) => *bool,
            _ => panic!("Try to get bool, but value is not a bool: {}", self),
        }
    }

    pub fn unwrap_array(&self) -> &Vec<Value> {
        match self {
            Self::Array(array) => array,
            _ => panic!("Try to get array, but value is not a array: {}", self),
        }
    }

    pub fn unwrap_object(&self) -> &Map {
        match self {
            Self::Object(obj) => obj,
            _ => panic!("Try to get object, but value is not a object: {}", self),
        }
    }
}

// Floats compare by bit pattern so that values can be used as object keys.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Int8(a), Self::Int8(b)) => a == b,
            (Self::Int16(a), Self::Int16(b)) => a == b,
            (Self::Int32(a), Self::Int32(b)) => a == b,
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::UInt8(a), Self::UInt8(b)) => a == b,
            (Self::UInt16(a), Self::UInt16(b)) => a == b,
            (Self::UInt32(a), Self::UInt32(b)) => a == b,
            (Self::UInt64(a), Self::UInt64(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);

        match self {
            Self::Null => (),
            Self::Bool(bool) => bool.hash(state),
            Self::String(str) => str.hash(state),
            Self::Int8(num) => num.hash(state),
            Self::Int16(num) => num.hash(state),
            Self::Int32(num) => num.hash(state),
            Self::Int64(num) => num.hash(state),
            Self::UInt8(num) => num.hash(state),
            Self::UInt16(num) => num.hash(state),
            Self::UInt32(num) => num.hash(state),
            Self::UInt64(num) => num.hash(state),
            Self::Float(num) => num.to_bits().hash(state),
            Self::Double(num) => num.to_bits().hash(state),
            Self::Array(array) => array.hash(state),
            // Object equality ignores entry order, so only the length is hashed.
            Self::Object(obj) => obj.len().hash(state),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = crate::to_string(self).map_err(|_| std::fmt::Error)?;

        f.write_str(&json)
    }
}

macro_rules! from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

from_primitive! {
    bool => Bool,
    String => String,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    Vec<Value> => Array,
    Map => Object,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

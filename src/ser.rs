use serde::{
    ser::{Serialize, SerializeMap, SerializeSeq},
    Serializer,
};

use crate::value::Value;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(bool) => serializer.serialize_bool(*bool),
            Self::String(str) => serializer.serialize_str(str),
            Self::Int8(num) => serializer.serialize_i8(*num),
            Self::Int16(num) => serializer.serialize_i16(*num),
            Self::Int32(num) => serializer.serialize_i32(*num),
            Self::Int64(num) => serializer.serialize_i64(*num),
            Self::UInt8(num) => serializer.serialize_u8(*num),
            Self::UInt16(num) => serializer.serialize_u16(*num),
            Self::UInt32(num) => serializer.serialize_u32(*num),
            Self::UInt64(num) => serializer.serialize_u64(*num),
            Self::Float(num) => serializer.serialize_f32(*num),
            Self::Double(num) => serializer.serialize_f64(*num),
            Self::Array(array) => {
                let mut seq = serializer.serialize_seq(Some(array.len()))?;

                for v in array {
                    seq.serialize_element(v)?;
                }

                seq.end()
            }
            Self::Object(obj) => {
                let mut map = serializer.serialize_map(Some(obj.len()))?;

                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }

                map.end()
            }
        }
    }
}

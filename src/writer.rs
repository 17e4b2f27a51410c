//! Compact JSON writer.
//!
//! The writer is a [`serde::Serializer`], so the per-type dispatch is serde's
//! data model: every primitive a [`Value`](crate::value::Value) can hold has
//! an emitter, sequences become arrays and maps become objects. Strings are
//! written between quotes as they are, without escaping.
//!
//! Shapes outside of that model (structs, enums, tuples, chars, 128 bit
//! integers) are reported with a warning and write nothing, which leaves the
//! surrounding array or object with an empty slot. Byte arrays write nothing
//! without a warning.

use crate::error::Error;
use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use std::fmt::Write;

/// Initial capacity of the output buffer.
pub const INITIAL_CAPACITY: usize = 1024;

pub struct Writer {
    output: String,
}

impl Default for Writer {
    fn default() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn unsupported(&self, name: &str) {
        log::warn!("Type not supported for JSON serialization: {}", name);
    }
}

/// Serializes any value to compact JSON text.
pub fn to_string<T>(value: &T) -> Result<String, Error>
where
    T: ?Sized + Serialize,
{
    let mut writer = Writer::default();

    value.serialize(&mut writer)?;

    Ok(writer.into_inner())
}

impl<'a> Serializer for &'a mut Writer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Skipped;
    type SerializeTupleStruct = Skipped;
    type SerializeTupleVariant = Skipped;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Skipped;
    type SerializeStructVariant = Skipped;

    fn serialize_bool(self, v: bool) -> Result<(), Error> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), Error> {
        self.unsupported("i128");
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<(), Error> {
        write!(self.output, "{}", v)?;
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), Error> {
        self.unsupported("u128");
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), Error> {
        write!(self.output, "{:.7}", v)?;
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<(), Error> {
        write!(self.output, "{:.15}", v)?;
        Ok(())
    }

    fn serialize_char(self, _v: char) -> Result<(), Error> {
        self.unsupported("char");
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<(), Error> {
        self.output.push('"');
        self.output.push_str(v);
        self.output.push('"');
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<(), Error> {
        log::trace!("skipping byte array of length {}", v.len());
        Ok(())
    }

    fn serialize_none(self) -> Result<(), Error> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Error> {
        self.output.push_str("null");
        Ok(())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<(), Error> {
        self.unsupported(name);
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), Error> {
        self.unsupported(name);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.unsupported(name);
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Error> {
        self.output.push('[');

        Ok(Compound {
            writer: self,
            first: true,
            close: ']',
        })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Error> {
        self.unsupported("tuple");
        Ok(Skipped)
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Error> {
        self.unsupported(name);
        Ok(Skipped)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Error> {
        self.unsupported(name);
        Ok(Skipped)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Error> {
        self.output.push('{');

        Ok(Compound {
            writer: self,
            first: true,
            close: '}',
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Error> {
        self.unsupported(name);
        Ok(Skipped)
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Error> {
        self.unsupported(name);
        Ok(Skipped)
    }
}

/// An array or object being written.
pub struct Compound<'a> {
    writer: &'a mut Writer,
    first: bool,
    close: char,
}

impl<'a> Compound<'a> {
    fn separator(&mut self) {
        if !self.first {
            self.writer.output.push(',');
        }
        self.first = false;
    }

    fn finish(self) -> Result<(), Error> {
        self.writer.output.push(self.close);
        Ok(())
    }
}

impl<'a> SerializeSeq for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.separator();
        value.serialize(&mut *self.writer)
    }

    fn end(self) -> Result<(), Error> {
        self.finish()
    }
}

impl<'a> SerializeMap for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.separator();
        key.serialize(&mut *self.writer)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.writer.output.push(':');
        value.serialize(&mut *self.writer)
    }

    fn end(self) -> Result<(), Error> {
        self.finish()
    }
}

/// Swallows the fields of a shape the writer does not support.
pub struct Skipped;

impl SerializeTuple for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl SerializeTupleStruct for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl SerializeTupleVariant for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl SerializeStruct for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

impl SerializeStructVariant for Skipped {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<(), Error> {
        Ok(())
    }
}

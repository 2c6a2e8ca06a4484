use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Primitive, TypeRef};

/// A constant together with the type it was encoded as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
	/// Encoded type of the value.
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// The payload.
	pub value: Value,
}

/// Payload of a [`TypedValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
	/// The null reference (or a defaulted value type).
	Null,
	/// A boolean.
	Bool(bool),
	/// A UTF-16 character.
	Char(char),
	/// Any integral value, signed or unsigned.
	Integer(i128),
	/// A `float` or `double` value.
	///
	/// A `decimal` given this way loses precision past 17 significant digits;
	/// prefer [`Value::Decimal`].
	Floating(f64),
	/// A `decimal` in invariant text form (`-12.50`), kept exact.
	Decimal(String),
	/// A string.
	String(String),
	/// An enum value given by its raw bits.
	Enum {
		/// Raw underlying value.
		raw: i128,
		/// Whether the enum type is a flags enum.
		#[serde(default)]
		flags: bool,
	},
	/// A type literal (`typeof`).
	Type(TypeRef),
	/// An array of values.
	Array(Vec<TypedValue>),
	/// A tuple of values.
	Tuple(Vec<TypedValue>),
	/// A value with no literal form, carried as the provider's string rendering.
	Opaque(String),
}

impl TypedValue {
	/// Pair a payload with its type.
	pub fn new(ty: TypeRef, value: Value) -> Self {
		Self { ty, value }
	}

	/// A null value of type `ty`.
	pub fn null(ty: TypeRef) -> Self {
		Self::new(ty, Value::Null)
	}

	/// A boolean.
	pub fn bool(value: bool) -> Self {
		Self::new(TypeRef::primitive(Primitive::Bool), Value::Bool(value))
	}

	/// A char.
	pub fn char(value: char) -> Self {
		Self::new(TypeRef::primitive(Primitive::Char), Value::Char(value))
	}

	/// An `int`.
	pub fn int(value: i32) -> Self {
		Self::new(TypeRef::primitive(Primitive::Int), Value::Integer(value.into()))
	}

	/// An integral value of the given primitive type.
	pub fn integer(primitive: Primitive, value: i128) -> Self {
		Self::new(TypeRef::primitive(primitive), Value::Integer(value))
	}

	/// A `double`.
	pub fn double(value: f64) -> Self {
		Self::new(TypeRef::primitive(Primitive::Double), Value::Floating(value))
	}

	/// A `decimal` given by its invariant text.
	pub fn decimal(text: &str) -> Self {
		Self::new(TypeRef::primitive(Primitive::Decimal), Value::Decimal(text.to_string()))
	}

	/// A string.
	pub fn string(value: &str) -> Self {
		Self::new(
			TypeRef::primitive(Primitive::String),
			Value::String(value.to_string()),
		)
	}

	/// An enum value.
	pub fn enum_value(ty: TypeRef, raw: i128, flags: bool) -> Self {
		Self::new(ty, Value::Enum { raw, flags })
	}

	/// A `typeof` literal.
	pub fn type_of(ty: TypeRef) -> Self {
		Self::new(TypeRef::named("System", "Type"), Value::Type(ty))
	}

	/// An array with elements of type `element`.
	pub fn array(element: TypeRef, items: Vec<TypedValue>) -> Self {
		Self::new(TypeRef::array(element), Value::Array(items))
	}

	/// The integral payload, whether encoded as an integer or an enum.
	pub fn raw_value(&self) -> Option<i128> {
		match self.value {
			Value::Integer(value) | Value::Enum { raw: value, .. } => Some(value),
			_ => None,
		}
	}

	/// Whether the payload is the integral value `raw`.
	pub fn has_raw_value(&self, raw: i128) -> bool {
		self.raw_value() == Some(raw)
	}
}

impl fmt::Display for TypedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.value.fmt(f)
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "null"),
			Self::Bool(value) => write!(f, "{value}"),
			Self::Char(value) => write!(f, "{value}"),
			Self::Integer(value) | Self::Enum { raw: value, .. } => write!(f, "{value}"),
			Self::Floating(value) => write!(f, "{value}"),
			Self::String(value) | Self::Decimal(value) | Self::Opaque(value) => write!(f, "{value}"),
			Self::Type(ty) => write!(f, "{}", ty.full_name()),
			Self::Array(items) | Self::Tuple(items) => {
				let items = items
					.iter()
					.map(ToString::to_string)
					.collect::<Vec<_>>()
					.join(", ");
				write!(f, "{{{items}}}")
			}
		}
	}
}

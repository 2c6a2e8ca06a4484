use serde::{Deserialize, Serialize};

/// Built-in types that carry a language keyword alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
	/// `void` (`System.Void`).
	Void,
	/// `bool` (`System.Boolean`).
	Bool,
	/// `char` (`System.Char`).
	Char,
	/// `sbyte` (`System.SByte`).
	SByte,
	/// `byte` (`System.Byte`).
	Byte,
	/// `short` (`System.Int16`).
	Short,
	/// `ushort` (`System.UInt16`).
	UShort,
	/// `int` (`System.Int32`).
	Int,
	/// `uint` (`System.UInt32`).
	UInt,
	/// `long` (`System.Int64`).
	Long,
	/// `ulong` (`System.UInt64`).
	ULong,
	/// `nint` (`System.IntPtr`).
	NInt,
	/// `nuint` (`System.UIntPtr`).
	NUInt,
	/// `float` (`System.Single`).
	Float,
	/// `double` (`System.Double`).
	Double,
	/// `decimal` (`System.Decimal`).
	Decimal,
	/// `string` (`System.String`).
	String,
	/// `object` (`System.Object`).
	Object,
}

impl Primitive {
	const ALL: [Primitive; 18] = [
		Self::Void,
		Self::Bool,
		Self::Char,
		Self::SByte,
		Self::Byte,
		Self::Short,
		Self::UShort,
		Self::Int,
		Self::UInt,
		Self::Long,
		Self::ULong,
		Self::NInt,
		Self::NUInt,
		Self::Float,
		Self::Double,
		Self::Decimal,
		Self::String,
		Self::Object,
	];

	/// The keyword alias, e.g. `int`.
	pub fn alias(self) -> &'static str {
		match self {
			Self::Void => "void",
			Self::Bool => "bool",
			Self::Char => "char",
			Self::SByte => "sbyte",
			Self::Byte => "byte",
			Self::Short => "short",
			Self::UShort => "ushort",
			Self::Int => "int",
			Self::UInt => "uint",
			Self::Long => "long",
			Self::ULong => "ulong",
			Self::NInt => "nint",
			Self::NUInt => "nuint",
			Self::Float => "float",
			Self::Double => "double",
			Self::Decimal => "decimal",
			Self::String => "string",
			Self::Object => "object",
		}
	}

	/// The runtime type name inside the `System` namespace, e.g. `Int32`.
	pub fn runtime_name(self) -> &'static str {
		match self {
			Self::Void => "Void",
			Self::Bool => "Boolean",
			Self::Char => "Char",
			Self::SByte => "SByte",
			Self::Byte => "Byte",
			Self::Short => "Int16",
			Self::UShort => "UInt16",
			Self::Int => "Int32",
			Self::UInt => "UInt32",
			Self::Long => "Int64",
			Self::ULong => "UInt64",
			Self::NInt => "IntPtr",
			Self::NUInt => "UIntPtr",
			Self::Float => "Single",
			Self::Double => "Double",
			Self::Decimal => "Decimal",
			Self::String => "String",
			Self::Object => "Object",
		}
	}

	/// Namespace every primitive lives in.
	pub const NAMESPACE: &'static str = "System";

	/// Look up a primitive by its runtime name inside `System`.
	pub fn from_runtime_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|p| p.runtime_name() == name)
	}

	/// Whether values of this type are value types.
	pub fn is_value_type(self) -> bool {
		!matches!(self, Self::String | Self::Object)
	}

	/// Storage width in bytes, `None` for reference types and `void`.
	pub fn size(self) -> Option<u32> {
		match self {
			Self::Bool | Self::SByte | Self::Byte => Some(1),
			Self::Char | Self::Short | Self::UShort => Some(2),
			Self::Int | Self::UInt | Self::Float => Some(4),
			Self::Long | Self::ULong | Self::Double | Self::NInt | Self::NUInt => Some(8),
			Self::Decimal => Some(16),
			Self::Void | Self::String | Self::Object => None,
		}
	}
}

/// Variance annotation on a generic parameter of an interface or delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
	/// Invariant.
	#[default]
	None,
	/// `out T`.
	Covariant,
	/// `in T`.
	Contravariant,
}

/// A type as it is used at a particular site.
///
/// Wrappers (`Array`, `Pointer`, `ByRef`, `Nullable`) always sit outside the
/// generic/tuple/nested structure they wrap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
	/// A built-in type with a keyword alias.
	Primitive {
		/// Which primitive.
		primitive: Primitive,
	},
	/// A single- or multi-dimensional array.
	Array {
		/// Element type.
		element: Box<TypeRef>,
		/// Number of dimensions.
		#[serde(default = "default_rank")]
		rank: u32,
	},
	/// An unmanaged pointer.
	Pointer {
		/// Pointee type.
		element: Box<TypeRef>,
	},
	/// A managed reference (`ref`/`in`/`out` parameter types, ref returns).
	ByRef {
		/// Referenced type.
		element: Box<TypeRef>,
	},
	/// A nullable value type.
	Nullable {
		/// Underlying value type.
		underlying: Box<TypeRef>,
	},
	/// A constructed generic type. `args` holds the arguments of the whole
	/// nesting chain, outermost declaring type first.
	Generic {
		/// The generic type definition.
		definition: Box<TypeRef>,
		/// Type arguments.
		args: Vec<TypeRef>,
	},
	/// A structural value tuple.
	Tuple {
		/// Element types in order.
		elements: Vec<TypeRef>,
	},
	/// A reference to a type or method generic parameter.
	GenericParameter {
		/// Parameter name.
		name: String,
		/// Zero-based position in the declaring parameter list.
		#[serde(default)]
		position: u32,
		/// Declared variance.
		#[serde(default)]
		variance: Variance,
		/// Whether the parameter is declared by a method rather than a type.
		#[serde(default)]
		method: bool,
	},
	/// A type nested inside another type.
	Nested {
		/// The enclosing type (a definition, never a constructed generic).
		declaring: Box<TypeRef>,
		/// Metadata name, including any arity suffix.
		name: String,
		/// Whether the type is a value type.
		#[serde(default)]
		value_type: bool,
	},
	/// A top-level named type.
	Named {
		/// Containing namespace, empty for the global namespace.
		#[serde(default)]
		namespace: String,
		/// Metadata name, including any arity suffix.
		name: String,
		/// Whether the type is a value type.
		#[serde(default)]
		value_type: bool,
	},
}

fn default_rank() -> u32 {
	1
}

/// Split a metadata name like ``List`1`` into its display name and generic arity.
pub fn strip_arity(name: &str) -> (&str, usize) {
	match name.rsplit_once('`') {
		Some((base, arity)) => match arity.parse() {
			Ok(arity) => (base, arity),
			Err(_) => (name, 0),
		},
		None => (name, 0),
	}
}

impl TypeRef {
	/// A top-level reference type.
	pub fn named(namespace: &str, name: &str) -> Self {
		Self::Named {
			namespace: namespace.to_string(),
			name: name.to_string(),
			value_type: false,
		}
	}

	/// A top-level value type.
	pub fn value_type(namespace: &str, name: &str) -> Self {
		Self::Named {
			namespace: namespace.to_string(),
			name: name.to_string(),
			value_type: true,
		}
	}

	/// A nested reference type.
	pub fn nested(declaring: TypeRef, name: &str) -> Self {
		Self::Nested {
			declaring: Box::new(declaring),
			name: name.to_string(),
			value_type: false,
		}
	}

	/// A primitive type.
	pub fn primitive(primitive: Primitive) -> Self {
		Self::Primitive { primitive }
	}

	/// A single-dimensional array of `element`.
	pub fn array(element: TypeRef) -> Self {
		Self::array_of_rank(element, 1)
	}

	/// An array of `element` with `rank` dimensions.
	pub fn array_of_rank(element: TypeRef, rank: u32) -> Self {
		Self::Array {
			element: Box::new(element),
			rank,
		}
	}

	/// A pointer to `element`.
	pub fn pointer(element: TypeRef) -> Self {
		Self::Pointer {
			element: Box::new(element),
		}
	}

	/// A managed reference to `element`.
	pub fn by_ref(element: TypeRef) -> Self {
		Self::ByRef {
			element: Box::new(element),
		}
	}

	/// A nullable value type.
	pub fn nullable(underlying: TypeRef) -> Self {
		Self::Nullable {
			underlying: Box::new(underlying),
		}
	}

	/// A constructed generic type.
	pub fn generic(definition: TypeRef, args: Vec<TypeRef>) -> Self {
		Self::Generic {
			definition: Box::new(definition),
			args,
		}
	}

	/// A value tuple.
	pub fn tuple(elements: Vec<TypeRef>) -> Self {
		Self::Tuple { elements }
	}

	/// An invariant type generic parameter.
	pub fn generic_param(name: &str, position: u32) -> Self {
		Self::GenericParameter {
			name: name.to_string(),
			position,
			variance: Variance::None,
			method: false,
		}
	}

	/// The generic definition of a constructed type, or the type itself.
	pub fn definition(&self) -> &TypeRef {
		match self {
			Self::Generic { definition, .. } => definition,
			other => other,
		}
	}

	/// Whether this is exactly the named top-level type `namespace.name`.
	pub fn is_named(&self, namespace: &str, name: &str) -> bool {
		matches!(self, Self::Named { namespace: ns, name: n, .. } if ns == namespace && n == name)
	}

	/// Whether this refers to the primitive `primitive`, either directly or by its runtime name.
	pub fn is_primitive(&self, primitive: Primitive) -> bool {
		self.as_primitive() == Some(primitive)
	}

	/// The primitive this type denotes, if any.
	pub fn as_primitive(&self) -> Option<Primitive> {
		match self {
			Self::Primitive { primitive } => Some(*primitive),
			Self::Named {
				namespace, name, ..
			} if namespace == Primitive::NAMESPACE => Primitive::from_runtime_name(name),
			_ => None,
		}
	}

	/// Reflection-style full name of a definition: `Namespace.Outer+Inner`.
	pub fn full_name(&self) -> String {
		match self {
			Self::Named {
				namespace, name, ..
			} => {
				if namespace.is_empty() {
					name.clone()
				} else {
					format!("{namespace}.{name}")
				}
			}
			Self::Nested { declaring, name, .. } => format!("{}+{name}", declaring.full_name()),
			Self::Generic { definition, .. } => definition.full_name(),
			Self::Primitive { primitive } => {
				format!("{}.{}", Primitive::NAMESPACE, primitive.runtime_name())
			}
			Self::Array { element, rank } => {
				format!("{}[{}]", element.full_name(), ",".repeat((*rank as usize).saturating_sub(1)))
			}
			Self::Pointer { element } => format!("{}*", element.full_name()),
			Self::ByRef { element } => format!("{}&", element.full_name()),
			Self::Nullable { underlying } => format!("System.Nullable`1[{}]", underlying.full_name()),
			Self::Tuple { elements } => format!("System.ValueTuple`{}", elements.len()),
			Self::GenericParameter { name, .. } => name.clone(),
		}
	}

	/// Whether values of this type are value types, as far as the reference tells.
	pub fn is_value_type(&self) -> bool {
		match self {
			Self::Primitive { primitive } => primitive.is_value_type(),
			Self::Nullable { .. } | Self::Tuple { .. } => true,
			Self::Named { value_type, .. } | Self::Nested { value_type, .. } => {
				*value_type || self.as_primitive().is_some_and(Primitive::is_value_type)
			}
			Self::Generic { definition, .. } => definition.is_value_type(),
			Self::ByRef { element } => element.is_value_type(),
			Self::Array { .. } | Self::Pointer { .. } | Self::GenericParameter { .. } => false,
		}
	}

	/// Whether `null` is a valid value of this type.
	pub fn accepts_null(&self) -> bool {
		match self {
			Self::Nullable { .. } | Self::Array { .. } | Self::Pointer { .. } => true,
			Self::GenericParameter { .. } | Self::Tuple { .. } => false,
			Self::Generic { definition, .. } => {
				definition.is_named("System", "Nullable`1") || !definition.is_value_type()
			}
			Self::ByRef { element } => element.accepts_null(),
			other => !other.is_value_type(),
		}
	}

	/// Whether a pointer type appears anywhere in this reference.
	pub fn contains_pointer(&self) -> bool {
		match self {
			Self::Pointer { .. } => true,
			Self::Array { element, .. } | Self::ByRef { element } => element.contains_pointer(),
			Self::Nullable { underlying } => underlying.contains_pointer(),
			Self::Generic { args, .. } => args.iter().any(Self::contains_pointer),
			Self::Tuple { elements } => elements.iter().any(Self::contains_pointer),
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strip_arity_splits_suffix() {
		assert_eq!(strip_arity("List`1"), ("List", 1));
		assert_eq!(strip_arity("Dictionary`2"), ("Dictionary", 2));
		assert_eq!(strip_arity("Plain"), ("Plain", 0));
		assert_eq!(strip_arity("Odd`x"), ("Odd`x", 0));
	}

	#[test]
	fn runtime_names_resolve_to_primitives() {
		let int32 = TypeRef::value_type("System", "Int32");
		assert!(int32.is_primitive(Primitive::Int));
		assert!(int32.is_value_type());
		assert!(!TypeRef::named("System", "Int32Holder").is_value_type());
	}

	#[test]
	fn null_acceptance_follows_value_typeness() {
		assert!(TypeRef::primitive(Primitive::String).accepts_null());
		assert!(!TypeRef::primitive(Primitive::Int).accepts_null());
		assert!(TypeRef::nullable(TypeRef::primitive(Primitive::Int)).accepts_null());
		assert!(TypeRef::array(TypeRef::primitive(Primitive::Int)).accepts_null());
		assert!(!TypeRef::generic_param("T", 0).accepts_null());
		let nullable = TypeRef::generic(
			TypeRef::value_type("System", "Nullable`1"),
			vec![TypeRef::primitive(Primitive::Int)],
		);
		assert!(nullable.accepts_null());
	}

	#[test]
	fn pointers_are_found_through_wrappers() {
		let ty = TypeRef::array(TypeRef::pointer(TypeRef::primitive(Primitive::Byte)));
		assert!(ty.contains_pointer());
		assert!(!TypeRef::array(TypeRef::primitive(Primitive::Byte)).contains_pointer());
	}

	#[test]
	fn full_name_uses_plus_for_nesting() {
		let inner = TypeRef::nested(TypeRef::named("Ns", "Outer`1"), "Inner");
		assert_eq!(inner.full_name(), "Ns.Outer`1+Inner");
	}
}

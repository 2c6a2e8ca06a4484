use serde::{Deserialize, Serialize};

use crate::attribute::AttributeInstance;
use crate::nullability::{NullabilityInfo, NullableContext};
use crate::typedef::GenericParameterDef;
use crate::types::{Primitive, TypeRef};
use crate::value::TypedValue;

/// Declared accessibility, ordered from most restrictive to most permissive.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
	/// `private`.
	#[default]
	Private,
	/// `private protected` (family and assembly).
	PrivateProtected,
	/// `internal` (assembly).
	Internal,
	/// `protected` (family).
	Protected,
	/// `protected internal` (family or assembly).
	ProtectedInternal,
	/// `public`.
	Public,
}

impl Accessibility {
	/// The keyword(s) spelling this accessibility.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::Private => "private",
			Self::PrivateProtected => "private protected",
			Self::Internal => "internal",
			Self::Protected => "protected",
			Self::ProtectedInternal => "protected internal",
			Self::Public => "public",
		}
	}

	/// Whether code outside the declaring assembly can see the symbol.
	pub fn is_externally_visible(self) -> bool {
		matches!(self, Self::Public | Self::Protected | Self::ProtectedInternal)
	}
}

/// A method or indexer parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
	/// Parameter name; may be empty in stripped metadata.
	#[serde(default)]
	pub name: String,
	/// Declared type; by-ref parameters carry a [`TypeRef::ByRef`].
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// `[In]` flag; with a by-ref type this is an `in` parameter.
	#[serde(default)]
	pub is_in: bool,
	/// `[Out]` flag; with a by-ref type this is an `out` parameter.
	#[serde(default)]
	pub is_out: bool,
	/// Whether this is a `params` array.
	#[serde(default)]
	pub is_param_array: bool,
	/// Default value of an optional parameter.
	#[serde(default)]
	pub default_value: Option<TypedValue>,
	/// Attributes applied to the parameter.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Nullability annotations of the parameter type.
	#[serde(default)]
	pub nullability: Option<NullabilityInfo>,
	/// Tuple element names of the parameter type, in pre-order.
	#[serde(default)]
	pub tuple_names: Vec<Option<String>>,
}

impl Parameter {
	/// A plain parameter.
	pub fn new(name: &str, ty: TypeRef) -> Self {
		Self {
			name: name.to_string(),
			ty,
			is_in: false,
			is_out: false,
			is_param_array: false,
			default_value: None,
			attributes: Vec::new(),
			nullability: None,
			tuple_names: Vec::new(),
		}
	}
}

/// The return value of a method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnValue {
	/// Return type; ref returns carry a [`TypeRef::ByRef`].
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// Whether a ref return is `ref readonly`.
	#[serde(default)]
	pub is_readonly_ref: bool,
	/// Attributes applied to the return value.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Nullability annotations of the return type.
	#[serde(default)]
	pub nullability: Option<NullabilityInfo>,
	/// Tuple element names of the return type, in pre-order.
	#[serde(default)]
	pub tuple_names: Vec<Option<String>>,
}

impl ReturnValue {
	/// A return value of type `ty` with no decorations.
	pub fn new(ty: TypeRef) -> Self {
		Self {
			ty,
			is_readonly_ref: false,
			attributes: Vec::new(),
			nullability: None,
			tuple_names: Vec::new(),
		}
	}
}

impl Default for ReturnValue {
	fn default() -> Self {
		Self::new(TypeRef::primitive(Primitive::Void))
	}
}

/// A method, constructor, destructor, operator or accessor as raw metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
	/// Metadata name (`.ctor`, `op_Addition`, `get_Item`, `Ns.IFace.Method`, ...).
	pub name: String,
	/// Declared accessibility.
	#[serde(default)]
	pub accessibility: Accessibility,
	/// `static` flag.
	#[serde(default)]
	pub is_static: bool,
	/// `abstract` flag.
	#[serde(default)]
	pub is_abstract: bool,
	/// `virtual` flag.
	#[serde(default)]
	pub is_virtual: bool,
	/// `final` flag.
	#[serde(default)]
	pub is_final: bool,
	/// Special-name flag (accessors, operators, constructors).
	#[serde(default)]
	pub is_special_name: bool,
	/// Implemented externally (`extern`).
	#[serde(default)]
	pub is_extern: bool,
	/// A `readonly` struct member.
	#[serde(default)]
	pub is_readonly: bool,
	/// Emitted by the compiler rather than declared in source.
	#[serde(default)]
	pub is_compiler_generated: bool,
	/// Declaring type of the method's base definition, when it differs from
	/// the method's own declaring type the method is an override.
	#[serde(default)]
	pub base_definition: Option<TypeRef>,
	/// Provider-supplied "hides an inherited member" signal, if available.
	#[serde(default)]
	pub hides_inherited: Option<bool>,
	/// Method generic parameters.
	#[serde(default)]
	pub generic_parameters: Vec<GenericParameterDef>,
	/// Parameters in order.
	#[serde(default)]
	pub parameters: Vec<Parameter>,
	/// Return value.
	#[serde(default)]
	pub return_value: ReturnValue,
	/// Attributes applied to the method.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Member-level nullable context override.
	#[serde(default)]
	pub nullable_context: Option<NullableContext>,
}

impl MethodDef {
	/// A public, non-virtual instance method returning `void`.
	pub fn new(name: &str) -> Self {
		Self {
			name: name.to_string(),
			accessibility: Accessibility::Public,
			is_static: false,
			is_abstract: false,
			is_virtual: false,
			is_final: false,
			is_special_name: false,
			is_extern: false,
			is_readonly: false,
			is_compiler_generated: false,
			base_definition: None,
			hides_inherited: None,
			generic_parameters: Vec::new(),
			parameters: Vec::new(),
			return_value: ReturnValue::default(),
			attributes: Vec::new(),
			nullable_context: None,
		}
	}

	/// Whether the method is an instance or static constructor.
	pub fn is_constructor(&self) -> bool {
		self.name == ".ctor" || self.name == ".cctor"
	}
}

/// Layout of a fixed-size inline buffer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedBuffer {
	/// Element type of the buffer.
	pub element: Primitive,
	/// Number of elements.
	pub length: u32,
}

/// A field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
	/// Field name.
	pub name: String,
	/// Field type.
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// Declared accessibility.
	#[serde(default)]
	pub accessibility: Accessibility,
	/// `static` flag.
	#[serde(default)]
	pub is_static: bool,
	/// Literal (`const`) flag.
	#[serde(default)]
	pub is_literal: bool,
	/// Init-only (`readonly`) flag.
	#[serde(default)]
	pub is_init_only: bool,
	/// `volatile` modifier.
	#[serde(default)]
	pub is_volatile: bool,
	/// Emitted by the compiler rather than declared in source.
	#[serde(default)]
	pub is_compiler_generated: bool,
	/// Provider-supplied "hides an inherited member" signal, if available.
	#[serde(default)]
	pub hides_inherited: Option<bool>,
	/// Compile-time constant of a literal field.
	#[serde(default)]
	pub constant: Option<TypedValue>,
	/// Observed value of a static read-only field.
	#[serde(default)]
	pub value: Option<TypedValue>,
	/// Inline buffer layout for `fixed` fields.
	#[serde(default)]
	pub fixed_buffer: Option<FixedBuffer>,
	/// Attributes applied to the field.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Nullability annotations of the field type.
	#[serde(default)]
	pub nullability: Option<NullabilityInfo>,
	/// Tuple element names of the field type, in pre-order.
	#[serde(default)]
	pub tuple_names: Vec<Option<String>>,
	/// Member-level nullable context override.
	#[serde(default)]
	pub nullable_context: Option<NullableContext>,
}

impl FieldDef {
	/// A public instance field.
	pub fn new(name: &str, ty: TypeRef) -> Self {
		Self {
			name: name.to_string(),
			ty,
			accessibility: Accessibility::Public,
			is_static: false,
			is_literal: false,
			is_init_only: false,
			is_volatile: false,
			is_compiler_generated: false,
			hides_inherited: None,
			constant: None,
			value: None,
			fixed_buffer: None,
			attributes: Vec::new(),
			nullability: None,
			tuple_names: Vec::new(),
			nullable_context: None,
		}
	}
}

/// A property or indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
	/// Metadata name (`Item` for the default indexer).
	pub name: String,
	/// Property type.
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// The get accessor.
	#[serde(default)]
	pub getter: Option<MethodDef>,
	/// The set (or init) accessor.
	#[serde(default)]
	pub setter: Option<MethodDef>,
	/// Whether the setter is an `init` accessor.
	#[serde(default)]
	pub is_init_only: bool,
	/// Index parameters; non-empty for indexers.
	#[serde(default)]
	pub index_parameters: Vec<Parameter>,
	/// Attributes applied to the property or its backing field.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Nullability annotations of the property type.
	#[serde(default)]
	pub nullability: Option<NullabilityInfo>,
	/// Tuple element names of the property type, in pre-order.
	#[serde(default)]
	pub tuple_names: Vec<Option<String>>,
	/// Member-level nullable context override.
	#[serde(default)]
	pub nullable_context: Option<NullableContext>,
}

impl PropertyDef {
	/// A property without accessors.
	pub fn new(name: &str, ty: TypeRef) -> Self {
		Self {
			name: name.to_string(),
			ty,
			getter: None,
			setter: None,
			is_init_only: false,
			index_parameters: Vec::new(),
			attributes: Vec::new(),
			nullability: None,
			tuple_names: Vec::new(),
			nullable_context: None,
		}
	}

	/// Accessors that exist, getter first.
	pub fn accessors(&self) -> impl Iterator<Item = &MethodDef> {
		self.getter.iter().chain(self.setter.iter())
	}
}

/// An event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDef {
	/// Event name.
	pub name: String,
	/// Handler type.
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// The add accessor.
	#[serde(default)]
	pub add: Option<MethodDef>,
	/// The remove accessor.
	#[serde(default)]
	pub remove: Option<MethodDef>,
	/// Attributes applied to the event, its accessors or its backing field.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Nullability annotations of the handler type.
	#[serde(default)]
	pub nullability: Option<NullabilityInfo>,
	/// Member-level nullable context override.
	#[serde(default)]
	pub nullable_context: Option<NullableContext>,
}

impl EventDef {
	/// An event without accessors.
	pub fn new(name: &str, ty: TypeRef) -> Self {
		Self {
			name: name.to_string(),
			ty,
			add: None,
			remove: None,
			attributes: Vec::new(),
			nullability: None,
			nullable_context: None,
		}
	}

	/// Accessors that exist, add first.
	pub fn accessors(&self) -> impl Iterator<Item = &MethodDef> {
		self.add.iter().chain(self.remove.iter())
	}
}

/// A member of a type, as the provider read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
	/// A field.
	Field(FieldDef),
	/// A property or indexer.
	Property(PropertyDef),
	/// A method of any kind.
	Method(MethodDef),
	/// An event.
	Event(EventDef),
	/// A member whose metadata could not be read.
	Unreadable {
		/// Name of the member, as far as it is known.
		name: String,
		/// Why reading failed.
		reason: String,
	},
}

impl Member {
	/// Metadata name of the member.
	pub fn name(&self) -> &str {
		match self {
			Self::Field(field) => &field.name,
			Self::Property(property) => &property.name,
			Self::Method(method) => &method.name,
			Self::Event(event) => &event.name,
			Self::Unreadable { name, .. } => name,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accessibility_orders_by_permissiveness() {
		assert!(Accessibility::Public > Accessibility::ProtectedInternal);
		assert!(Accessibility::Protected > Accessibility::Internal);
		assert!(Accessibility::PrivateProtected > Accessibility::Private);
		assert!(!Accessibility::Internal.is_externally_visible());
		assert!(Accessibility::Protected.is_externally_visible());
	}

	#[test]
	fn members_read_from_tagged_json() {
		let json = r#"{
			"member": "field",
			"name": "Count",
			"type": {"kind": "primitive", "primitive": "int"},
			"accessibility": "public",
			"is_static": true
		}"#;
		let member: Member = serde_json::from_str(json).unwrap();
		match member {
			Member::Field(field) => {
				assert_eq!(field.name, "Count");
				assert!(field.is_static);
				assert!(field.ty.is_primitive(Primitive::Int));
			}
			other => panic!("expected a field, got {other:?}"),
		}
	}
}

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeInstance;
use crate::member::{Accessibility, Member};
use crate::nullability::NullableContext;
use crate::types::{Primitive, TypeRef, Variance};

/// The kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
	/// A class (or record class).
	Class,
	/// A struct (or record struct).
	Struct,
	/// An interface.
	Interface,
	/// An enum.
	Enum,
	/// A delegate.
	Delegate,
}

/// Special constraints on a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialConstraint {
	/// `class`.
	ReferenceType,
	/// `class?`.
	NullableReferenceType,
	/// `struct`.
	ValueType,
	/// `unmanaged`.
	Unmanaged,
	/// `notnull`.
	NotNull,
}

/// A generic parameter declared by a type or method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericParameterDef {
	/// Parameter name.
	pub name: String,
	/// Zero-based position.
	#[serde(default)]
	pub position: u32,
	/// Declared variance.
	#[serde(default)]
	pub variance: Variance,
	/// Special constraint, if any.
	#[serde(default)]
	pub special: Option<SpecialConstraint>,
	/// Type constraints in declaration order.
	#[serde(default)]
	pub constraints: Vec<TypeRef>,
	/// Whether `new()` is required.
	#[serde(default)]
	pub default_constructor: bool,
	/// Attributes applied to the parameter.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
}

impl GenericParameterDef {
	/// An unconstrained, invariant parameter.
	pub fn new(name: &str, position: u32) -> Self {
		Self {
			name: name.to_string(),
			position,
			variance: Variance::None,
			special: None,
			constraints: Vec::new(),
			default_constructor: false,
			attributes: Vec::new(),
		}
	}
}

/// Mapping of one interface method to the method implementing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMapping {
	/// Name of the method on the interface.
	pub interface_method: String,
	/// Name of the implementing method on the type.
	pub target_method: String,
}

/// How a type implements one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMapping {
	/// The implemented interface.
	pub interface: TypeRef,
	/// Method pairs.
	#[serde(default)]
	pub methods: Vec<MethodMapping>,
}

/// A type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
	/// Containing namespace, empty for the global namespace or nested types.
	#[serde(default)]
	pub namespace: String,
	/// Metadata name, including any arity suffix.
	pub name: String,
	/// Declaration kind.
	pub kind: TypeKind,
	/// Declared accessibility.
	#[serde(default)]
	pub accessibility: Accessibility,
	/// `abstract` flag.
	#[serde(default)]
	pub is_abstract: bool,
	/// `sealed` flag.
	#[serde(default)]
	pub is_sealed: bool,
	/// `readonly` struct.
	#[serde(default)]
	pub is_readonly: bool,
	/// `ref` struct.
	#[serde(default)]
	pub is_by_ref_like: bool,
	/// Declared with record syntax.
	#[serde(default)]
	pub is_record: bool,
	/// Emitted by the compiler rather than declared in source.
	#[serde(default)]
	pub is_compiler_generated: bool,
	/// Generic parameters, including those inherited from declaring types.
	#[serde(default)]
	pub generic_parameters: Vec<GenericParameterDef>,
	/// Base type, if any.
	#[serde(default)]
	pub base_type: Option<TypeRef>,
	/// Directly listed interfaces.
	#[serde(default)]
	pub interfaces: Vec<TypeRef>,
	/// Interface implementation maps.
	#[serde(default)]
	pub interface_maps: Vec<InterfaceMapping>,
	/// Underlying integral type of an enum.
	#[serde(default)]
	pub enum_underlying: Option<Primitive>,
	/// Declared members.
	#[serde(default)]
	pub members: Vec<Member>,
	/// Nested type declarations.
	#[serde(default)]
	pub nested_types: Vec<TypeDef>,
	/// Attributes applied to the type.
	#[serde(default)]
	pub attributes: Vec<AttributeInstance>,
	/// Type-level nullable context override.
	#[serde(default)]
	pub nullable_context: Option<NullableContext>,
}

impl TypeDef {
	/// A public, empty declaration of `kind`.
	pub fn new(namespace: &str, name: &str, kind: TypeKind) -> Self {
		Self {
			namespace: namespace.to_string(),
			name: name.to_string(),
			kind,
			accessibility: Accessibility::Public,
			is_abstract: false,
			is_sealed: false,
			is_readonly: false,
			is_by_ref_like: false,
			is_record: false,
			is_compiler_generated: false,
			generic_parameters: Vec::new(),
			base_type: None,
			interfaces: Vec::new(),
			interface_maps: Vec::new(),
			enum_underlying: None,
			members: Vec::new(),
			nested_types: Vec::new(),
			attributes: Vec::new(),
			nullable_context: None,
		}
	}

	/// Whether the enum carries `[Flags]`.
	pub fn is_flags(&self) -> bool {
		self.attributes
			.iter()
			.any(|attribute| attribute.is("System", "FlagsAttribute"))
	}

	/// Whether this is a `static` class (abstract and sealed).
	pub fn is_static_class(&self) -> bool {
		self.kind == TypeKind::Class && self.is_abstract && self.is_sealed
	}

	/// Whether instances are value types.
	pub fn is_value_type(&self) -> bool {
		matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
	}

	/// A reference to this type as a top-level type.
	pub fn type_ref(&self) -> TypeRef {
		TypeRef::Named {
			namespace: self.namespace.clone(),
			name: self.name.clone(),
			value_type: self.is_value_type(),
		}
	}

	/// A reference to a type nested in this one, given the reference to this type.
	pub fn nested_ref(&self, declaring: &TypeRef) -> TypeRef {
		TypeRef::Nested {
			declaring: Box::new(declaring.clone()),
			name: self.name.clone(),
			value_type: self.is_value_type(),
		}
	}

	/// Look up a nested type by metadata name.
	pub fn nested(&self, name: &str) -> Option<&TypeDef> {
		self.nested_types.iter().find(|nested| nested.name == name)
	}
}

/// Resolve type references to their declarations.
pub trait TypeResolver {
	/// The declaration of `ty`'s definition, when it is known.
	fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef>;
}

/// The rendering input: an assembly's type declarations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Assembly {
	/// Simple assembly name.
	#[serde(default)]
	pub name: String,
	/// Assembly-level nullable context.
	#[serde(default)]
	pub nullable_context: Option<NullableContext>,
	/// Top-level types declared by the assembly.
	#[serde(default)]
	pub types: Vec<TypeDef>,
	/// Declarations of referenced external types, used to resolve enums,
	/// constants and interface shapes.
	#[serde(default)]
	pub referenced_types: Vec<TypeDef>,
}

impl Assembly {
	fn find_top_level(&self, namespace: &str, name: &str) -> Option<&TypeDef> {
		self.types
			.iter()
			.chain(self.referenced_types.iter())
			.find(|ty| ty.namespace == namespace && ty.name == name)
	}

	/// The declarations from the outermost type down to the type named
	/// `full_name` (`Namespace.Outer+Inner`), searching the assembly's own types.
	pub fn type_path(&self, full_name: &str) -> Option<Vec<&TypeDef>> {
		let (namespace, path) = match full_name.rsplit_once('.') {
			Some((namespace, rest)) if !namespace.contains('+') => (namespace, rest),
			_ => ("", full_name),
		};
		let mut names = path.split('+');
		let top = names.next()?;
		let mut current = self
			.types
			.iter()
			.find(|ty| ty.namespace == namespace && ty.name == top)?;
		let mut chain = vec![current];
		for name in names {
			current = current.nested(name)?;
			chain.push(current);
		}
		Some(chain)
	}
}

impl TypeResolver for Assembly {
	fn resolve(&self, ty: &TypeRef) -> Option<&TypeDef> {
		match ty.definition() {
			TypeRef::Named {
				namespace, name, ..
			} => self.find_top_level(namespace, name),
			TypeRef::Nested { declaring, name, .. } => self.resolve(declaring)?.nested(name),
			TypeRef::Primitive { primitive } => {
				self.find_top_level(Primitive::NAMESPACE, primitive.runtime_name())
			}
			_ => None,
		}
	}
}

//! Read-only view of a managed library's type metadata.
//!
//! A metadata provider (a binary reader, a reflection dump, a test fixture) produces
//! these values; the renderer only ever reads them. Every type here derives serde so
//! a provider can hand over a whole [`Assembly`] as a JSON document.

/// Custom-attribute applications and their targets.
pub mod attribute;
/// Fields, properties, methods and events.
pub mod member;
/// Reference-type nullability annotations carried alongside symbols.
pub mod nullability;
/// Type definitions, generic parameters and the assembly container.
pub mod typedef;
/// Type references: the usage-site representation of a type.
pub mod types;
/// Constant values attached to fields, parameters and attribute arguments.
pub mod value;

pub use crate::attribute::{AttributeInstance, AttributeParameter, AttributeTarget};
pub use crate::member::{
	Accessibility, EventDef, FieldDef, FixedBuffer, Member, MethodDef, Parameter, PropertyDef,
	ReturnValue,
};
pub use crate::nullability::{NullState, NullabilityInfo, NullableContext};
pub use crate::typedef::{
	Assembly, GenericParameterDef, InterfaceMapping, MethodMapping, SpecialConstraint, TypeDef,
	TypeKind, TypeResolver,
};
pub use crate::types::{Primitive, TypeRef, Variance, strip_arity};
pub use crate::value::{TypedValue, Value};

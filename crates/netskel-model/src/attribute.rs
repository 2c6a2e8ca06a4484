use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::TypeRef;
use crate::value::TypedValue;

/// What an attribute application is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeTarget {
	/// A type declaration.
	Type,
	/// A field.
	Field,
	/// A method, constructor or operator.
	Method,
	/// A method's return value.
	ReturnValue,
	/// A parameter.
	Parameter,
	/// A generic parameter.
	GenericParameter,
	/// A property or indexer.
	Property,
	/// An event.
	Event,
	/// The compiler-generated backing field of a property or event.
	BackingField,
	/// The add accessor of an event.
	EventAddMethod,
	/// The remove accessor of an event.
	EventRemoveMethod,
}

/// A constructor parameter of the attribute type, used to map positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeParameter {
	/// Parameter name.
	pub name: String,
	/// Parameter type.
	#[serde(rename = "type")]
	pub ty: TypeRef,
	/// Whether this is a trailing `params` array.
	#[serde(default)]
	pub is_param_array: bool,
	/// Whether the parameter declares a default value.
	#[serde(default)]
	pub has_default: bool,
}

/// One custom-attribute application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInstance {
	/// The attribute class.
	pub attribute_type: TypeRef,
	/// Parameters of the constructor the application binds to.
	#[serde(default)]
	pub constructor_parameters: Vec<AttributeParameter>,
	/// Constructor arguments in declaration order.
	#[serde(default)]
	pub positional_args: Vec<TypedValue>,
	/// Field and property assignments in declaration order.
	#[serde(default)]
	pub named_args: IndexMap<String, TypedValue>,
	/// Explicit target; `None` means the symbol the attribute is listed on.
	#[serde(default)]
	pub target: Option<AttributeTarget>,
}

impl AttributeInstance {
	/// An application with no arguments.
	pub fn new(attribute_type: TypeRef) -> Self {
		Self {
			attribute_type,
			constructor_parameters: Vec::new(),
			positional_args: Vec::new(),
			named_args: IndexMap::new(),
			target: None,
		}
	}

	/// Append a positional argument.
	pub fn with_arg(mut self, value: TypedValue) -> Self {
		self.positional_args.push(value);
		self
	}

	/// Append a named argument.
	pub fn with_named(mut self, name: &str, value: TypedValue) -> Self {
		self.named_args.insert(name.to_string(), value);
		self
	}

	/// Describe the bound constructor's parameters.
	pub fn with_parameters(mut self, parameters: Vec<AttributeParameter>) -> Self {
		self.constructor_parameters = parameters;
		self
	}

	/// Set an explicit target.
	pub fn with_target(mut self, target: AttributeTarget) -> Self {
		self.target = Some(target);
		self
	}

	/// Whether the attribute class is `namespace.name`.
	pub fn is(&self, namespace: &str, name: &str) -> bool {
		self.attribute_type.definition().is_named(namespace, name)
	}
}

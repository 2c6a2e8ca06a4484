use thiserror::Error;

/// Errors raised while rendering a single declaration.
///
/// None of these abort a rendering pass: the pass driver records the failure
/// against the symbol and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// The metadata provider could not read the member.
	#[error("member `{name}` could not be read: {reason}")]
	Unreadable {
		/// Member name.
		name: String,
		/// Provider-supplied reason.
		reason: String,
	},
	/// A property with neither a getter nor a setter.
	#[error("property `{0}` has no accessors")]
	PropertyWithoutAccessors(String),
	/// An event missing its add or remove accessor.
	#[error("event `{0}` has no add or remove accessor")]
	EventWithoutAccessors(String),
	/// A special-name `op_*` method with no operator syntax.
	#[error("unknown operator method `{0}`")]
	UnknownOperator(String),
	/// A delegate type without an `Invoke` method.
	#[error("delegate `{0}` has no Invoke method")]
	MissingInvoke(String),
	/// More positional arguments than the attribute constructor accepts.
	#[error("attribute `{attribute}` has {given} positional arguments for {expected} constructor parameters")]
	AttributeArity {
		/// Attribute type name.
		attribute: String,
		/// Number of positional arguments supplied.
		given: usize,
		/// Number of constructor parameters.
		expected: usize,
	},
	/// An attribute argument with no literal form.
	#[error("attribute `{attribute}` argument `{value}` has no literal form")]
	UnrepresentableArgument {
		/// Attribute type name.
		attribute: String,
		/// Description of the value.
		value: String,
	},
	/// No type with the requested full name is declared by the assembly.
	#[error("type `{0}` is not declared by the assembly")]
	UnknownType(String),
	/// A qualified member name with no matching interface mapping.
	#[error("member `{0}` looks like an explicit implementation but maps to no interface")]
	UnmappedExplicitImplementation(String),
}

/// Result type returned by renderer helpers.
pub type Result<T> = std::result::Result<T, RenderError>;

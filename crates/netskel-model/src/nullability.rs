use serde::{Deserialize, Serialize};

/// Annotated nullability of one position in a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullState {
	/// No annotation (oblivious).
	#[default]
	Unknown,
	/// Annotated as non-nullable.
	NotNull,
	/// Annotated as nullable.
	Nullable,
}

/// Nullability annotations for a symbol's type, shaped like the type itself.
///
/// `element` follows array and pointer element types; `arguments` follows generic
/// arguments, tuple elements and the underlying type of a nullable value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NullabilityInfo {
	/// State of the outermost position.
	#[serde(default)]
	pub state: NullState,
	/// Annotations of an array or pointer element type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub element: Option<Box<NullabilityInfo>>,
	/// Annotations of generic arguments or tuple elements.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub arguments: Vec<NullabilityInfo>,
}

impl NullabilityInfo {
	/// An info whose outermost position is nullable.
	pub fn nullable() -> Self {
		Self {
			state: NullState::Nullable,
			..Self::default()
		}
	}

	/// An info whose outermost position is non-nullable.
	pub fn not_null() -> Self {
		Self {
			state: NullState::NotNull,
			..Self::default()
		}
	}

	/// Attach element annotations.
	pub fn with_element(mut self, element: NullabilityInfo) -> Self {
		self.element = Some(Box::new(element));
		self
	}

	/// Attach generic argument annotations.
	pub fn with_arguments(mut self, arguments: Vec<NullabilityInfo>) -> Self {
		self.arguments = arguments;
		self
	}

	/// Whether the outermost position is annotated nullable.
	pub fn is_nullable(&self) -> bool {
		self.state == NullState::Nullable
	}
}

/// Whether nullable annotations are in effect for a scope (assembly, type or member).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullableContext {
	/// Annotations are not in effect; suffixes are never rendered.
	Disabled,
	/// Annotations are in effect.
	Enabled,
}

//! Formatters for the pieces a declaration is assembled from.

/// Attribute sections and argument lists.
pub mod attributes;
/// Parameter lists and return types.
pub mod function;
/// Generic parameter lists and `where` clauses.
pub mod generics;
/// Reserved words and identifier escaping.
pub mod keywords;
/// Constant values as source literals.
pub mod literal;
/// Modifier keyword resolution.
pub mod modifiers;
/// Operator special-name translation.
pub mod operators;
/// Type reference formatting.
pub mod types;

pub use attributes::{default_attribute_filter, render_attribute, render_attribute_sections};
pub use function::{render_parameters, render_return_type};
pub use generics::{render_constraints, render_generic_parameters};
pub use keywords::{escape_identifier, is_reserved_word};
pub use literal::{LiteralFormatter, LiteralOptions};
pub use modifiers::{ModifierFlags, ResolvedModifiers};
pub use operators::{OperatorSyntax, operator_syntax};
pub use types::{TypeDecoration, TypeNameOptions, format_decorated_type, format_type};

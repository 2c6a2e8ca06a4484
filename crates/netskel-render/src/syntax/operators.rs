/// Surface syntax of a user-defined operator method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSyntax {
	/// A unary or binary operator: `operator +`, `operator checked -`.
	Symbol {
		/// The operator token.
		token: &'static str,
		/// Whether this is the `checked` variant.
		checked: bool,
	},
	/// A conversion operator: `implicit operator T`, `explicit operator checked T`.
	Conversion {
		/// Whether the conversion is explicit.
		explicit: bool,
		/// Whether this is the `checked` variant.
		checked: bool,
	},
}

const SYMBOLS: &[(&str, &str, bool)] = &[
	("op_Addition", "+", false),
	("op_BitwiseAnd", "&", false),
	("op_BitwiseOr", "|", false),
	("op_CheckedAddition", "+", true),
	("op_CheckedDecrement", "--", true),
	("op_CheckedDivision", "/", true),
	("op_CheckedIncrement", "++", true),
	("op_CheckedMultiply", "*", true),
	("op_CheckedSubtraction", "-", true),
	("op_CheckedUnaryNegation", "-", true),
	("op_Decrement", "--", false),
	("op_Division", "/", false),
	("op_Equality", "==", false),
	("op_ExclusiveOr", "^", false),
	("op_False", "false", false),
	("op_GreaterThan", ">", false),
	("op_GreaterThanOrEqual", ">=", false),
	("op_Increment", "++", false),
	("op_Inequality", "!=", false),
	("op_LeftShift", "<<", false),
	("op_LessThan", "<", false),
	("op_LessThanOrEqual", "<=", false),
	("op_LogicalNot", "!", false),
	("op_Modulus", "%", false),
	("op_Multiply", "*", false),
	("op_OnesComplement", "~", false),
	("op_RightShift", ">>", false),
	("op_Subtraction", "-", false),
	("op_True", "true", false),
	("op_UnaryNegation", "-", false),
	("op_UnaryPlus", "+", false),
	("op_UnsignedRightShift", ">>>", false),
];

/// Translate an `op_*` special name to operator syntax.
pub fn operator_syntax(name: &str) -> Option<OperatorSyntax> {
	match name {
		"op_Implicit" => Some(OperatorSyntax::Conversion {
			explicit: false,
			checked: false,
		}),
		"op_Explicit" => Some(OperatorSyntax::Conversion {
			explicit: true,
			checked: false,
		}),
		"op_CheckedExplicit" => Some(OperatorSyntax::Conversion {
			explicit: true,
			checked: true,
		}),
		_ => SYMBOLS
			.binary_search_by(|(candidate, _, _)| candidate.cmp(&name))
			.ok()
			.map(|index| {
				let (_, token, checked) = SYMBOLS[index];
				OperatorSyntax::Symbol { token, checked }
			}),
	}
}

/// Whether a method name looks like an operator special name.
pub fn is_operator_name(name: &str) -> bool {
	name.starts_with("op_")
}

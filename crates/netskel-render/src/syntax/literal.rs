use netskel_model::{
	Member, Primitive, TypeDef, TypeKind, TypeRef, TypeResolver, TypedValue, Value, strip_arity,
};

use super::types::{TypeNameOptions, format_primitive, format_type};
use crate::namespaces::Namespaces;

/// Options controlling literal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralOptions {
	/// Spelling of type names inside literals (`(T)3`, `default(T)`, `typeof(T)`).
	pub names: TypeNameOptions,
	/// Replace values equal to a public constant of their type with `Type.Constant`.
	pub find_constant_alias: bool,
	/// Use `default` instead of `default(T)`.
	pub use_default_literal: bool,
	/// Render unnamed flags values as zero-padded hex instead of decimal.
	pub flags_as_hex: bool,
}

impl Default for LiteralOptions {
	fn default() -> Self {
		Self {
			names: TypeNameOptions::default(),
			find_constant_alias: false,
			use_default_literal: false,
			flags_as_hex: true,
		}
	}
}

/// Turns typed constants into source literals.
///
/// [`LiteralFormatter::format`] returns `None` when a value has no safe literal
/// form; callers fall back to a descriptive comment.
pub struct LiteralFormatter<'a> {
	opts: LiteralOptions,
	resolver: &'a dyn TypeResolver,
}

impl<'a> LiteralFormatter<'a> {
	/// A formatter resolving enum and constant lookups through `resolver`.
	pub fn new(opts: LiteralOptions, resolver: &'a dyn TypeResolver) -> Self {
		Self { opts, resolver }
	}

	/// Render `value` as it appears where `declared` is expected.
	pub fn format(
		&self,
		value: &TypedValue,
		declared: &TypeRef,
		namespaces: &mut Namespaces,
	) -> Option<String> {
		match &value.value {
			Value::Null => Some(self.null_literal(declared, namespaces)),
			Value::Bool(flag) => Some(flag.to_string()),
			Value::Char(c) => Some(quote_char(*c)),
			Value::String(s) => Some(quote_string(s)),
			Value::Enum { raw, flags } => Some(self.enum_literal(&value.ty, *raw, *flags, namespaces)),
			Value::Integer(raw) => {
				if let Some(def) = self.resolver.resolve(&value.ty)
					&& def.kind == TypeKind::Enum
				{
					return Some(self.enum_literal(&value.ty, *raw, def.is_flags(), namespaces));
				}
				if let Some(alias) = self.constant_alias(value, namespaces) {
					return Some(alias);
				}
				Some(raw.to_string())
			}
			Value::Floating(number) => {
				let primitive = value.ty.as_primitive().unwrap_or(Primitive::Double);
				if !number.is_finite() {
					let member = if number.is_nan() {
						"NaN"
					} else if number.is_sign_positive() {
						"PositiveInfinity"
					} else {
						"NegativeInfinity"
					};
					let ty = format_primitive(primitive, self.opts.names, namespaces);
					return Some(format!("{ty}.{member}"));
				}
				if let Some(alias) = self.constant_alias(value, namespaces) {
					return Some(alias);
				}
				Some(match primitive {
					Primitive::Float => format_floating(*number, true),
					// Lossy past f64 precision; exact decimals arrive as `Value::Decimal`.
					Primitive::Decimal => number.to_string(),
					_ => format_floating(*number, false),
				})
			}
			Value::Type(ty) => Some(format!("typeof({})", self.type_literal(ty, namespaces))),
			Value::Array(items) => self.array_literal(value, declared, items, namespaces),
			Value::Tuple(items) => {
				let mut parts = Vec::with_capacity(items.len());
				for item in items {
					parts.push(self.format(item, &item.ty, namespaces)?);
				}
				Some(format!("({})", parts.join(", ")))
			}
			Value::Decimal(text) => self
				.constant_alias(value, namespaces)
				.or_else(|| decimal_text(text)),
			Value::Opaque(_) => self.constant_alias(value, namespaces),
		}
	}

	fn type_name(&self, ty: &TypeRef, namespaces: &mut Namespaces) -> String {
		format_type(ty, self.opts.names, namespaces)
	}

	fn null_literal(&self, declared: &TypeRef, namespaces: &mut Namespaces) -> String {
		if declared.accepts_null() {
			"null".to_string()
		} else if self.opts.use_default_literal {
			"default".to_string()
		} else {
			format!("default({})", self.type_name(declared, namespaces))
		}
	}

	fn enum_literal(&self, ty: &TypeRef, raw: i128, flags: bool, namespaces: &mut Namespaces) -> String {
		let def = self.resolver.resolve(ty);
		let type_name = self.type_name(ty, namespaces);
		if let Some(name) = def.and_then(|def| enum_member_named(def, raw)) {
			return format!("{type_name}.{name}");
		}
		let underlying = def.and_then(|def| def.enum_underlying).unwrap_or(Primitive::Int);
		if flags && self.opts.flags_as_hex {
			format!("({type_name}){}", format_flags_hex(raw, underlying))
		} else if raw < 0 {
			format!("({type_name})({raw})")
		} else {
			format!("({type_name}){raw}")
		}
	}

	/// A public static constant or read-only field of the value's own type holding the same value.
	fn constant_alias(&self, value: &TypedValue, namespaces: &mut Namespaces) -> Option<String> {
		if !self.opts.find_constant_alias {
			return None;
		}
		let def = self.resolver.resolve(&value.ty)?;
		let field = def.members.iter().find_map(|member| match member {
			Member::Field(field)
				if field.is_static
					&& (field.is_literal || field.is_init_only)
					&& field.accessibility.is_externally_visible()
					&& field
						.constant
						.as_ref()
						.or(field.value.as_ref())
						.is_some_and(|constant| constant.value == value.value) =>
			{
				Some(field)
			}
			_ => None,
		})?;
		Some(format!("{}.{}", self.type_name(&value.ty, namespaces), field.name))
	}

	fn type_literal(&self, ty: &TypeRef, namespaces: &mut Namespaces) -> String {
		let name = self.type_name(ty, namespaces);
		match ty {
			TypeRef::Named { name: metadata, .. } | TypeRef::Nested { name: metadata, .. } => {
				match strip_arity(metadata) {
					(_, 0) => name,
					(_, arity) => format!("{name}<{}>", ",".repeat(arity - 1)),
				}
			}
			_ => name,
		}
	}

	fn array_literal(
		&self,
		value: &TypedValue,
		declared: &TypeRef,
		items: &[TypedValue],
		namespaces: &mut Namespaces,
	) -> Option<String> {
		let element = match (&value.ty, declared) {
			(TypeRef::Array { element, .. }, _) | (_, TypeRef::Array { element, .. }) => {
				(**element).clone()
			}
			_ => TypeRef::primitive(Primitive::Object),
		};
		let element_name = self.type_name(&element, namespaces);
		if items.is_empty() {
			return Some(format!("new {element_name}[0]"));
		}
		let mut parts = Vec::with_capacity(items.len());
		for item in items {
			parts.push(self.format(item, &element, namespaces)?);
		}
		Some(format!("new {element_name}[] {{ {} }}", parts.join(", ")))
	}
}

/// Name of the enum member whose constant is `raw`, in declaration order.
pub fn enum_member_named(def: &TypeDef, raw: i128) -> Option<&str> {
	def.members.iter().find_map(|member| match member {
		Member::Field(field)
			if field.is_literal
				&& field
					.constant
					.as_ref()
					.is_some_and(|constant| constant.has_raw_value(raw)) =>
		{
			Some(field.name.as_str())
		}
		_ => None,
	})
}

/// `0x`-prefixed hex, zero-padded to twice the storage width of `underlying`.
pub fn format_flags_hex(raw: i128, underlying: Primitive) -> String {
	let bytes = underlying.size().unwrap_or(4).min(8) as usize;
	let mask = (1u128 << (bytes * 8)) - 1;
	let bits = (raw as u128) & mask;
	format!("0x{bits:0width$X}", width = bytes * 2)
}

fn escape_char(c: char, quote: char, out: &mut String) {
	match c {
		'\\' => out.push_str("\\\\"),
		c if c == quote => {
			out.push('\\');
			out.push(c);
		}
		c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
		c => out.push(c),
	}
}

/// A double-quoted string literal.
pub fn quote_string(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);
	out.push('"');
	for c in value.chars() {
		escape_char(c, '"', &mut out);
	}
	out.push('"');
	out
}

/// A single-quoted char literal.
pub fn quote_char(value: char) -> String {
	let mut out = String::with_capacity(4);
	out.push('\'');
	escape_char(value, '\'', &mut out);
	out.push('\'');
	out
}

/// Canonical text of a `decimal`: optional sign, digits, optional fraction.
///
/// Trailing fraction zeros are kept, as the runtime keeps a decimal's scale.
fn decimal_text(text: &str) -> Option<String> {
	let text = text.trim();
	let unsigned = text.strip_prefix('-').unwrap_or(text);
	let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
	let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
	if whole.is_empty() || !digits(whole) || !digits(fraction) || unsigned.ends_with('.') {
		return None;
	}
	Some(text.to_string())
}

/// Shortest round-trip text in the runtime's default numeric format.
///
/// Scientific notation (`1E+15`, `1E-05`) kicks in at a decimal exponent of 15
/// (7 for single precision) and below -4.
pub fn format_floating(value: f64, single: bool) -> String {
	if value == 0.0 {
		let zero = if value.is_sign_negative() { "-0" } else { "0" };
		return zero.to_string();
	}
	let scientific = if single {
		format!("{:e}", value as f32)
	} else {
		format!("{value:e}")
	};
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return value.to_string();
	};
	let Ok(exponent) = exponent.parse::<i32>() else {
		return value.to_string();
	};
	let (sign, mantissa) = match mantissa.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", mantissa),
	};
	let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
	let threshold = if single { 7 } else { 15 };

	if exponent >= threshold || exponent < -4 {
		let (first, rest) = digits.split_at(1);
		let fraction = if rest.is_empty() {
			String::new()
		} else {
			format!(".{rest}")
		};
		let exponent_sign = if exponent < 0 { '-' } else { '+' };
		format!("{sign}{first}{fraction}E{exponent_sign}{:02}", exponent.abs())
	} else if exponent >= 0 {
		let point = exponent as usize + 1;
		if digits.len() <= point {
			format!("{sign}{digits}{}", "0".repeat(point - digits.len()))
		} else {
			format!("{sign}{}.{}", &digits[..point], &digits[point..])
		}
	} else {
		let zeros = "0".repeat((-exponent - 1) as usize);
		format!("{sign}0.{zeros}{digits}")
	}
}

#[cfg(test)]
mod tests {
	use netskel_model::{Assembly, FieldDef, TypeDef, TypeKind};
	use pretty_assertions::assert_eq;

	use super::*;

	fn int() -> TypeRef {
		TypeRef::primitive(Primitive::Int)
	}

	fn literal_field(name: &str, ty: TypeRef, value: TypedValue) -> Member {
		let mut field = FieldDef::new(name, ty);
		field.is_static = true;
		field.is_literal = true;
		field.constant = Some(value);
		Member::Field(field)
	}

	fn assembly() -> Assembly {
		let targets_ref = TypeRef::value_type("System", "AttributeTargets");
		let mut targets = TypeDef::new("System", "AttributeTargets", TypeKind::Enum);
		targets.attributes.push(netskel_model::AttributeInstance::new(TypeRef::named(
			"System",
			"FlagsAttribute",
		)));
		for (name, raw) in [("Assembly", 1), ("Module", 2), ("Class", 4)] {
			targets.members.push(literal_field(
				name,
				targets_ref.clone(),
				TypedValue::enum_value(targets_ref.clone(), raw, true),
			));
		}

		let mut small = TypeDef::new("Acme", "Small", TypeKind::Enum);
		small.enum_underlying = Some(Primitive::Byte);

		let mut int32 = TypeDef::new("System", "Int32", TypeKind::Struct);
		int32.members.push(literal_field("MaxValue", int(), TypedValue::int(i32::MAX)));

		Assembly {
			referenced_types: vec![targets, small, int32],
			..Assembly::default()
		}
	}

	fn format(value: &TypedValue, opts: LiteralOptions) -> Option<String> {
		let assembly = assembly();
		LiteralFormatter::new(opts, &assembly).format(value, &value.ty, &mut Namespaces::new())
	}

	fn with_namespace() -> LiteralOptions {
		LiteralOptions {
			names: TypeNameOptions {
				with_namespace: true,
				..TypeNameOptions::default()
			},
			..LiteralOptions::default()
		}
	}

	#[test]
	fn test_render_null_and_default_forms() {
		let opts = LiteralOptions::default();
		assert_eq!(format(&TypedValue::null(TypeRef::named("System", "Uri")), opts).as_deref(), Some("null"));
		assert_eq!(format(&TypedValue::null(TypeRef::nullable(int())), opts).as_deref(), Some("null"));
		assert_eq!(format(&TypedValue::null(int()), opts).as_deref(), Some("default(int)"));
		let shorthand = LiteralOptions {
			use_default_literal: true,
			..opts
		};
		assert_eq!(format(&TypedValue::null(TypeRef::generic_param("T", 0)), shorthand).as_deref(), Some("default"));
	}

	#[test]
	fn test_render_backslash_char() {
		assert_eq!(format(&TypedValue::char('\\'), LiteralOptions::default()).as_deref(), Some("'\\\\'"));
		assert_eq!(format(&TypedValue::char('\''), LiteralOptions::default()).as_deref(), Some("'\\''"));
	}

	#[test]
	fn test_render_every_control_character_escaped() {
		let controls = (0u32..0x20).chain(0x7f..0xa0).filter_map(char::from_u32);
		for c in controls {
			let text = quote_string(&format!("a{c}b"));
			assert!(text.contains(&format!("\\u{:04X}", c as u32)), "{text}");
			assert!(!text.contains(c), "raw control {:#x} leaked", c as u32);
		}
		assert_eq!(quote_string("say \"hi\""), "\"say \\\"hi\\\"\"");
	}

	#[test]
	fn test_render_flags_without_named_match() {
		let targets = TypeRef::value_type("System", "AttributeTargets");
		let value = TypedValue::enum_value(targets.clone(), 3, true);
		let decimal = LiteralOptions {
			flags_as_hex: false,
			..with_namespace()
		};
		assert_eq!(format(&value, decimal).as_deref(), Some("(System.AttributeTargets)3"));
		assert_eq!(format(&value, with_namespace()).as_deref(), Some("(System.AttributeTargets)0x00000003"));

		let named = TypedValue::enum_value(targets, 4, true);
		assert_eq!(format(&named, with_namespace()).as_deref(), Some("System.AttributeTargets.Class"));
	}

	#[test]
	fn test_render_flags_hex_width_matches_storage() {
		for (primitive, width) in [
			(Primitive::Byte, 2),
			(Primitive::Short, 4),
			(Primitive::Int, 8),
			(Primitive::ULong, 16),
		] {
			for raw in [0, 1, 0x7f, -1] {
				let text = format_flags_hex(raw, primitive);
				assert_eq!(text.len() - 2, width, "{text}");
			}
		}
		assert_eq!(format_flags_hex(-1, Primitive::Byte), "0xFF");
	}

	#[test]
	fn test_render_enum_without_member() {
		let small = TypeRef::value_type("Acme", "Small");
		let opts = LiteralOptions::default();
		assert_eq!(format(&TypedValue::enum_value(small.clone(), 9, false), opts).as_deref(), Some("(Small)9"));
		assert_eq!(format(&TypedValue::enum_value(small.clone(), -1, false), opts).as_deref(), Some("(Small)(-1)"));
		assert_eq!(format(&TypedValue::enum_value(small, 5, true), opts).as_deref(), Some("(Small)0x05"));
	}

	#[test]
	fn test_render_constant_alias() {
		let value = TypedValue::int(i32::MAX);
		assert_eq!(format(&value, LiteralOptions::default()).as_deref(), Some("2147483647"));
		let opts = LiteralOptions {
			find_constant_alias: true,
			..LiteralOptions::default()
		};
		assert_eq!(format(&value, opts).as_deref(), Some("int.MaxValue"));
		assert_eq!(format(&TypedValue::int(7), opts).as_deref(), Some("7"));
	}

	#[test]
	fn test_render_floating_point() {
		assert_eq!(format_floating(1.5, false), "1.5");
		assert_eq!(format_floating(1e15, false), "1E+15");
		assert_eq!(format_floating(123456789012345.0, false), "123456789012345");
		assert_eq!(format_floating(0.0001, false), "0.0001");
		assert_eq!(format_floating(0.00001, false), "1E-05");
		assert_eq!(format_floating(-0.0, false), "-0");
		assert_eq!(format_floating(1e7, true), "1E+07");
		assert_eq!(format_floating(0.1, true), "0.1");
		let nan = TypedValue::double(f64::NAN);
		assert_eq!(format(&nan, LiteralOptions::default()).as_deref(), Some("double.NaN"));
	}

	#[test]
	fn test_render_decimal_text_exactly() {
		let max = TypedValue::decimal("79228162514264337593543950335");
		assert_eq!(
			format(&max, LiteralOptions::default()).as_deref(),
			Some("79228162514264337593543950335")
		);
		let scaled = TypedValue::decimal("-12.50");
		assert_eq!(format(&scaled, LiteralOptions::default()).as_deref(), Some("-12.50"));
		for malformed in ["", "1.", ".5", "1e5", "--1"] {
			assert_eq!(format(&TypedValue::decimal(malformed), LiteralOptions::default()), None);
		}
	}

	#[test]
	fn test_render_type_of_open_generic() {
		let open = TypedValue::type_of(TypeRef::named("System.Collections.Generic", "Dictionary`2"));
		assert_eq!(format(&open, LiteralOptions::default()).as_deref(), Some("typeof(Dictionary<,>)"));
	}

	#[test]
	fn test_render_arrays_and_opaque_values() {
		let array = TypedValue::array(
			TypeRef::primitive(Primitive::Object),
			vec![TypedValue::int(0), TypedValue::int(1), TypedValue::int(2)],
		);
		assert_eq!(format(&array, LiteralOptions::default()).as_deref(), Some("new object[] { 0, 1, 2 }"));
		let empty = TypedValue::array(TypeRef::primitive(Primitive::String), Vec::new());
		assert_eq!(format(&empty, LiteralOptions::default()).as_deref(), Some("new string[0]"));
		let opaque = TypedValue::new(TypeRef::value_type("System", "Guid"), Value::Opaque("0000".into()));
		assert_eq!(format(&opaque, LiteralOptions::default()), None);
	}
}

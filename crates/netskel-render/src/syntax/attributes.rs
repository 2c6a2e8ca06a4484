use std::borrow::Cow;

use netskel_model::{AttributeInstance, AttributeTarget, TypeRef, TypedValue, Value};

use super::keywords::escape_identifier;
use crate::core::AttributeLayout;
use crate::error::{RenderError, Result};
use crate::state::RenderState;

const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";
const CODE_ANALYSIS: &str = "System.Diagnostics.CodeAnalysis";

/// Bookkeeping attributes the compiler emits for syntax the listing already spells out.
const HIDDEN_ATTRIBUTES: &[(&str, &str)] = &[
	(COMPILER_SERVICES, "AsyncStateMachineAttribute"),
	(COMPILER_SERVICES, "CompilerFeatureRequiredAttribute"),
	(COMPILER_SERVICES, "CompilerGeneratedAttribute"),
	(COMPILER_SERVICES, "DecimalConstantAttribute"),
	(COMPILER_SERVICES, "ExtensionAttribute"),
	(COMPILER_SERVICES, "FixedBufferAttribute"),
	(COMPILER_SERVICES, "IsByRefLikeAttribute"),
	(COMPILER_SERVICES, "IsReadOnlyAttribute"),
	(COMPILER_SERVICES, "IsUnmanagedAttribute"),
	(COMPILER_SERVICES, "IteratorStateMachineAttribute"),
	(COMPILER_SERVICES, "NullableAttribute"),
	(COMPILER_SERVICES, "NullableContextAttribute"),
	(COMPILER_SERVICES, "NullablePublicOnlyAttribute"),
	(COMPILER_SERVICES, "RefSafetyRulesAttribute"),
	(COMPILER_SERVICES, "TupleElementNamesAttribute"),
	("System", "ParamArrayAttribute"),
	("System.Diagnostics", "DebuggerStepThroughAttribute"),
	("System.Reflection", "DefaultMemberAttribute"),
];

/// The filter installed by default: hides compiler bookkeeping attributes.
pub fn default_attribute_filter(attribute: &AttributeInstance) -> bool {
	!HIDDEN_ATTRIBUTES
		.iter()
		.any(|(namespace, name)| attribute.is(namespace, name))
}

/// Keyword introducing an explicit attribute target.
pub fn target_keyword(target: AttributeTarget) -> &'static str {
	match target {
		AttributeTarget::Type => "type",
		AttributeTarget::Field | AttributeTarget::BackingField => "field",
		AttributeTarget::Method
		| AttributeTarget::EventAddMethod
		| AttributeTarget::EventRemoveMethod => "method",
		AttributeTarget::ReturnValue => "return",
		AttributeTarget::Parameter => "param",
		AttributeTarget::GenericParameter => "typevar",
		AttributeTarget::Property => "property",
		AttributeTarget::Event => "event",
	}
}

/// Remove member names that are invisible outside the assembly from `MemberNotNull`
/// and `MemberNotNullWhen`; `None` when no name is left.
pub fn prune_null_state_members<'a>(
	attribute: &'a AttributeInstance,
	visible: &dyn Fn(&str) -> bool,
) -> Option<Cow<'a, AttributeInstance>> {
	if !attribute.is(CODE_ANALYSIS, "MemberNotNullAttribute")
		&& !attribute.is(CODE_ANALYSIS, "MemberNotNullWhenAttribute")
	{
		return Some(Cow::Borrowed(attribute));
	}
	let is_visible_name = |value: &TypedValue| match &value.value {
		Value::String(name) => visible(name),
		_ => true,
	};

	let mut pruned = attribute.clone();
	pruned.positional_args.retain(is_visible_name);
	let mut remaining = 0;
	for arg in &mut pruned.positional_args {
		match &mut arg.value {
			Value::String(_) => remaining += 1,
			Value::Array(items) => {
				items.retain(is_visible_name);
				remaining += items.len();
			}
			_ => {}
		}
	}
	(remaining > 0).then_some(Cow::Owned(pruned))
}

/// Display name of an attribute class, without the `Attribute` suffix.
pub fn attribute_name(state: &mut RenderState<'_>, attribute: &AttributeInstance) -> String {
	let name = state.format_type(&attribute.attribute_type);
	match name.strip_suffix("Attribute") {
		Some(stripped) if !stripped.is_empty() && !stripped.ends_with('.') => stripped.to_string(),
		_ => name,
	}
}

/// Render one attribute application without brackets: `Name(args)`.
pub fn render_attribute(state: &mut RenderState<'_>, attribute: &AttributeInstance) -> Result<String> {
	let name = attribute_name(state, attribute);
	let params = &attribute.constructor_parameters;
	let positional = &attribute.positional_args;
	let param_array = params.last().filter(|param| param.is_param_array);

	if !params.is_empty() && positional.len() > params.len() && param_array.is_none() {
		return Err(RenderError::AttributeArity {
			attribute: name,
			given: positional.len(),
			expected: params.len(),
		});
	}

	let mut parts = Vec::with_capacity(positional.len() + attribute.named_args.len());
	for (index, arg) in positional.iter().enumerate() {
		if let Some(param) = param_array
			&& index == params.len() - 1
			&& !is_packed_param_array(positional.len(), params.len(), arg)
		{
			let packed = TypedValue::new(param.ty.clone(), Value::Array(positional[index..].to_vec()));
			parts.push(argument_literal(state, &name, &packed, &param.ty)?);
			break;
		}
		let param = params.get(index);
		let declared = param.map_or(&arg.ty, |param| &param.ty);
		let text = argument_literal(state, &name, arg, declared)?;
		match param {
			Some(param) if state.config.named_optional_arguments && param.has_default => {
				parts.push(format!("{}: {text}", escape_identifier(&param.name)));
			}
			_ => parts.push(text),
		}
	}
	for (field, value) in &attribute.named_args {
		let text = argument_literal(state, &name, value, &value.ty)?;
		parts.push(format!("{field} = {text}"));
	}

	if parts.is_empty() {
		Ok(name)
	} else {
		Ok(format!("{name}({})", parts.join(", ")))
	}
}

/// Whether the argument bound to a trailing `params` parameter is already an array.
fn is_packed_param_array(given: usize, expected: usize, arg: &TypedValue) -> bool {
	given == expected && matches!(arg.value, Value::Array(_) | Value::Null)
}

fn argument_literal(
	state: &mut RenderState<'_>,
	attribute: &str,
	value: &TypedValue,
	declared: &TypeRef,
) -> Result<String> {
	state
		.format_literal(value, declared, false, false)
		.ok_or_else(|| RenderError::UnrepresentableArgument {
			attribute: attribute.to_string(),
			value: value.to_string(),
		})
}

/// Render the attributes attached to a symbol of kind `owner` as bracket sections.
///
/// Attributes rejected by the configured filter are dropped. An attribute whose
/// target differs from `owner` gets a `target:` prefix; in the list layout,
/// attributes sharing a target share a section.
pub fn render_attribute_sections<'x>(
	state: &mut RenderState<'_>,
	attributes: impl IntoIterator<Item = Cow<'x, AttributeInstance>>,
	owner: AttributeTarget,
	layout: AttributeLayout,
) -> Result<Vec<String>> {
	let mut groups: Vec<(Option<&'static str>, Vec<String>)> = Vec::new();
	for attribute in attributes {
		if !(state.config.attribute_filter)(&*attribute) {
			continue;
		}
		let prefix = attribute
			.target
			.filter(|target| *target != owner)
			.map(target_keyword);
		let rendered = render_attribute(state, &attribute)?;
		match layout {
			AttributeLayout::Discrete => groups.push((prefix, vec![rendered])),
			AttributeLayout::List => match groups.iter_mut().find(|(p, _)| *p == prefix) {
				Some((_, entries)) => entries.push(rendered),
				None => groups.push((prefix, vec![rendered])),
			},
		}
	}
	Ok(groups
		.into_iter()
		.map(|(prefix, entries)| match prefix {
			Some(prefix) => format!("[{prefix}: {}]", entries.join(", ")),
			None => format!("[{}]", entries.join(", ")),
		})
		.collect())
}

/// Sections joined for inline use, with a trailing space when non-empty.
pub fn inline_sections(sections: Vec<String>) -> String {
	if sections.is_empty() {
		String::new()
	} else {
		format!("{} ", sections.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use netskel_model::{Assembly, AttributeParameter, Primitive};
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::core::Renderer;

	fn object() -> TypeRef {
		TypeRef::primitive(Primitive::Object)
	}

	fn render(config: &Renderer, attribute: &AttributeInstance) -> Result<String> {
		let assembly = Assembly::default();
		let mut state = RenderState::new(config, &assembly, None);
		render_attribute(&mut state, attribute)
	}

	fn sections(
		config: &Renderer,
		attributes: &[AttributeInstance],
		owner: AttributeTarget,
		layout: AttributeLayout,
	) -> Vec<String> {
		let assembly = Assembly::default();
		let mut state = RenderState::new(config, &assembly, None);
		render_attribute_sections(&mut state, attributes.iter().map(Cow::Borrowed), owner, layout).unwrap()
	}

	#[test]
	fn test_render_char_argument() {
		let attribute = AttributeInstance::new(TypeRef::named("Tests", "ObjectValueAttribute"))
			.with_parameters(vec![AttributeParameter {
				name: "value".into(),
				ty: object(),
				is_param_array: false,
				has_default: false,
			}])
			.with_arg(TypedValue::char('\\'));
		assert_eq!(render(&Renderer::default(), &attribute).unwrap(), "ObjectValue('\\\\')");
	}

	#[test]
	fn test_render_loose_param_array_arguments() {
		let attribute = AttributeInstance::new(TypeRef::named("Tests", "ValuesAttribute"))
			.with_parameters(vec![AttributeParameter {
				name: "values".into(),
				ty: TypeRef::array(object()),
				is_param_array: true,
				has_default: false,
			}])
			.with_arg(TypedValue::int(0))
			.with_arg(TypedValue::int(1))
			.with_arg(TypedValue::int(2));
		assert_eq!(
			render(&Renderer::default(), &attribute).unwrap(),
			"Values(new object[] { 0, 1, 2 })"
		);
	}

	#[test]
	fn test_render_flags_argument_in_decimal() {
		let targets = TypeRef::value_type("System", "AttributeTargets");
		let attribute = AttributeInstance::new(TypeRef::named("System", "AttributeUsageAttribute"))
			.with_arg(TypedValue::enum_value(targets, 3, true))
			.with_named("AllowMultiple", TypedValue::bool(true));
		let config = Renderer::default().with_namespace(true);
		assert_eq!(
			render(&config, &attribute).unwrap(),
			"System.AttributeUsage((System.AttributeTargets)3, AllowMultiple = true)"
		);
	}

	#[test]
	fn test_render_named_arguments_keep_declaration_order() {
		let attribute = AttributeInstance::new(TypeRef::named("Tests", "MarkAttribute"))
			.with_named("Zeta", TypedValue::int(1))
			.with_named("Alpha", TypedValue::string("a"));
		assert_eq!(render(&Renderer::default(), &attribute).unwrap(), "Mark(Zeta = 1, Alpha = \"a\")");
	}

	#[test]
	fn test_render_named_optional_argument() {
		let attribute = AttributeInstance::new(TypeRef::named("Tests", "RangeAttribute"))
			.with_parameters(vec![
				AttributeParameter {
					name: "min".into(),
					ty: TypeRef::primitive(Primitive::Int),
					is_param_array: false,
					has_default: false,
				},
				AttributeParameter {
					name: "max".into(),
					ty: TypeRef::primitive(Primitive::Int),
					is_param_array: false,
					has_default: true,
				},
			])
			.with_arg(TypedValue::int(1))
			.with_arg(TypedValue::int(9));
		assert_eq!(render(&Renderer::default(), &attribute).unwrap(), "Range(1, 9)");
		let config = Renderer::default().with_named_optional_arguments(true);
		assert_eq!(render(&config, &attribute).unwrap(), "Range(1, max: 9)");
	}

	#[test]
	fn test_render_arity_mismatch_is_an_error() {
		let attribute = AttributeInstance::new(TypeRef::named("Tests", "OneAttribute"))
			.with_parameters(vec![AttributeParameter {
				name: "value".into(),
				ty: object(),
				is_param_array: false,
				has_default: false,
			}])
			.with_arg(TypedValue::int(1))
			.with_arg(TypedValue::int(2));
		assert!(matches!(
			render(&Renderer::default(), &attribute),
			Err(RenderError::AttributeArity { given: 2, expected: 1, .. })
		));
	}

	#[test]
	fn test_render_layouts_and_targets() {
		let attributes = vec![
			AttributeInstance::new(TypeRef::named("Tests", "AAttribute")),
			AttributeInstance::new(TypeRef::named("Tests", "BAttribute")),
			AttributeInstance::new(TypeRef::named("Tests", "CAttribute")).with_target(AttributeTarget::BackingField),
		];
		let config = Renderer::default();
		assert_eq!(
			sections(&config, &attributes, AttributeTarget::Property, AttributeLayout::Discrete),
			vec!["[A]", "[B]", "[field: C]"]
		);
		assert_eq!(
			sections(&config, &attributes, AttributeTarget::Property, AttributeLayout::List),
			vec!["[A, B]", "[field: C]"]
		);
	}

	#[test]
	fn test_render_default_filter_hides_bookkeeping() {
		let attributes = vec![
			AttributeInstance::new(TypeRef::named(COMPILER_SERVICES, "NullableContextAttribute"))
				.with_arg(TypedValue::integer(Primitive::Byte, 1)),
			AttributeInstance::new(TypeRef::named("System", "ObsoleteAttribute")),
		];
		let config = Renderer::default();
		assert_eq!(
			sections(&config, &attributes, AttributeTarget::Method, AttributeLayout::Discrete),
			vec!["[Obsolete]"]
		);
		let everything = Renderer::default().with_attribute_filter(|_| true);
		assert_eq!(
			sections(&everything, &attributes, AttributeTarget::Method, AttributeLayout::Discrete).len(),
			2
		);
	}

	#[test]
	fn test_prune_member_not_null_names() {
		let visible = |name: &str| name != "_cache";
		let single = AttributeInstance::new(TypeRef::named(CODE_ANALYSIS, "MemberNotNullAttribute"))
			.with_arg(TypedValue::string("_cache"));
		assert!(prune_null_state_members(&single, &visible).is_none());

		let list = AttributeInstance::new(TypeRef::named(CODE_ANALYSIS, "MemberNotNullWhenAttribute"))
			.with_arg(TypedValue::bool(true))
			.with_arg(TypedValue::array(
				TypeRef::primitive(Primitive::String),
				vec![TypedValue::string("_cache"), TypedValue::string("Name")],
			));
		let pruned = prune_null_state_members(&list, &visible).unwrap();
		assert_eq!(
			render(&Renderer::default(), &pruned).unwrap(),
			"MemberNotNullWhen(true, new string[] { \"Name\" })"
		);

		let unrelated = AttributeInstance::new(TypeRef::named("System", "ObsoleteAttribute"))
			.with_arg(TypedValue::string("_cache"));
		assert!(matches!(prune_null_state_members(&unrelated, &visible), Some(Cow::Borrowed(_))));
	}
}

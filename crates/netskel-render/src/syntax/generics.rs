use std::borrow::Cow;

use netskel_model::{AttributeTarget, GenericParameterDef, SpecialConstraint, TypeRef, Variance};

use super::attributes::{inline_sections, render_attribute_sections};
use super::keywords::escape_identifier;
use crate::error::Result;
use crate::state::RenderState;

/// Render a generic parameter list such as `<[A] out T, U>`; empty when there are no parameters.
pub fn render_generic_parameters(
	state: &mut RenderState<'_>,
	params: &[GenericParameterDef],
	show_variance: bool,
) -> Result<String> {
	if params.is_empty() {
		return Ok(String::new());
	}
	let layout = state.config.attribute_layouts.generic_parameter;
	let mut rendered = Vec::with_capacity(params.len());
	for param in params {
		let sections = render_attribute_sections(
			state,
			param.attributes.iter().map(Cow::Borrowed),
			AttributeTarget::GenericParameter,
			layout,
		)?;
		let variance = match param.variance {
			Variance::Covariant if show_variance => "out ",
			Variance::Contravariant if show_variance => "in ",
			_ => "",
		};
		rendered.push(format!(
			"{}{variance}{}",
			inline_sections(sections),
			escape_identifier(&param.name)
		));
	}
	Ok(format!("<{}>", rendered.join(", ")))
}

fn special_keyword(special: SpecialConstraint) -> &'static str {
	match special {
		SpecialConstraint::ReferenceType => "class",
		SpecialConstraint::NullableReferenceType => "class?",
		SpecialConstraint::ValueType => "struct",
		SpecialConstraint::Unmanaged => "unmanaged",
		SpecialConstraint::NotNull => "notnull",
	}
}

/// Render the `where` clause of one parameter; `None` when it has no constraints.
pub fn render_constraint_clause(state: &mut RenderState<'_>, param: &GenericParameterDef) -> Option<String> {
	let value_like = matches!(
		param.special,
		Some(SpecialConstraint::ValueType | SpecialConstraint::Unmanaged)
	);
	let mut tokens = Vec::new();
	if let Some(special) = param.special {
		tokens.push(special_keyword(special).to_string());
	}
	for constraint in &param.constraints {
		if value_like && is_value_type_base(constraint) {
			continue;
		}
		tokens.push(state.format_type(constraint));
	}
	if param.default_constructor && !value_like {
		tokens.push("new()".to_string());
	}
	if tokens.is_empty() {
		None
	} else {
		Some(format!("where {} : {}", escape_identifier(&param.name), tokens.join(", ")))
	}
}

fn is_value_type_base(ty: &TypeRef) -> bool {
	ty.definition().is_named("System", "ValueType")
}

/// Render every constraint clause, in parameter declaration order, joined by single spaces.
pub fn render_constraints(state: &mut RenderState<'_>, params: &[GenericParameterDef]) -> String {
	let mut ordered: Vec<&GenericParameterDef> = params.iter().collect();
	ordered.sort_by_key(|param| param.position);
	ordered
		.into_iter()
		.filter_map(|param| render_constraint_clause(state, param))
		.collect::<Vec<_>>()
		.join(" ")
}

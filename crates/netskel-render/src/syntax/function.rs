use std::borrow::Cow;

use netskel_model::{AttributeTarget, Parameter, ReturnValue, TypeRef};

use super::attributes::{inline_sections, render_attribute_sections};
use super::keywords::escape_identifier;
use super::types::TypeDecoration;
use crate::error::Result;
use crate::state::RenderState;

/// The `ref`/`in`/`out` keyword of a by-ref parameter and the referenced type.
fn by_ref_parts(param: &Parameter) -> (Option<&'static str>, &TypeRef) {
	match &param.ty {
		TypeRef::ByRef { element } => {
			let keyword = if param.is_out {
				"out"
			} else if param.is_in {
				"in"
			} else {
				"ref"
			};
			(Some(keyword), &**element)
		}
		ty => (None, ty),
	}
}

/// Render one parameter: attributes, modifiers, type, name and default value.
pub fn render_parameter(
	state: &mut RenderState<'_>,
	param: &Parameter,
	index: usize,
	annotate: bool,
	this_parameter: bool,
) -> Result<String> {
	let layout = state.config.attribute_layouts.member;
	let sections = render_attribute_sections(
		state,
		param.attributes.iter().map(Cow::Borrowed),
		AttributeTarget::Parameter,
		layout,
	)?;
	let mut out = inline_sections(sections);
	if this_parameter {
		out.push_str("this ");
	}
	if param.is_param_array {
		out.push_str("params ");
	}
	let (keyword, ty) = by_ref_parts(param);
	if let Some(keyword) = keyword {
		out.push_str(keyword);
		out.push(' ');
	}
	let decoration = TypeDecoration {
		nullability: param.nullability.as_ref(),
		tuple_names: &param.tuple_names,
		annotate,
	};
	out.push_str(&state.format_symbol_type(ty, decoration));
	out.push(' ');
	if param.name.is_empty() {
		out.push_str(&format!("arg{index}"));
	} else {
		out.push_str(&escape_identifier(&param.name));
	}
	if let Some(default) = &param.default_value {
		let literal = state
			.format_literal(default, ty, true, true)
			.unwrap_or_else(|| "default".to_string());
		out.push_str(" = ");
		out.push_str(&literal);
	}
	Ok(out)
}

/// Render a comma-separated parameter list without the surrounding brackets.
pub fn render_parameters(
	state: &mut RenderState<'_>,
	params: &[Parameter],
	annotate: bool,
	is_extension: bool,
) -> Result<String> {
	let mut rendered = Vec::with_capacity(params.len());
	for (index, param) in params.iter().enumerate() {
		rendered.push(render_parameter(state, param, index, annotate, is_extension && index == 0)?);
	}
	Ok(rendered.join(", "))
}

/// Render a return type, with `ref`/`ref readonly` for by-ref returns.
pub fn render_return_type(state: &mut RenderState<'_>, ret: &ReturnValue, annotate: bool) -> String {
	let decoration = TypeDecoration {
		nullability: ret.nullability.as_ref(),
		tuple_names: &ret.tuple_names,
		annotate,
	};
	match &ret.ty {
		TypeRef::ByRef { element } => {
			let keyword = if ret.is_readonly_ref { "ref readonly" } else { "ref" };
			format!("{keyword} {}", state.format_symbol_type(element, decoration))
		}
		ty => state.format_symbol_type(ty, decoration),
	}
}

/// Render `[return: …]` sections for a return value.
pub fn render_return_attributes(state: &mut RenderState<'_>, ret: &ReturnValue) -> Result<Vec<String>> {
	let attributes = ret.attributes.iter().map(|attribute| {
		let mut attribute = Cow::Borrowed(attribute);
		if attribute.target.is_none() {
			attribute.to_mut().target = Some(AttributeTarget::ReturnValue);
		}
		attribute
	});
	let layout = state.config.attribute_layouts.return_value;
	render_attribute_sections(state, attributes, AttributeTarget::Method, layout)
}

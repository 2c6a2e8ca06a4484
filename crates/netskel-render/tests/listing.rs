//! Integration tests covering whole-assembly listings.
mod utils;
use netskel_model::{
	Accessibility, Assembly, AttributeTarget, FieldDef, GenericParameterDef, Member, MethodDef,
	NullabilityInfo, NullableContext, Parameter, Primitive, TypeDef, TypeKind, TypeRef,
	TypedValue,
};
use netskel_render::{AttributeLayout, AttributeLayouts, MethodBodyPolicy, RenderError};
use utils::*;
use utils::assert_eq;

fn void() -> TypeRef {
	prim(Primitive::Void)
}

fn canvas() -> TypeDef {
	let disposable = TypeRef::named("System", "IDisposable");
	let mut canvas = class("Acme", "Canvas");
	canvas.interfaces.push(disposable.clone());
	map_explicit(&mut canvas, disposable, "Dispose", "System.IDisposable.Dispose");

	let mut changed = event("Changed", TypeRef::named("System", "EventHandler"));
	changed.nullability = Some(NullabilityInfo::nullable());
	let mut max = FieldDef::new("Max", int());
	max.is_static = true;
	max.is_literal = true;
	max.constant = Some(TypedValue::int(10));
	let mut count = FieldDef::new("_count", int());
	count.accessibility = Accessibility::Private;
	let mut title = property("Title", string(), Some(Accessibility::Private));
	title.nullability = Some(NullabilityInfo::nullable());
	let draw = method(
		"Draw",
		void(),
		vec![Parameter::new("shape", TypeRef::named("Acme", "IShape"))],
	);
	let mut dispose = MethodDef::new("System.IDisposable.Dispose");
	dispose.accessibility = Accessibility::Private;
	dispose.is_virtual = true;
	dispose.is_final = true;
	let mut layer = class("", "Layer");
	layer.is_sealed = true;

	canvas.members = vec![
		Member::Method(dispose),
		Member::Method(draw),
		Member::Property(title),
		Member::Field(count),
		Member::Field(max),
		Member::Unreadable {
			name: "Broken".into(),
			reason: "signature uses an unknown type".into(),
		},
		Member::Method(constructor(vec![])),
		Member::Event(changed),
	];
	canvas.nested_types.push(layer);
	canvas
}

fn shapes() -> Assembly {
	let mut shape = interface("Acme", "IShape");
	let mut area = method("Area", prim(Primitive::Double), vec![]);
	area.is_abstract = true;
	area.is_virtual = true;
	shape.members.push(Member::Method(area));

	let color_ref = TypeRef::value_type("Acme", "Color");
	let mut color = TypeDef::new("Acme", "Color", TypeKind::Enum);
	for (name, raw) in [("Green", 1), ("Red", 0)] {
		let mut field = FieldDef::new(name, color_ref.clone());
		field.is_static = true;
		field.is_literal = true;
		field.constant = Some(TypedValue::enum_value(color_ref.clone(), raw, false));
		color.members.push(Member::Field(field));
	}

	let mut callback = TypeDef::new("Acme", "Callback", TypeKind::Delegate);
	let mut invoke = method("Invoke", void(), vec![Parameter::new("message", string())]);
	invoke.is_virtual = true;
	callback.members.push(Member::Method(invoke));

	let mut entry = class("", "Entry");
	entry.is_abstract = true;
	entry.is_sealed = true;
	let mut main = method("Main", void(), vec![]);
	main.is_static = true;
	entry.members.push(Member::Method(main));

	let mut hidden = class("Acme", "Internals");
	hidden.accessibility = Accessibility::Internal;

	let mut assembly = assembly(vec![canvas(), shape, color, callback, entry, hidden]);
	assembly.nullable_context = Some(NullableContext::Enabled);
	assembly
}

fn service() -> Assembly {
	let mut service = class("Acme", "Service");
	let mut resolve = method(
		"Resolve",
		TypeRef::named("System", "Uri"),
		vec![Parameter::new("name", string())],
	);
	resolve.is_virtual = true;
	service.members.push(Member::Method(resolve));
	assembly(vec![service])
}

fn annotated() -> Assembly {
	let mut widget = class("Acme", "Widget");
	let mut name = FieldDef::new("_name", string());
	name.accessibility = Accessibility::Private;
	let mut init = method("Init", void(), vec![]);
	init.attributes.push(attribute("System", "ObsoleteAttribute"));
	init.attributes.push(
		attribute("System", "CLSCompliantAttribute").with_arg(TypedValue::bool(false)),
	);
	init.attributes.push(
		attribute("System.Diagnostics.CodeAnalysis", "MemberNotNullAttribute")
			.with_arg(TypedValue::string("_name")),
	);
	init.attributes.push(
		attribute("System.Diagnostics.CodeAnalysis", "MemberNotNullAttribute")
			.with_arg(TypedValue::string("Label")),
	);
	let mut label = property("Label", string(), None);
	if let Some(getter) = label.getter.as_mut() {
		getter
			.attributes
			.push(attribute("System.Diagnostics", "DebuggerHiddenAttribute"));
	}
	widget.members = vec![
		Member::Field(name),
		Member::Method(init),
		Member::Property(label),
	];
	widget.attributes.push(
		attribute("System.Runtime.CompilerServices", "CompilerGeneratedAttribute")
			.with_target(AttributeTarget::Type),
	);
	assembly(vec![widget])
}

/// Two attributes on every attribute-bearing slot of a property and a generic method.
fn tagged() -> Assembly {
	let tag = |name: &str| attribute("Acme.Tags", &format!("{name}Attribute"));
	let mut tagged = class("Acme", "Tagged");

	let mut name = property("Name", int(), Some(Accessibility::Public));
	name.attributes = vec![
		tag("Observed"),
		tag("First").with_target(AttributeTarget::BackingField),
		tag("Pure"),
		tag("Second").with_target(AttributeTarget::BackingField),
	];
	if let Some(getter) = name.getter.as_mut() {
		getter.attributes = vec![tag("First"), tag("Second")];
	}

	let mut param = GenericParameterDef::new("T", 0);
	param.attributes = vec![tag("First"), tag("Second")];
	let mut get = method("Get", int(), vec![]);
	get.generic_parameters.push(param);
	get.attributes = vec![tag("Observed"), tag("Pure")];
	get.return_value.attributes = vec![tag("First"), tag("Second")];

	tagged.members = vec![Member::Property(name), Member::Method(get)];
	assembly(vec![tagged])
}

/// Outer (annotated) declares Inner; Plain follows the assembly's disabled context.
fn mixed_contexts() -> Assembly {
	let mut inner = class("", "Inner");
	inner.members = fields(vec![nullable_field("Name", string(), NullabilityInfo::nullable())]);
	let mut outer = class("Acme", "Outer");
	outer.nullable_context = Some(NullableContext::Enabled);
	outer.members = fields(vec![nullable_field("Label", string(), NullabilityInfo::nullable())]);
	outer.nested_types.push(inner);
	let mut plain = class("Acme", "Plain");
	plain.members = fields(vec![nullable_field("Label", string(), NullabilityInfo::nullable())]);

	let mut assembly = assembly(vec![outer, plain]);
	assembly.nullable_context = Some(NullableContext::Disabled);
	assembly
}

fn indented(text: &str, depth: usize) -> String {
	let pad = "  ".repeat(depth);
	text.lines()
		.map(|line| if line.is_empty() { String::new() } else { format!("{pad}{line}") })
		.collect::<Vec<_>>()
		.join("\n")
}

gen_tests! {
	listing, {
		full_assembly: {
			assembly: shapes(),
			output: r#"
#nullable enable annotations

using System;
using Acme;

public static class Entry {
  public static void Main() {}
}

namespace Acme {
  public delegate void Callback(string message);

  public interface IShape {
    double Area();
  }

  public enum Color {
    Red = 0,
    Green = 1,
  }

  public class Canvas : IDisposable {
    public event EventHandler? Changed;

    public const int Max = 10;

    public Canvas() {}

    public string? Title { get; private set; }

    public void Draw(IShape shape) {}
    void IDisposable.Dispose() {}

    public sealed class Layer {}
  }
}
"#
		}
		qualified_names_with_throwing_bodies: {
			assembly: service(),
			renderer: Renderer::default()
				.with_namespace(true)
				.with_method_body(MethodBodyPolicy::ThrowStub),
			output: r#"
#nullable enable annotations

namespace Acme {
  public class Service {
    public virtual System.Uri Resolve(string name) => throw new System.NotImplementedException();
  }
}
"#
		}
		bodies_and_terminators_omitted: {
			assembly: service(),
			renderer: Renderer::default()
				.with_nullability(false)
				.with_method_body(MethodBodyPolicy::Omit)
				.with_omitted_terminator(true)
				.with_indent("\t"),
			output: "using System;\n\nnamespace Acme {\n\tpublic class Service {\n\t\tpublic virtual Uri Resolve(string name)\n\t}\n}\n"
		}
		discrete_attribute_sections: {
			assembly: annotated(),
			renderer: Renderer::default().with_nullability(false),
			output: r#"
using System;
using System.Diagnostics;
using System.Diagnostics.CodeAnalysis;

namespace Acme {
  public class Widget {
    public string Label { [DebuggerHidden] get; }

    [Obsolete]
    [CLSCompliant(false)]
    [MemberNotNull("Label")]
    public void Init() {}
  }
}
"#
		}
		listed_attribute_sections: {
			assembly: annotated(),
			renderer: Renderer::default()
				.with_nullability(false)
				.with_omitted_inaccessible_null_state_members(false)
				.with_attribute_layouts(AttributeLayouts::uniform(AttributeLayout::List)),
			output: r#"
using System;
using System.Diagnostics;
using System.Diagnostics.CodeAnalysis;

namespace Acme {
  public class Widget {
    public string Label { [DebuggerHidden] get; }

    [Obsolete, CLSCompliant(false), MemberNotNull("_name"), MemberNotNull("Label")]
    public void Init() {}
  }
}
"#
		}
		layouts_split_by_attribute_group: {
			assembly: tagged(),
			renderer: Renderer::default()
				.with_nullability(false)
				.with_attribute_layouts(AttributeLayouts {
					member: AttributeLayout::Discrete,
					..AttributeLayouts::uniform(AttributeLayout::List)
				}),
			output: r#"
using Acme.Tags;

namespace Acme {
  public class Tagged {
    [Observed]
    [Pure]
    [field: First, Second]
    public int Name { [First, Second] get; set; }

    [Observed]
    [Pure]
    [return: First, Second]
    public int Get<[First, Second] T>() {}
  }
}
"#
		}
		member_layout_leaves_other_groups_alone: {
			assembly: tagged(),
			renderer: Renderer::default()
				.with_nullability(false)
				.with_attribute_layouts(AttributeLayouts {
					member: AttributeLayout::List,
					..AttributeLayouts::uniform(AttributeLayout::Discrete)
				}),
			output: r#"
using Acme.Tags;

namespace Acme {
  public class Tagged {
    [Observed, Pure]
    [field: First]
    [field: Second]
    public int Name { [First] [Second] get; set; }

    [Observed, Pure]
    [return: First]
    [return: Second]
    public int Get<[First] [Second] T>() {}
  }
}
"#
		}
		type_context_overrides_disabled_assembly: {
			assembly: mixed_contexts(),
			output: r#"
#nullable enable annotations

namespace Acme {
  public class Outer {
    public string? Label;

    public class Inner {
      public string? Name;
    }
  }

  public class Plain {
    public string Label;
  }
}
"#
		}
	}
}

#[test]
fn test_render_reports_skipped_members() {
	let listing = Renderer::default().render(&shapes());
	assert_eq!(listing.failures.len(), 1);
	assert_eq!(listing.failures[0].symbol, "Acme.Canvas.Broken");
	assert!(matches!(listing.failures[0].error, RenderError::Unreadable { .. }));
	assert_eq!(listing.namespaces, vec!["System".to_string(), "Acme".to_string()]);
}

#[test]
fn test_render_private_members_when_not_ignored() {
	let listing = Renderer::default()
		.with_ignore_private_and_assembly(false)
		.render(&shapes());
	assert!(listing.text.contains("    private int _count;\n"), "{}", listing.text);
	assert!(listing.text.contains("  internal class Internals {}\n"), "{}", listing.text);
}

#[test]
fn test_render_disabled_nullable_context_drops_suffixes() {
	let mut assembly = shapes();
	assembly.nullable_context = Some(NullableContext::Disabled);
	let listing = Renderer::default().render(&assembly);
	assert!(listing.text.contains("public string Title { get; private set; }"), "{}", listing.text);

	// A type-level context overrides the assembly's.
	assembly.types[0].nullable_context = Some(NullableContext::Enabled);
	let listing = Renderer::default().render(&assembly);
	assert!(listing.text.contains("public string? Title { get; private set; }"), "{}", listing.text);
}

#[test]
fn test_render_custom_attribute_filter() {
	let listing = Renderer::default()
		.with_nullability(false)
		.with_attribute_filter(|attribute| !attribute.is("System", "ObsoleteAttribute"))
		.render(&annotated());
	assert!(!listing.text.contains("[Obsolete]"), "{}", listing.text);
	// Replacing the filter also drops the default one.
	assert!(listing.text.contains("[CompilerGenerated]"), "{}", listing.text);
}

#[test]
fn test_render_disabled_context_omits_annotation_header() {
	let mut assembly = mixed_contexts();
	assembly.types[0].nullable_context = None;
	let listing = Renderer::default().render(&assembly);
	assert!(!listing.text.contains("#nullable"), "{}", listing.text);
	assert!(listing.text.starts_with("namespace Acme {\n"), "{}", listing.text);

	// A single annotated member is enough to keep the header.
	let Member::Field(label) = &mut assembly.types[1].members[0] else {
		unreachable!("Plain declares one field");
	};
	label.nullable_context = Some(NullableContext::Enabled);
	let listing = Renderer::default().render(&assembly);
	assert!(listing.text.starts_with("#nullable enable annotations\n\n"), "{}", listing.text);
}

#[test]
fn test_render_type_matches_block_in_listing() {
	let assembly = mixed_contexts();
	let renderer = Renderer::default();
	let listing = renderer.render(&assembly);

	for (full_name, depth) in [("Acme.Outer", 1), ("Acme.Outer+Inner", 2), ("Acme.Plain", 1)] {
		let block = renderer.render_type(&assembly, full_name).unwrap();
		assert!(
			listing.text.contains(&indented(&block, depth)),
			"{full_name}:\n{block}\n---\n{}",
			listing.text
		);
	}
	assert_eq!(
		renderer.render_type(&assembly, "Acme.Outer+Inner").unwrap(),
		"public class Inner {\n  public string? Name;\n}"
	);
	assert!(matches!(
		renderer.render_type(&assembly, "Acme.Inner"),
		Err(RenderError::UnknownType(_))
	));
}

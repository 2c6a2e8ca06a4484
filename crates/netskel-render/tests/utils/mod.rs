//! Builders shared by the rendering integration tests.
#![allow(dead_code)]

use netskel_model::{
	Accessibility, Assembly, AttributeInstance, EventDef, FieldDef, InterfaceMapping, Member,
	MethodDef, MethodMapping, NullabilityInfo, Parameter, Primitive, PropertyDef, TypeDef,
	TypeKind, TypeRef,
};
pub use netskel_render::{Listing, Renderer};
pub use pretty_assertions::assert_eq;

/// A primitive type reference.
pub fn prim(primitive: Primitive) -> TypeRef {
	TypeRef::primitive(primitive)
}

/// `int`.
pub fn int() -> TypeRef {
	prim(Primitive::Int)
}

/// `string`.
pub fn string() -> TypeRef {
	prim(Primitive::String)
}

/// A public class in `namespace`.
pub fn class(namespace: &str, name: &str) -> TypeDef {
	TypeDef::new(namespace, name, TypeKind::Class)
}

/// A public interface in `namespace`.
pub fn interface(namespace: &str, name: &str) -> TypeDef {
	TypeDef::new(namespace, name, TypeKind::Interface)
}

/// An attribute application without arguments.
pub fn attribute(namespace: &str, name: &str) -> AttributeInstance {
	AttributeInstance::new(TypeRef::named(namespace, name))
}

/// A public method returning `ret`.
pub fn method(name: &str, ret: TypeRef, params: Vec<Parameter>) -> MethodDef {
	let mut method = MethodDef::new(name);
	method.return_value.ty = ret;
	method.parameters = params;
	method
}

/// A special-name accessor method with the given accessibility.
pub fn accessor(name: &str, accessibility: Accessibility) -> MethodDef {
	let mut method = MethodDef::new(name);
	method.accessibility = accessibility;
	method.is_special_name = true;
	method
}

/// A public instance constructor.
pub fn constructor(params: Vec<Parameter>) -> MethodDef {
	let mut ctor = MethodDef::new(".ctor");
	ctor.is_special_name = true;
	ctor.parameters = params;
	ctor
}

/// A property with a public getter and, optionally, a setter of `setter` accessibility.
pub fn property(name: &str, ty: TypeRef, setter: Option<Accessibility>) -> PropertyDef {
	let mut property = PropertyDef::new(name, ty);
	property.getter = Some(accessor(&format!("get_{name}"), Accessibility::Public));
	property.setter = setter.map(|accessibility| accessor(&format!("set_{name}"), accessibility));
	property
}

/// A public field-like event.
pub fn event(name: &str, ty: TypeRef) -> EventDef {
	let mut event = EventDef::new(name, ty);
	event.add = Some(accessor(&format!("add_{name}"), Accessibility::Public));
	event.remove = Some(accessor(&format!("remove_{name}"), Accessibility::Public));
	event
}

/// A field annotated as nullable.
pub fn nullable_field(name: &str, ty: TypeRef, info: NullabilityInfo) -> FieldDef {
	let mut field = FieldDef::new(name, ty);
	field.nullability = Some(info);
	field
}

/// Map `target` onto `interface.member` as an explicit implementation.
pub fn map_explicit(def: &mut TypeDef, interface: TypeRef, member: &str, target: &str) {
	def.interface_maps.push(InterfaceMapping {
		interface,
		methods: vec![MethodMapping {
			interface_method: member.to_string(),
			target_method: target.to_string(),
		}],
	});
}

/// Wrap members in `Member` values.
pub fn fields(fields: Vec<FieldDef>) -> Vec<Member> {
	fields.into_iter().map(Member::Field).collect()
}

/// An assembly holding `types`.
pub fn assembly(types: Vec<TypeDef>) -> Assembly {
	Assembly {
		name: "Acme.Core".to_string(),
		types,
		..Assembly::default()
	}
}

/// Render a single member of `owner` declared in an assembly of its own.
pub fn render_member(renderer: &Renderer, owner: &TypeDef, member: Member) -> String {
	let assembly = assembly(vec![owner.clone()]);
	renderer
		.render_member(&assembly, owner, &member)
		.expect("member renders")
		.expect("member is listed")
}

/// Strip the leading newline of an indented raw-string fixture.
pub fn expected(text: &str) -> String {
	text.strip_prefix('\n').unwrap_or(text).to_string()
}

/// Generate one `#[test]` per case comparing a rendered listing with its fixture.
#[macro_export]
macro_rules! gen_tests {
	($group:ident, { $( $name:ident: { assembly: $assembly:expr, $( renderer: $renderer:expr, )? output: $output:expr $(,)? } )* }) => {
		mod $group {
			use super::*;
			$(
				#[test]
				fn $name() {
					#[allow(unused_mut, unused_assignments)]
					let mut renderer = Renderer::default();
					$( renderer = $renderer; )?
					let listing = renderer.render(&$assembly);
					::pretty_assertions::assert_eq!(listing.text, expected($output));
				}
			)*
		}
	};
}

use bitflags::bitflags;
use netskel_model::{
	Accessibility, EventDef, FieldDef, MethodDef, PropertyDef, TypeDef, TypeKind, TypeRef,
};

use crate::error::{RenderError, Result};
use crate::utils::strip_accessor_prefix;

bitflags! {
	/// Modifier keywords other than accessibility.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ModifierFlags: u16 {
		/// `new`: hides an inherited member.
		const NEW = 1 << 0;
		/// `const`.
		const CONST = 1 << 1;
		/// `static`.
		const STATIC = 1 << 2;
		/// `abstract`.
		const ABSTRACT = 1 << 3;
		/// `virtual`.
		const VIRTUAL = 1 << 4;
		/// `sealed`.
		const SEALED = 1 << 5;
		/// `override`.
		const OVERRIDE = 1 << 6;
		/// `readonly`.
		const READONLY = 1 << 7;
		/// `volatile`.
		const VOLATILE = 1 << 8;
		/// `unsafe`.
		const UNSAFE = 1 << 9;
		/// `extern`.
		const EXTERN = 1 << 10;
		/// `fixed`.
		const FIXED = 1 << 11;
	}
}

/// Keywords in emission order.
const KEYWORDS: &[(ModifierFlags, &str)] = &[
	(ModifierFlags::NEW, "new"),
	(ModifierFlags::CONST, "const"),
	(ModifierFlags::STATIC, "static"),
	(ModifierFlags::ABSTRACT, "abstract"),
	(ModifierFlags::VIRTUAL, "virtual"),
	(ModifierFlags::SEALED, "sealed"),
	(ModifierFlags::OVERRIDE, "override"),
	(ModifierFlags::READONLY, "readonly"),
	(ModifierFlags::VOLATILE, "volatile"),
	(ModifierFlags::UNSAFE, "unsafe"),
	(ModifierFlags::EXTERN, "extern"),
	(ModifierFlags::FIXED, "fixed"),
];

impl ModifierFlags {
	/// The keywords set in `self`, in emission order.
	pub fn keywords(self) -> impl Iterator<Item = &'static str> {
		KEYWORDS
			.iter()
			.filter(move |(flag, _)| self.contains(*flag))
			.map(|(_, keyword)| *keyword)
	}
}

/// Modifiers resolved for one member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedModifiers {
	/// Accessibility keyword, `None` when none is written.
	pub accessibility: Option<Accessibility>,
	/// Remaining keywords.
	pub flags: ModifierFlags,
	/// Interface an explicit implementation qualifies its name with.
	pub explicit_interface: Option<TypeRef>,
	/// Name of the implemented interface member.
	pub explicit_name: Option<String>,
	/// Accessibility written on the first and second accessor (get/set, add/remove)
	/// when narrower than the member's.
	pub accessors: [Option<Accessibility>; 2],
}

impl ResolvedModifiers {
	/// Keywords followed by a space, e.g. `public static `.
	pub fn prefix(&self) -> String {
		self.accessibility
			.map(Accessibility::keyword)
			.into_iter()
			.chain(self.flags.keywords())
			.map(|keyword| format!("{keyword} "))
			.collect()
	}

	/// Whether the member is an explicit interface implementation.
	pub fn is_explicit(&self) -> bool {
		self.explicit_interface.is_some()
	}
}

/// The interface and interface member name `method_name` explicitly implements.
pub fn explicit_mapping<'t>(owner: &'t TypeDef, method_name: &str) -> Option<(&'t TypeRef, &'t str)> {
	owner.interface_maps.iter().find_map(|map| {
		map.methods
			.iter()
			.find(|mapping| mapping.target_method == method_name && mapping.interface_method != method_name)
			.map(|mapping| (&map.interface, mapping.interface_method.as_str()))
	})
}

/// Whether a metadata name is qualified like an explicit implementation (`Ns.IFace.Member`).
fn is_qualified(name: &str) -> bool {
	!name.starts_with('.') && name.contains('.')
}

fn method_is_unsafe(method: &MethodDef) -> bool {
	method.return_value.ty.contains_pointer()
		|| method.parameters.iter().any(|param| param.ty.contains_pointer())
}

/// Whether `method` overrides a definition declared in another type.
fn is_override(method: &MethodDef, owner_ref: &TypeRef) -> bool {
	method
		.base_definition
		.as_ref()
		.is_some_and(|base| base.definition().full_name() != owner_ref.definition().full_name())
}

fn inheritance_flags(method: &MethodDef, owner_ref: &TypeRef) -> ModifierFlags {
	let mut flags = ModifierFlags::empty();
	if method.hides_inherited == Some(true) {
		flags |= ModifierFlags::NEW;
	}
	if method.is_static {
		flags |= ModifierFlags::STATIC;
	}
	if method.is_abstract {
		flags |= ModifierFlags::ABSTRACT;
	}
	if is_override(method, owner_ref) {
		flags |= ModifierFlags::OVERRIDE;
		if method.is_final {
			flags |= ModifierFlags::SEALED;
		}
	} else if method.is_virtual && !method.is_final && !method.is_abstract {
		flags |= ModifierFlags::VIRTUAL;
	}
	flags
}

fn explicit(
	interface: &TypeRef,
	name: &str,
	flags: ModifierFlags,
	accessor: bool,
) -> ResolvedModifiers {
	let name = if accessor { strip_accessor_prefix(name) } else { name };
	ResolvedModifiers {
		accessibility: None,
		flags: flags & (ModifierFlags::UNSAFE | ModifierFlags::EXTERN),
		explicit_interface: Some(interface.clone()),
		explicit_name: Some(name.to_string()),
		accessors: [None, None],
	}
}

/// Resolve modifiers of a method, constructor or operator declared in `owner`.
pub fn resolve_method(owner: &TypeDef, owner_ref: &TypeRef, method: &MethodDef) -> Result<ResolvedModifiers> {
	let mut flags = ModifierFlags::empty();
	if method_is_unsafe(method) {
		flags |= ModifierFlags::UNSAFE;
	}
	if method.is_extern {
		flags |= ModifierFlags::EXTERN;
	}
	if let Some((interface, name)) = explicit_mapping(owner, &method.name) {
		return Ok(explicit(interface, name, flags, false));
	}
	if is_qualified(&method.name) {
		return Err(RenderError::UnmappedExplicitImplementation(method.name.clone()));
	}
	if owner.kind == TypeKind::Interface {
		return Ok(ResolvedModifiers {
			flags: flags & ModifierFlags::UNSAFE,
			..ResolvedModifiers::default()
		});
	}
	flags |= inheritance_flags(method, owner_ref);
	if method.is_readonly {
		flags |= ModifierFlags::READONLY;
	}
	let accessibility = (method.name != ".cctor").then_some(method.accessibility);
	Ok(ResolvedModifiers {
		accessibility,
		flags,
		..ResolvedModifiers::default()
	})
}

/// Resolve modifiers shared by a pair of accessors.
///
/// The member takes the accessibility of its most open accessor; a strictly
/// narrower accessor keeps its own.
fn resolve_accessors(
	owner: &TypeDef,
	owner_ref: &TypeRef,
	accessors: [Option<&MethodDef>; 2],
	unsafe_type: bool,
) -> Option<ResolvedModifiers> {
	let primary = accessors
		.iter()
		.flatten()
		.copied()
		.reduce(|best, next| if next.accessibility > best.accessibility { next } else { best })?;

	let mut flags = ModifierFlags::empty();
	if unsafe_type || accessors.iter().flatten().any(|accessor| method_is_unsafe(accessor)) {
		flags |= ModifierFlags::UNSAFE;
	}
	for accessor in accessors.iter().flatten() {
		if let Some((interface, name)) = explicit_mapping(owner, &accessor.name) {
			return Some(explicit(interface, name, flags, true));
		}
	}
	if owner.kind == TypeKind::Interface {
		return Some(ResolvedModifiers {
			flags,
			..ResolvedModifiers::default()
		});
	}

	flags |= inheritance_flags(primary, owner_ref);
	if accessors.iter().flatten().all(|accessor| accessor.is_readonly) {
		flags |= ModifierFlags::READONLY;
	}
	let overrides = accessors.map(|accessor| {
		accessor
			.map(|accessor| accessor.accessibility)
			.filter(|accessibility| *accessibility < primary.accessibility)
	});
	Some(ResolvedModifiers {
		accessibility: Some(primary.accessibility),
		flags,
		explicit_interface: None,
		explicit_name: None,
		accessors: overrides,
	})
}

/// Resolve modifiers of a property or indexer.
pub fn resolve_property(owner: &TypeDef, owner_ref: &TypeRef, property: &PropertyDef) -> Result<ResolvedModifiers> {
	let unsafe_type = property.ty.contains_pointer()
		|| property
			.index_parameters
			.iter()
			.any(|param| param.ty.contains_pointer());
	resolve_accessors(
		owner,
		owner_ref,
		[property.getter.as_ref(), property.setter.as_ref()],
		unsafe_type,
	)
	.ok_or_else(|| RenderError::PropertyWithoutAccessors(property.name.clone()))
}

/// Resolve modifiers of an event.
pub fn resolve_event(owner: &TypeDef, owner_ref: &TypeRef, event: &EventDef) -> Result<ResolvedModifiers> {
	if event.add.is_none() || event.remove.is_none() {
		return Err(RenderError::EventWithoutAccessors(event.name.clone()));
	}
	resolve_accessors(
		owner,
		owner_ref,
		[event.add.as_ref(), event.remove.as_ref()],
		event.ty.contains_pointer(),
	)
	.ok_or_else(|| RenderError::EventWithoutAccessors(event.name.clone()))
}

/// Resolve modifiers of a field.
pub fn resolve_field(field: &FieldDef) -> ResolvedModifiers {
	let mut flags = ModifierFlags::empty();
	if field.hides_inherited == Some(true) {
		flags |= ModifierFlags::NEW;
	}
	if field.is_literal {
		flags |= ModifierFlags::CONST;
	} else {
		if field.is_static {
			flags |= ModifierFlags::STATIC;
		}
		if field.is_init_only {
			flags |= ModifierFlags::READONLY;
		}
		if field.is_volatile {
			flags |= ModifierFlags::VOLATILE;
		}
	}
	if field.fixed_buffer.is_some() {
		flags |= ModifierFlags::FIXED;
	} else if field.ty.contains_pointer() {
		flags |= ModifierFlags::UNSAFE;
	}
	ResolvedModifiers {
		accessibility: Some(field.accessibility),
		flags,
		..ResolvedModifiers::default()
	}
}

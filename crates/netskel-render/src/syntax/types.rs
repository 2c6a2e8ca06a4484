use netskel_model::{NullabilityInfo, Primitive, TypeRef, Variance, strip_arity};

use crate::namespaces::Namespaces;

/// Options controlling how type names are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeNameOptions {
	/// Prefix top-level names with their namespace.
	pub with_namespace: bool,
	/// Qualify nested types with their declaring types.
	pub with_declaring_type_name: bool,
	/// Use keyword aliases (`int`) instead of runtime names (`Int32`).
	pub translate_primitive_aliases: bool,
	/// Prefix a generic parameter with its `in`/`out` marker.
	pub show_variance: bool,
}

impl Default for TypeNameOptions {
	fn default() -> Self {
		Self {
			with_namespace: false,
			with_declaring_type_name: true,
			translate_primitive_aliases: true,
			show_variance: false,
		}
	}
}

impl TypeNameOptions {
	/// Copy of these options with variance markers toggled.
	pub fn with_variance(self, show_variance: bool) -> Self {
		Self {
			show_variance,
			..self
		}
	}
}

/// Side-channel metadata of the symbol a type is rendered for.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeDecoration<'a> {
	/// Nullability annotations shaped like the type.
	pub nullability: Option<&'a NullabilityInfo>,
	/// Tuple element names in pre-order.
	pub tuple_names: &'a [Option<String>],
	/// Whether reference-type `?` suffixes are rendered.
	pub annotate: bool,
}

/// Render a type reference without symbol decorations.
pub fn format_type(ty: &TypeRef, opts: TypeNameOptions, namespaces: &mut Namespaces) -> String {
	format_decorated_type(ty, opts, TypeDecoration::default(), namespaces)
}

/// Render a type reference for a symbol carrying nullability and tuple names.
pub fn format_decorated_type(
	ty: &TypeRef,
	opts: TypeNameOptions,
	decoration: TypeDecoration<'_>,
	namespaces: &mut Namespaces,
) -> String {
	let mut writer = TypeWriter {
		opts,
		annotate: decoration.annotate,
		tuple_names: decoration.tuple_names,
		cursor: 0,
		namespaces,
	};
	writer.write(ty, decoration.nullability, opts.show_variance)
}

/// Render a primitive by alias or runtime name.
pub fn format_primitive(
	primitive: Primitive,
	opts: TypeNameOptions,
	namespaces: &mut Namespaces,
) -> String {
	if opts.translate_primitive_aliases {
		return primitive.alias().to_string();
	}
	namespaces.insert(Primitive::NAMESPACE);
	if opts.with_namespace {
		format!("{}.{}", Primitive::NAMESPACE, primitive.runtime_name())
	} else {
		primitive.runtime_name().to_string()
	}
}

fn element_info(info: Option<&NullabilityInfo>) -> Option<&NullabilityInfo> {
	info.and_then(|info| info.element.as_deref())
}

fn argument_info(info: Option<&NullabilityInfo>, index: usize) -> Option<&NullabilityInfo> {
	info.and_then(|info| info.arguments.get(index))
}

fn is_value_tuple(definition: &TypeRef) -> bool {
	matches!(definition, TypeRef::Named { namespace, name, .. }
		if namespace == "System" && strip_arity(name).0 == "ValueTuple")
}

/// Flatten `ValueTuple<T1, …, T7, TRest>` into its element list.
fn flatten_tuple<'t>(
	args: &'t [TypeRef],
	info: Option<&'t NullabilityInfo>,
	out: &mut Vec<(&'t TypeRef, Option<&'t NullabilityInfo>)>,
) {
	for (index, arg) in args.iter().enumerate() {
		let arg_info = argument_info(info, index);
		if index == 7 {
			match arg {
				TypeRef::Generic { definition, args } if is_value_tuple(definition) => {
					flatten_tuple(args, arg_info, out);
					continue;
				}
				TypeRef::Tuple { elements } => {
					flatten_tuple(elements, arg_info, out);
					continue;
				}
				_ => {}
			}
		}
		out.push((arg, arg_info));
	}
}

/// Number of tuple element names a type consumes in pre-order.
fn tuple_slots(ty: &TypeRef) -> usize {
	match ty {
		TypeRef::Array { element, .. }
		| TypeRef::Pointer { element }
		| TypeRef::ByRef { element } => tuple_slots(element),
		TypeRef::Nullable { underlying } => tuple_slots(underlying),
		TypeRef::Tuple { elements } => elements.len() + elements.iter().map(tuple_slots).sum::<usize>(),
		TypeRef::Generic { definition, args } => {
			let own = if is_value_tuple(definition) && args.len() >= 2 {
				let mut flat = Vec::new();
				flatten_tuple(args, None, &mut flat);
				flat.len()
			} else {
				0
			};
			own + args.iter().map(tuple_slots).sum::<usize>()
		}
		_ => 0,
	}
}

struct TypeWriter<'a, 'n> {
	opts: TypeNameOptions,
	annotate: bool,
	tuple_names: &'a [Option<String>],
	cursor: usize,
	namespaces: &'n mut Namespaces,
}

impl TypeWriter<'_, '_> {
	fn write(&mut self, ty: &TypeRef, info: Option<&NullabilityInfo>, show_variance: bool) -> String {
		match ty {
			TypeRef::Array { element, rank } => self.write_array(element, *rank, info),
			TypeRef::Pointer { element } => format!("{}*", self.write(element, element_info(info), false)),
			TypeRef::ByRef { element } => format!("{}&", self.write(element, info, false)),
			TypeRef::Nullable { underlying } => {
				format!("{}?", self.write(underlying, argument_info(info, 0), false))
			}
			TypeRef::Generic { definition, args } => self.write_generic(definition, args, info),
			TypeRef::Tuple { elements } => {
				let mut flat = Vec::new();
				flatten_tuple(elements, info, &mut flat);
				self.write_tuple(&flat)
			}
			TypeRef::GenericParameter { name, variance, .. } => {
				let marker = match variance {
					Variance::Covariant if show_variance => "out ",
					Variance::Contravariant if show_variance => "in ",
					_ => "",
				};
				format!("{marker}{name}{}", self.suffix(info, false))
			}
			TypeRef::Primitive { primitive } => {
				let name = format_primitive(*primitive, self.opts, self.namespaces);
				format!("{name}{}", self.suffix(info, primitive.is_value_type()))
			}
			TypeRef::Named { .. } | TypeRef::Nested { .. } => {
				let name = self.write_named(ty, &[], info);
				format!("{name}{}", self.suffix(info, ty.is_value_type()))
			}
		}
	}

	fn suffix(&self, info: Option<&NullabilityInfo>, value_type: bool) -> &'static str {
		if self.annotate && !value_type && info.is_some_and(NullabilityInfo::is_nullable) {
			"?"
		} else {
			""
		}
	}

	/// The element comes first; each array layer then appends its brackets and suffix.
	fn write_array(&mut self, element: &TypeRef, rank: u32, info: Option<&NullabilityInfo>) -> String {
		let element = self.write(element, element_info(info), false);
		let commas = ",".repeat((rank as usize).saturating_sub(1));
		format!("{element}[{commas}]{}", self.suffix(info, false))
	}

	fn write_generic(
		&mut self,
		definition: &TypeRef,
		args: &[TypeRef],
		info: Option<&NullabilityInfo>,
	) -> String {
		if definition.is_named("System", "Nullable`1") && args.len() == 1 {
			return format!("{}?", self.write(&args[0], argument_info(info, 0), false));
		}
		if is_value_tuple(definition) && args.len() >= 2 {
			let mut flat = Vec::new();
			flatten_tuple(args, info, &mut flat);
			return self.write_tuple(&flat);
		}
		let name = self.write_named(definition, args, info);
		format!("{name}{}", self.suffix(info, definition.is_value_type()))
	}

	fn write_tuple(&mut self, elements: &[(&TypeRef, Option<&NullabilityInfo>)]) -> String {
		let names: Vec<Option<String>> = elements.iter().map(|_| self.next_tuple_name()).collect();
		let mut parts = Vec::with_capacity(elements.len());
		for ((ty, info), name) in elements.iter().zip(names) {
			let rendered = self.write(ty, *info, false);
			parts.push(match name {
				Some(name) => format!("{rendered} {name}"),
				None => rendered,
			});
		}
		format!("({})", parts.join(", "))
	}

	fn next_tuple_name(&mut self) -> Option<String> {
		let name = self.tuple_names.get(self.cursor).cloned().flatten();
		self.cursor += 1;
		name
	}

	/// Render a top-level or nested name, distributing `args` over the nesting chain by arity.
	fn write_named(&mut self, ty: &TypeRef, args: &[TypeRef], info: Option<&NullabilityInfo>) -> String {
		if let Some(primitive) = ty.as_primitive() {
			return format_primitive(primitive, self.opts, self.namespaces);
		}
		let mut chain = Vec::new();
		let mut current = ty;
		let namespace = loop {
			match current {
				TypeRef::Nested { declaring, name, .. } => {
					chain.push(name.as_str());
					current = declaring;
				}
				TypeRef::Named { namespace, name, .. } => {
					chain.push(name.as_str());
					break namespace.as_str();
				}
				other => {
					// Declaring types are always definitions; anything else is rendered as-is.
					let rendered = self.write(other, None, false);
					chain.reverse();
					return format!("{rendered}.{}", chain.join("."));
				}
			}
		};
		chain.reverse();
		self.namespaces.insert(namespace);

		let last = chain.len() - 1;
		let mut offset = 0;
		let mut segments = Vec::with_capacity(chain.len());
		for (depth, name) in chain.iter().enumerate() {
			let (base, arity) = strip_arity(name);
			let end = (offset + arity).min(args.len());
			let own = &args[offset..end];
			let visible = depth == last || self.opts.with_declaring_type_name;
			if !visible {
				self.cursor += own.iter().map(tuple_slots).sum::<usize>();
				offset = end;
				continue;
			}
			if own.is_empty() {
				segments.push(base.to_string());
			} else {
				let mut rendered = Vec::with_capacity(own.len());
				for (index, arg) in own.iter().enumerate() {
					rendered.push(self.write(arg, argument_info(info, offset + index), false));
				}
				segments.push(format!("{base}<{}>", rendered.join(", ")));
			}
			offset = end;
		}

		let joined = segments.join(".");
		if self.opts.with_namespace && !namespace.is_empty() {
			format!("{namespace}.{joined}")
		} else {
			joined
		}
	}
}

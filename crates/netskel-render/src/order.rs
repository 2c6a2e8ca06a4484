use netskel_model::{TypeDef, TypeKind};

use crate::items::Declaration;

/// Member groups in listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberGroup {
	/// Events.
	Event,
	/// Fields.
	Field,
	/// Instance and static constructors.
	Constructor,
	/// Properties and indexers.
	Property,
	/// Methods, operators and destructors.
	Method,
}

/// Listing precedence of a type kind.
pub fn type_rank(kind: TypeKind) -> u8 {
	match kind {
		TypeKind::Delegate => 0,
		TypeKind::Interface => 1,
		TypeKind::Enum => 2,
		TypeKind::Class => 3,
		TypeKind::Struct => 4,
	}
}

/// Sort types by kind precedence, then ordinal name.
pub fn sort_types(types: &mut [&TypeDef]) {
	types.sort_by(|a, b| {
		type_rank(a.kind)
			.cmp(&type_rank(b.kind))
			.then_with(|| a.name.cmp(&b.name))
	});
}

/// Sort member declarations by group, then name, then rendered text.
pub fn sort_declarations(declarations: &mut [Declaration]) {
	declarations.sort_by(|a, b| {
		a.group
			.cmp(&b.group)
			.then_with(|| a.name.cmp(&b.name))
			.then_with(|| a.lines.cmp(&b.lines))
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	fn declaration(group: MemberGroup, name: &str, text: &str) -> Declaration {
		Declaration {
			group,
			name: name.to_string(),
			lines: vec![text.to_string()],
		}
	}

	#[test]
	fn types_follow_kind_precedence() {
		let class = TypeDef::new("Ns", "A", TypeKind::Class);
		let delegate = TypeDef::new("Ns", "Z", TypeKind::Delegate);
		let strukt = TypeDef::new("Ns", "B", TypeKind::Struct);
		let interface = TypeDef::new("Ns", "IC", TypeKind::Interface);
		let enumeration = TypeDef::new("Ns", "E", TypeKind::Enum);
		let mut types = vec![&class, &strukt, &enumeration, &interface, &delegate];
		sort_types(&mut types);
		let names: Vec<&str> = types.iter().map(|ty| ty.name.as_str()).collect();
		assert_eq!(names, vec!["Z", "IC", "E", "A", "B"]);
	}

	#[test]
	fn members_group_then_name_then_text() {
		let mut declarations = vec![
			declaration(MemberGroup::Method, "Run", "public void Run(int x) {}"),
			declaration(MemberGroup::Property, "Name", "public string Name { get; }"),
			declaration(MemberGroup::Method, "Run", "public void Run() {}"),
			declaration(MemberGroup::Event, "Changed", "public event EventHandler Changed;"),
			declaration(MemberGroup::Constructor, ".ctor", "public Widget() {}"),
			declaration(MemberGroup::Field, "Count", "public int Count;"),
			declaration(MemberGroup::Method, "Close", "public void Close() {}"),
		];
		sort_declarations(&mut declarations);
		let lines: Vec<&str> = declarations.iter().map(|d| d.lines[0].as_str()).collect();
		assert_eq!(
			lines,
			vec![
				"public event EventHandler Changed;",
				"public int Count;",
				"public Widget() {}",
				"public string Name { get; }",
				"public void Close() {}",
				"public void Run() {}",
				"public void Run(int x) {}",
			]
		);
	}
}

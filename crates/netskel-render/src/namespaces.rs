use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Namespaces referenced by the names rendered during one pass.
///
/// Append-only. Owned by the pass; formatters receive it by `&mut`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespaces {
	seen: BTreeSet<String>,
}

impl Namespaces {
	/// An empty collector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record a namespace. The global namespace is ignored.
	pub fn insert(&mut self, namespace: &str) {
		if !namespace.is_empty() && !self.seen.contains(namespace) {
			self.seen.insert(namespace.to_string());
		}
	}

	/// Whether `namespace` was recorded.
	pub fn contains(&self, namespace: &str) -> bool {
		self.seen.contains(namespace)
	}

	/// Whether nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.seen.is_empty()
	}

	/// Namespaces in `using` order: `System` and `System.*` first, then ordinal.
	pub fn ordered(&self) -> Vec<&str> {
		let mut namespaces: Vec<&str> = self.seen.iter().map(String::as_str).collect();
		namespaces.sort_by(|a, b| compare_using_order(a, b));
		namespaces
	}
}

fn is_system(namespace: &str) -> bool {
	namespace == "System" || namespace.starts_with("System.")
}

fn compare_using_order(a: &str, b: &str) -> Ordering {
	is_system(b).cmp(&is_system(a)).then_with(|| a.cmp(b))
}

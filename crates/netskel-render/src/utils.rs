/// Indent every non-empty line by one level.
pub fn indent_lines(lines: Vec<String>, indent: &str) -> Vec<String> {
	lines
		.into_iter()
		.map(|line| {
			if line.is_empty() {
				line
			} else {
				format!("{indent}{line}")
			}
		})
		.collect()
}

/// Concatenate blocks of lines with a blank line between consecutive blocks.
pub fn join_blocks(blocks: Vec<Vec<String>>) -> Vec<String> {
	let mut lines = Vec::new();
	for block in blocks {
		if !lines.is_empty() {
			lines.push(String::new());
		}
		lines.extend(block);
	}
	lines
}

/// Drop an accessor prefix (`get_`, `set_`, `add_`, `remove_`) from a method name.
pub fn strip_accessor_prefix(name: &str) -> &str {
	["get_", "set_", "add_", "remove_"]
		.iter()
		.find_map(|prefix| name.strip_prefix(prefix))
		.unwrap_or(name)
}

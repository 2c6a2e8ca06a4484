/// Reserved words that must be prefixed with `@` to be used as identifiers.
const RESERVED_WORDS: &[&str] = &[
	"abstract",
	"as",
	"base",
	"bool",
	"break",
	"byte",
	"case",
	"catch",
	"char",
	"checked",
	"class",
	"const",
	"continue",
	"decimal",
	"default",
	"delegate",
	"do",
	"double",
	"else",
	"enum",
	"event",
	"explicit",
	"extern",
	"false",
	"finally",
	"fixed",
	"float",
	"for",
	"foreach",
	"goto",
	"if",
	"implicit",
	"in",
	"int",
	"interface",
	"internal",
	"is",
	"lock",
	"long",
	"namespace",
	"new",
	"null",
	"object",
	"operator",
	"out",
	"override",
	"params",
	"private",
	"protected",
	"public",
	"readonly",
	"ref",
	"return",
	"sbyte",
	"sealed",
	"short",
	"sizeof",
	"stackalloc",
	"static",
	"string",
	"struct",
	"switch",
	"this",
	"throw",
	"true",
	"try",
	"typeof",
	"uint",
	"ulong",
	"unchecked",
	"unsafe",
	"ushort",
	"using",
	"virtual",
	"void",
	"volatile",
	"while",
];

/// Check whether a name collides with a reserved word.
pub fn is_reserved_word(name: &str) -> bool {
	RESERVED_WORDS.binary_search(&name).is_ok()
}

/// Render an identifier, escaping reserved words with `@`.
pub fn escape_identifier(name: &str) -> String {
	if is_reserved_word(name) {
		format!("@{name}")
	} else {
		name.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reserved_word_table_is_sorted() {
		let mut sorted = RESERVED_WORDS.to_vec();
		sorted.sort_unstable();
		assert_eq!(sorted, RESERVED_WORDS);
	}

	#[test]
	fn escapes_only_reserved_words() {
		assert_eq!(escape_identifier("event"), "@event");
		assert_eq!(escape_identifier("params"), "@params");
		assert_eq!(escape_identifier("value"), "value");
		assert_eq!(escape_identifier("Event"), "Event");
	}
}

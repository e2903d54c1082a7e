use crate::tokens::BraceShape;
use crate::tokens::References;
use crate::tokens::VariableReference;

const DOLLAR: u8 = b'$';
const BRACE_OPEN: u8 = b'{';
const BRACE_CLOSE: u8 = b'}';

/// Word characters allowed in a variable name: `[A-Za-z0-9_]`.
fn is_word_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Walks the bytes of a source text and collects reference tokens.
///
/// Every token starts at a `$`. From there the walker greedily takes:
///
/// 1. an optional `{`
/// 2. zero or more word bytes, which become the name
/// 3. an optional `}`
///
/// Steps 1 and 3 do not depend on each other, so `${A`, `$A}` and `$}` are all
/// tokens. Scanning resumes after the last byte consumed, so tokens never
/// overlap. All delimiters are ASCII, which keeps every span on a UTF-8 char
/// boundary.
struct ReferenceWalker<'a> {
	source: &'a str,
	bytes: &'a [u8],
	cursor: usize,
	references: Vec<VariableReference>,
}

impl<'a> ReferenceWalker<'a> {
	fn new(source: &'a str) -> Self {
		Self {
			source,
			bytes: source.as_bytes(),
			cursor: 0,
			references: vec![],
		}
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.cursor).copied()
	}

	/// Consume the current byte when it equals `expected`.
	fn eat(&mut self, expected: u8) -> bool {
		if self.peek() == Some(expected) {
			self.cursor += 1;
			true
		} else {
			false
		}
	}

	/// Move the cursor to the next `$`, returning false when none remain.
	fn seek_dollar(&mut self) -> bool {
		match self.bytes[self.cursor..].iter().position(|&b| b == DOLLAR) {
			Some(offset) => {
				self.cursor += offset;
				true
			}
			None => {
				self.cursor = self.bytes.len();
				false
			}
		}
	}

	fn read_reference(&mut self) {
		let start = self.cursor;
		self.cursor += 1;

		let opened = self.eat(BRACE_OPEN);
		let name_start = self.cursor;
		while self.peek().is_some_and(is_word_byte) {
			self.cursor += 1;
		}
		let name_end = self.cursor;
		let closed = self.eat(BRACE_CLOSE);

		self.references.push(VariableReference {
			name: self.source[name_start..name_end].to_string(),
			span: start..self.cursor,
			braces: BraceShape::from_flags(opened, closed),
		});
	}

	fn walk(mut self) -> Vec<VariableReference> {
		while self.seek_dollar() {
			self.read_reference();
		}

		self.references
	}
}

/// Scan `source` for every variable reference, in order of occurrence.
pub fn scan_references(source: &str) -> References {
	if !source.contains('$') {
		return References::default();
	}

	References(ReferenceWalker::new(source).walk())
}

/// Names referenced in a shell-format template, in order and with duplicates.
/// Callers that need a set must dedupe themselves.
pub fn extract_names(template: &str) -> Vec<String> {
	scan_references(template).names()
}

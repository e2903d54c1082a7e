use crate::EnvsubstResult;
use crate::KeyMapping;
use crate::Replacement;
use crate::RestrictionPolicy;
use crate::lexer::scan_references;

/// Substitute every variable reference in `content`.
///
/// References are resolved against `mapping` and handled according to
/// `policy`. Text outside references is copied through byte for byte. The
/// first fatal reference aborts the whole call and no partial output is
/// returned.
pub fn substitute(
	content: &str,
	mapping: &KeyMapping,
	policy: &RestrictionPolicy,
) -> EnvsubstResult<String> {
	if !content.contains('$') {
		return Ok(content.to_string());
	}

	let references = scan_references(content);
	let mut output = String::with_capacity(content.len());
	let mut last = 0;
	let mut kept = 0usize;

	for reference in references.iter() {
		output.push_str(&content[last..reference.span.start]);

		let binding = mapping.get(&reference.name);
		match policy.decide(&reference.name, binding)? {
			Replacement::Literal => {
				kept += 1;
				output.push_str(reference.literal(content));
			}
			Replacement::Text(text) => output.push_str(text),
		}

		tracing::trace!(name = %reference.name, ?binding, "resolved reference");
		last = reference.span.end;
	}

	output.push_str(&content[last..]);

	tracing::debug!(
		references = references.len(),
		kept,
		closed = mapping.is_closed(),
		"substituted content"
	);

	Ok(output)
}

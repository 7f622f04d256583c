//! String literal escaping.
//!
//! Emitted code usually lands inside an inline `<script>` element, so besides
//! the usual quote/backslash/control escapes the characters `<`, `>` and `&`
//! are written as unicode escapes. A server value containing `</script>` can
//! then never terminate the surrounding element. U+2028 and U+2029 are escaped
//! too because older engines treat them as line terminators inside literals.

use std::fmt::{self, Write};

/// Writes `value` as a double-quoted, escaped string literal.
pub(crate) fn write_quoted(out: &mut impl Write, value: &str) -> fmt::Result {
	out.write_char('"')?;
	for ch in value.chars() {
		match ch {
			'"' => out.write_str("\\\"")?,
			'\\' => out.write_str("\\\\")?,
			'\n' => out.write_str("\\n")?,
			'\r' => out.write_str("\\r")?,
			'\t' => out.write_str("\\t")?,
			'<' | '>' | '&' | '\u{2028}' | '\u{2029}' => write!(out, "\\u{:04x}", ch as u32)?,
			c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
			c => out.write_char(c)?,
		}
	}
	out.write_char('"')
}

/// Returns `value` as a double-quoted, escaped string literal.
///
/// ```
/// assert_eq!(ngservice_expr::quote_str("a\"b"), r#""a\"b""#);
/// ```
pub fn quote_str(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);
	// Writing into a String cannot fail.
	let _ = write_quoted(&mut out, value);
	out
}

use regex::Regex;

lazy_static! {
	static ref ILLEGAL_CHARS_REGEX: Regex = Regex::new(r#"[<>:"/\\|?*]"#).unwrap();
}

/// Replace every character that is unsafe in a filename with `_`.
///
/// Deterministic and many-to-one: distinct titles may map to the same name.
pub fn legalize_filename(name: impl AsRef<str>) -> String {
	ILLEGAL_CHARS_REGEX.replace_all(name.as_ref(), "_").into_owned()
}

/// Trim a title and collapse every run of line breaks into a single space.
pub fn fold_newlines(string: &str) -> String {
	let mut out = String::with_capacity(string.len());
	let mut in_break = false;
	for ch in string.trim().chars() {
		if ch == '\r' || ch == '\n' {
			if !in_break {
				out.push(' ');
			}
			in_break = true;
		} else {
			out.push(ch);
			in_break = false;
		}
	}
	out
}

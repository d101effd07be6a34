//! Ninja lexical escaping.

/// Escape a path for a `build` line: `$`, space and `:` are significant there.
pub fn escape_path(path: &str) -> String {
  let mut out = String::with_capacity(path.len());
  for c in path.chars() {
    match c {
      '$' => out.push_str("$$"),
      ' ' => out.push_str("$ "),
      ':' => out.push_str("$:"),
      c => out.push(c),
    }
  }
  out
}

/// Escape a variable value: only `$` needs doubling.
pub fn escape_value(value: &str) -> String {
  value.replace('$', "$$")
}

/* crates/graft-build/src/pattern.rs */

// Route patterns mirror the page file's position in the source tree and may
// contain bracketed parameter placeholders, e.g. `/post/[id]`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::BuildError;

static PLACEHOLDER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\[([^\[\]/]+)\]").expect("placeholder regex"));

/// Whether the pattern contains at least one parameter placeholder.
pub fn has_params(pattern: &str) -> bool {
  pattern.contains('[')
}

/// Names of all placeholders in the pattern, in order of appearance.
pub fn param_names(pattern: &str) -> Vec<String> {
  PLACEHOLDER
    .find_iter(pattern)
    .map(|m| pattern[m.start() + 1..m.end() - 1].to_string())
    .collect()
}

/// Check bracket shape: every `[` closes before the segment ends, no nesting,
/// no empty placeholder names.
pub fn validate_pattern(pattern: &str) -> Result<(), BuildError> {
  let mut open_at: Option<usize> = None;
  for (i, ch) in pattern.char_indices() {
    match ch {
      '[' => {
        if open_at.is_some() {
          return Err(BuildError::configuration(format!(
            "route \"{pattern}\" has a nested `[` in a placeholder"
          )));
        }
        open_at = Some(i);
      }
      ']' => {
        let Some(start) = open_at.take() else {
          return Err(BuildError::configuration(format!(
            "route \"{pattern}\" has a `]` without a matching `[`"
          )));
        };
        if i == start + 1 {
          return Err(BuildError::configuration(format!(
            "route \"{pattern}\" has an empty placeholder name"
          )));
        }
      }
      '/' if open_at.is_some() => {
        return Err(BuildError::configuration(format!(
          "route \"{pattern}\" has a placeholder spanning a `/`"
        )));
      }
      _ => {}
    }
  }
  if open_at.is_some() {
    return Err(BuildError::configuration(format!(
      "route \"{pattern}\" has an unclosed placeholder"
    )));
  }
  Ok(())
}

/// Substitute every placeholder with its value from `params`. A placeholder
/// whose parameter is absent from the set is a configuration error; extra
/// parameters not referenced by the pattern are ignored.
pub fn fill_params(pattern: &str, params: &BTreeMap<String, String>) -> Result<String, BuildError> {
  let mut out = String::with_capacity(pattern.len());
  let mut last = 0;
  for m in PLACEHOLDER.find_iter(pattern) {
    let name = &pattern[m.start() + 1..m.end() - 1];
    let value = params.get(name).ok_or_else(|| {
      BuildError::configuration(format!(
        "route \"{pattern}\" references parameter \"{name}\" missing from the supplied set"
      ))
    })?;
    out.push_str(&pattern[last..m.start()]);
    out.push_str(value);
    last = m.end();
  }
  out.push_str(&pattern[last..]);
  Ok(out)
}

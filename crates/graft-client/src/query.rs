/* crates/graft-client/src/query.rs */

use std::collections::BTreeMap;

/// Parse a query string (with or without the leading `?`) into a multimap.
/// Repeated keys accumulate in order of appearance.
pub fn parse_query(search: &str) -> BTreeMap<String, Vec<String>> {
  let trimmed = search.strip_prefix('?').unwrap_or(search);
  let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
  for (key, value) in form_urlencoded::parse(trimmed.as_bytes()) {
    out.entry(key.into_owned()).or_default().push(value.into_owned());
  }
  out
}

/// Serialize pairs into `k=v&k2=v2` with standard percent-encoding.
pub fn serialize_query(pairs: &[(String, String)]) -> String {
  let mut serializer = form_urlencoded::Serializer::new(String::new());
  for (key, value) in pairs {
    serializer.append_pair(key, value);
  }
  serializer.finish()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_search_parses_to_empty_map() {
    assert!(parse_query("").is_empty());
    assert!(parse_query("?").is_empty());
  }

  #[test]
  fn leading_question_mark_optional() {
    let parsed = parse_query("?page=2");
    assert_eq!(parsed["page"], vec!["2"]);
    assert_eq!(parse_query("page=2"), parsed);
  }

  #[test]
  fn repeated_keys_accumulate() {
    let parsed = parse_query("tag=rust&tag=web");
    assert_eq!(parsed["tag"], vec!["rust", "web"]);
  }

  #[test]
  fn percent_decoding() {
    let parsed = parse_query("q=a%20b&title=caf%C3%A9");
    assert_eq!(parsed["q"], vec!["a b"]);
    assert_eq!(parsed["title"], vec!["café"]);
  }

  #[test]
  fn serialize_round_trips() {
    let pairs = vec![("q".to_string(), "a b".to_string())];
    let serialized = serialize_query(&pairs);
    assert_eq!(serialized, "q=a+b");
    assert_eq!(parse_query(&serialized)["q"], vec!["a b"]);
  }
}

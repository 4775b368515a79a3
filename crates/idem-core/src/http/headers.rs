//! Case-insensitive header set.

use thiserror::Error;

/// A header that cannot be sent as a single `Name: value` line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidHeader {
    #[error("invalid header name {0:?}")]
    Name(String),
    #[error("header {name} has a value containing CR, LF or NUL")]
    Value { name: String },
}

/// Ordered header list with case-insensitive names. `set` replaces every
/// existing value for a name; other headers keep their position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any value under any casing of `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => {
                self.entries[i] = (name.clone(), value);
                let mut idx = 0;
                self.entries.retain(|(n, _)| {
                    let keep = idx <= i || !n.eq_ignore_ascii_case(&name);
                    idx += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Add a value without removing existing ones (response headers may repeat).
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove every value for `name`, returning the first one.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let first = self.get(name).map(str::to_string);
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        first
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check every entry before it goes on the wire: names must be HTTP
    /// tokens and values must not contain CR, LF or NUL.
    pub fn validate(&self) -> Result<(), InvalidHeader> {
        for (name, value) in &self.entries {
            if name.is_empty() || !name.bytes().all(is_token_byte) {
                return Err(InvalidHeader::Name(name.clone()));
            }
            if value.bytes().any(|b| matches!(b, b'\r' | b'\n' | b'\0')) {
                return Err(InvalidHeader::Value { name: name.clone() });
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// `tchar` from RFC 9110.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.set(k, v);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_regardless_of_case() {
        let mut h: Headers = [("Content-Type", "application/json"), ("idempotency-key", "stale")]
            .into_iter()
            .collect();
        h.set("Idempotency-Key", "fresh");
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("IDEMPOTENCY-KEY"), Some("fresh"));
        assert_eq!(h.get("content-type"), Some("application/json"));
    }

    #[test]
    fn set_collapses_repeated_values() {
        let mut h = Headers::new();
        h.append("Accept", "text/plain");
        h.append("X-Trace", "1");
        h.append("accept", "application/json");
        h.set("ACCEPT", "*/*");
        let all: Vec<_> = h.iter().collect();
        assert_eq!(all, vec![("ACCEPT", "*/*"), ("X-Trace", "1")]);
    }

    #[test]
    fn remove_drops_all_values() {
        let mut h = Headers::new();
        h.append("Set-Cookie", "a=1");
        h.append("set-cookie", "b=2");
        assert_eq!(h.remove("SET-COOKIE").as_deref(), Some("a=1"));
        assert!(!h.contains("set-cookie"));
        assert!(h.is_empty());
    }

    #[test]
    fn validate_accepts_ordinary_headers() {
        let h: Headers = [
            ("Content-Type", "application/json; charset=utf-8"),
            ("Idempotency-Key", "uuid-goes-here-12345"),
            ("X-Tab", "a\tb"),
        ]
        .into_iter()
        .collect();
        assert_eq!(h.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_line_breaks_in_values() {
        for value in ["abc\r\nX-Injected: yes", "abc\nX-Injected: yes", "abc\0"] {
            let mut h = Headers::new();
            h.set("Idempotency-Key", value);
            assert_eq!(
                h.validate(),
                Err(InvalidHeader::Value {
                    name: "Idempotency-Key".into()
                })
            );
        }
    }

    #[test]
    fn validate_rejects_non_token_names() {
        for name in ["", "X Bad", "X-Bad:", "X-Bad\r\nX-Injected", "Héader"] {
            let mut h = Headers::new();
            h.append(name, "v");
            assert_eq!(h.validate(), Err(InvalidHeader::Name(name.into())), "{:?}", name);
        }
    }
}

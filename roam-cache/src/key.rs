//! Deterministic request-key construction.
//!
//! Cache and coalescing keys are `:`-delimited strings: a namespace tag
//! followed by normalized parameter values in a fixed order. Two calls with
//! the same logical identity must produce byte-identical keys, and two
//! different identities must never collide, so:
//!
//! - parameter values are trimmed and lowercased before use;
//! - absent optional parameters are written as the sentinel token `-`,
//!   never omitted;
//! - a real value equal to the sentinel, and any occurrence of the
//!   separator or escape character inside a value, is percent-escaped,
//!   keeping the sentinel and separator reserved.

use roam_core::constants::{KEY_ABSENT_SENTINEL, KEY_ESCAPE_CHAR, KEY_SEPARATOR};

/// Builder for namespaced request keys.
///
/// Endpoints define a small record of their parameters and serialize it
/// through this builder in a fixed field order; nothing else in the
/// workspace concatenates key strings by hand.
///
/// # Example
///
/// ```rust
/// use roam_cache::RequestKey;
///
/// let key = RequestKey::new("catalog:bundles")
///     .locale("EN")
///     .number(1)
///     .opt(Some("hk"))
///     .opt(None)
///     .finish();
/// assert_eq!(key, "catalog:bundles:en:1:hk:-");
/// ```
#[derive(Clone, Debug)]
pub struct RequestKey {
    buf: String,
}

impl RequestKey {
    /// Starts a key under `namespace`.
    ///
    /// The namespace is a trusted compile-time tag (it may itself contain
    /// the separator, e.g. `"catalog:bundles"`); only parameter values are
    /// escaped.
    pub fn new(namespace: &'static str) -> Self {
        Self {
            buf: namespace.to_owned(),
        }
    }

    /// Appends the display-language code.
    ///
    /// Locale-sensitive endpoints must include the language in their key:
    /// the same logical payload differs per language and must not be served
    /// across locales.
    pub fn locale(self, locale: &str) -> Self {
        self.part(locale)
    }

    /// Appends a required parameter value.
    pub fn part(mut self, value: &str) -> Self {
        self.buf.push(KEY_SEPARATOR);
        self.buf.push_str(&escape(&normalize(value)));
        self
    }

    /// Appends an optional parameter value, writing the sentinel when absent.
    pub fn opt(self, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.part(value),
            None => self.sentinel(),
        }
    }

    /// Appends a numeric parameter value.
    pub fn number(mut self, value: u64) -> Self {
        self.buf.push(KEY_SEPARATOR);
        self.buf.push_str(&value.to_string());
        self
    }

    /// Returns the finished key.
    pub fn finish(self) -> String {
        self.buf
    }

    fn sentinel(mut self) -> Self {
        self.buf.push(KEY_SEPARATOR);
        self.buf.push_str(KEY_ABSENT_SENTINEL);
        self
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Escapes a normalized value so it can never read as the sentinel or
/// span a separator position.
///
/// Injective over normalized values: `%` is escaped first, so the escape
/// sequences themselves cannot be forged by input.
fn escape(normalized: &str) -> String {
    if normalized == KEY_ABSENT_SENTINEL {
        return "%2d".to_owned();
    }
    let mut escaped = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        if ch == KEY_ESCAPE_CHAR {
            escaped.push_str("%25");
        } else if ch == KEY_SEPARATOR {
            escaped.push_str("%3a");
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_order_and_namespace() {
        let key = RequestKey::new("catalog:countries").locale("en").finish();
        assert_eq!(key, "catalog:countries:en");
    }

    #[test]
    fn test_absent_filter_uses_sentinel() {
        let key = RequestKey::new("catalog:bundles")
            .locale("en")
            .number(1)
            .opt(None)
            .finish();
        assert_eq!(key, "catalog:bundles:en:1:-");
    }

    #[test]
    fn test_literal_sentinel_value_does_not_collide_with_absent() {
        let absent = RequestKey::new("catalog:bundles")
            .locale("en")
            .number(1)
            .opt(None)
            .finish();
        let literal = RequestKey::new("catalog:bundles")
            .locale("en")
            .number(1)
            .opt(Some("-"))
            .finish();
        assert_ne!(absent, literal);
        assert_eq!(literal, "catalog:bundles:en:1:%2d");
    }

    #[test]
    fn test_separator_inside_value_cannot_shift_positions() {
        let split = RequestKey::new("ns").part("a:b").part("c").finish();
        let shifted = RequestKey::new("ns").part("a").part("b:c").finish();
        assert_ne!(split, shifted);
    }

    #[test]
    fn test_escape_char_cannot_forge_sentinel_escape() {
        // A raw "%2d" must stay distinct from the escaped sentinel.
        let forged = RequestKey::new("ns").part("%2d").finish();
        let escaped_sentinel = RequestKey::new("ns").part("-").finish();
        assert_ne!(forged, escaped_sentinel);
        assert_eq!(forged, "ns:%252d");
    }

    #[test]
    fn test_case_and_whitespace_normalize() {
        let canonical = RequestKey::new("catalog:countries").locale("en").finish();
        let shouted = RequestKey::new("catalog:countries").locale("  EN ").finish();
        assert_eq!(canonical, shouted);
    }

    #[test]
    fn test_builder_is_deterministic() {
        let build = || {
            RequestKey::new("catalog:bundles")
                .locale("en")
                .number(2)
                .opt(Some("HK"))
                .opt(None)
                .finish()
        };
        assert_eq!(build(), build());
        assert_eq!(build(), "catalog:bundles:en:2:hk:-");
    }
}

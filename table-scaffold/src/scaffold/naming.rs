//! Identifier normalization for generated code
//!
//! Database identifiers arrive in `snake_case`. Generated TypeScript needs
//! them as `lowerCamel` (variables, route segments, module paths) and
//! `UpperCamel` (interfaces and function suffixes), while data-access calls
//! keep the raw identifier verbatim.
//!
//! An underscore is a word boundary only when it sits between a
//! non-underscore character and a lowercase ASCII letter. Leading underscores,
//! trailing underscores, doubled underscores and underscores before digits or
//! uppercase letters are left as they are, which keeps both conversions
//! idempotent.

/// The three spellings of one raw identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingForms {
    /// Verbatim identifier, used where the data store expects the literal name
    pub raw: String,
    /// `lowerCamel` form
    pub lower_camel: String,
    /// `UpperCamel` form
    pub upper_camel: String,
}

impl NamingForms {
    /// Derive all forms of `raw`
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            lower_camel: to_lower_camel(raw),
            upper_camel: to_upper_camel(raw),
        }
    }
}

/// Convert a raw identifier to `lowerCamel`
///
/// ```
/// use table_scaffold::scaffold::naming::to_lower_camel;
///
/// assert_eq!(to_lower_camel("user_accounts"), "userAccounts");
/// assert_eq!(to_lower_camel("userAccounts"), "userAccounts");
/// ```
#[must_use]
pub fn to_lower_camel(raw: &str) -> String {
    with_first(&collapse_boundaries(raw), |c| c.to_lowercase().collect())
}

/// Convert a raw identifier to `UpperCamel`
///
/// ```
/// use table_scaffold::scaffold::naming::to_upper_camel;
///
/// assert_eq!(to_upper_camel("order_items"), "OrderItems");
/// ```
#[must_use]
pub fn to_upper_camel(raw: &str) -> String {
    with_first(&collapse_boundaries(raw), |c| c.to_uppercase().collect())
}

fn collapse_boundaries(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev: Option<char> = None;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        let is_boundary = c == '_'
            && prev.is_some_and(|p| p != '_')
            && chars.peek().is_some_and(char::is_ascii_lowercase);

        if is_boundary {
            if let Some(next) = chars.next() {
                out.push(next.to_ascii_uppercase());
                prev = Some(next);
            }
            continue;
        }

        out.push(c);
        prev = Some(c);
    }

    out
}

fn with_first(s: &str, map: impl Fn(char) -> String) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut out = map(first);
        out.push_str(chars.as_str());
        out
    })
}

/// Whether `name` can be used as a JavaScript identifier
///
/// Letters, digits, `_` and `$`, not starting with a digit. Reserved words
/// are not checked.
///
/// ```
/// use table_scaffold::scaffold::naming::is_identifier;
///
/// assert!(is_identifier("userAccounts"));
/// assert!(!is_identifier("2fa"));
/// assert!(!is_identifier("order-id"));
/// ```
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Object key for `name`: bare when it is an identifier, quoted otherwise
#[must_use]
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        js_string(name)
    }
}

/// `value` as a double-quoted JavaScript string literal
#[must_use]
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

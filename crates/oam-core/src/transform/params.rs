use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::ConvertError;
use crate::parse::server::ServerVariable;

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Rewrite `{name}` path parameters into router syntax (`:name`).
pub fn to_route_path(path: &str) -> String {
    PLACEHOLDER_REGEX
        .replace_all(path, |caps: &Captures| format!(":{}", &caps[1]))
        .into_owned()
}

/// Substitute `{name}` server variables with their declared defaults.
///
/// A variable used in the URL but missing from `variables` is an error.
pub fn substitute_server_variables(
    url: &str,
    variables: &IndexMap<String, ServerVariable>,
) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(url.len());
    let mut last = 0;
    for caps in PLACEHOLDER_REGEX.captures_iter(url) {
        let (Some(token), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let variable = variables
            .get(name.as_str())
            .ok_or_else(|| ConvertError::UndeclaredServerVariable(name.as_str().to_string()))?;
        out.push_str(&url[last..token.start()]);
        out.push_str(&variable.default_text());
        last = token.end();
    }
    out.push_str(&url[last..]);
    Ok(out)
}

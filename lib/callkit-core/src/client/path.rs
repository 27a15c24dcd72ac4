use std::collections::HashSet;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use tracing::warn;

use super::config::PathPolicy;
use super::parameters::{ParamLocation, Parameter};
use super::ApiClientError;

/// Regular expression for matching path parameters in the format `{param_name}`.
///
/// Names never contain `/`: a `{a/b}` in a route is not a placeholder, and an
/// argument named `a/b` is reported as having none.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>[^{}/]+)}").expect("a valid regex"));

/// Characters escaped in a path segment: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

/// Percent-encodes a path parameter value as a URI component.
pub(in crate::client) fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Substitutes every `path` parameter into the route template.
///
/// All occurrences of `{name}` are replaced. Parameters without a placeholder
/// are ignored with a warning; placeholders without a parameter are handled
/// according to the [`PathPolicy`].
pub(in crate::client) fn substitute_path(
    route: &str,
    parameters: &[Parameter],
    policy: PathPolicy,
) -> Result<String, ApiClientError> {
    let mut names: HashSet<&str> = RE
        .captures_iter(route)
        .filter_map(|caps| caps.name("name"))
        .map(|found| found.as_str())
        .collect();

    let mut path = route.to_string();
    for param in parameters
        .iter()
        .filter(|param| param.location() == ParamLocation::Path)
    {
        let name = param.name();
        if !names.remove(name) {
            warn!(?name, route, "path argument has no placeholder");
            continue;
        }

        path = replace_path_param(&path, name, &encode_path_param_value(param.value()));
    }

    if names.is_empty() {
        return Ok(path);
    }

    let mut missings: Vec<String> = names.into_iter().map(str::to_string).collect();
    missings.sort();
    match policy {
        PathPolicy::Lenient => {
            warn!(?missings, route, "path placeholders left unresolved");
            Ok(path)
        }
        PathPolicy::Strict => Err(ApiClientError::PathUnresolved { path, missings }),
    }
}

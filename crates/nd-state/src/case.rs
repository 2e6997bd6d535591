//! camelCase key conversion for structured state values.

use serde_json::{Map, Value};

/// Convert a property name to camelCase.
///
/// `snake_case` names are joined with each later segment capitalized. A
/// leading run of capitals is lowercased the way acronym-prefixed names
/// expect (`URLValue` becomes `urlValue`, `ID` becomes `id`).
///
/// ```
/// use nd_state::to_camel_case;
///
/// assert_eq!(to_camel_case("href_text"), "hrefText");
/// assert_eq!(to_camel_case("PerPage"), "perPage");
/// assert_eq!(to_camel_case("URLValue"), "urlValue");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    if !name.contains('_') {
        return lower_leading(name);
    }

    let mut segments = name.split('_').filter(|s| !s.is_empty());
    let Some(first) = segments.next() else {
        return name.to_owned();
    };

    let mut result = lower_leading(first);
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(c) = chars.next() {
            result.extend(c.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Recursively rename every object key in `value` to camelCase.
///
/// When two keys of one object map to the same name (`a_b` and `aB`), the key
/// already spelled in camelCase keeps its value and the renamed one is
/// dropped with a warning. Between two renamed keys the first in map order
/// wins.
#[must_use]
pub fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut renamed = Map::with_capacity(map.len());
            for (key, value) in map {
                let camel = to_camel_case(&key);
                let verbatim = camel == key;
                if renamed.contains_key(&camel) {
                    tracing::warn!(key = %key, renamed = %camel, "State keys collide after camelCase conversion");
                    if !verbatim {
                        continue;
                    }
                }
                renamed.insert(camel, camel_case_keys(value));
            }
            Value::Object(renamed)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        other => other,
    }
}

/// Lowercase the leading run of uppercase characters.
///
/// The last capital of a run stays uppercase when it starts the next word.
fn lower_leading(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.first().is_none_or(|c| !c.is_uppercase()) {
        return name.to_owned();
    }

    let mut result = chars.clone();
    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }
        let next_is_lower = chars.get(i + 1).is_some_and(|c| !c.is_uppercase());
        if i > 0 && next_is_lower {
            break;
        }
        result[i] = chars[i].to_lowercase().next().unwrap_or(chars[i]);
    }
    result.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_camel_case("per_page"), "perPage");
        assert_eq!(to_camel_case("show_per_page_selector"), "showPerPageSelector");
        assert_eq!(to_camel_case("__private"), "private");
    }

    #[test]
    fn test_already_camel_case() {
        assert_eq!(to_camel_case("tabSelected"), "tabSelected");
        assert_eq!(to_camel_case("value"), "value");
    }

    #[test]
    fn test_pascal_and_acronyms() {
        assert_eq!(to_camel_case("Title"), "title");
        assert_eq!(to_camel_case("ID"), "id");
        assert_eq!(to_camel_case("URLValue"), "urlValue");
        assert_eq!(to_camel_case("IOStream"), "ioStream");
    }

    #[test]
    fn test_degenerate_names() {
        assert_eq!(to_camel_case(""), "");
        assert_eq!(to_camel_case("_"), "_");
        assert_eq!(to_camel_case("customer.name"), "customer.name");
    }

    #[test]
    fn test_camel_case_keys_nested() {
        let value = json!({
            "href_text": "Open",
            "nested": [{ "is_disabled": true }],
            "Count": 2
        });

        assert_eq!(
            camel_case_keys(value),
            json!({
                "hrefText": "Open",
                "nested": [{ "isDisabled": true }],
                "count": 2
            })
        );
    }

    #[test]
    fn test_camel_case_keys_collision_keeps_camel_key() {
        assert_eq!(camel_case_keys(json!({ "a_b": 1, "aB": 2 })), json!({ "aB": 2 }));
        assert_eq!(
            camel_case_keys(json!({ "item_count": 1, "itemCount": 2, "other": 3 })),
            json!({ "itemCount": 2, "other": 3 })
        );
    }

    #[test]
    fn test_camel_case_keys_leaves_strings() {
        assert_eq!(camel_case_keys(json!("snake_value")), json!("snake_value"));
    }
}

//! JSON path and URL helpers shared by the result strategies.

use serde_json::Value;

use super::redact::has_credentials;
use super::EntryError;

/// Extract a value from nested JSON using a dot-notation path.
///
/// Numeric segments index into arrays, other segments look up object keys.
/// Numeric segments also work as object keys (`"2003"`), since the HTML
/// payload mixes both.
pub fn extract_path<'a>(data: &'a Value, path: &str) -> &'a Value {
    if path.is_empty() {
        return data;
    }

    let mut current = data;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(key).unwrap_or(&Value::Null),
            Value::Array(arr) => {
                if let Ok(idx) = key.parse::<usize>() {
                    arr.get(idx).unwrap_or(&Value::Null)
                } else {
                    &Value::Null
                }
            }
            _ => &Value::Null,
        };
    }

    current
}

/// String at `path`, or an entry error naming the missing field.
pub fn required_str<'a>(entry: &'a Value, path: &str) -> Result<&'a str, EntryError> {
    match extract_path(entry, path) {
        Value::String(s) => Ok(s.as_str()),
        Value::Null => Err(EntryError::MissingField(path.to_string())),
        _ => Err(EntryError::WrongType(path.to_string())),
    }
}

/// String at `path` if present and non-empty.
pub fn optional_str<'a>(entry: &'a Value, path: &str) -> Option<&'a str> {
    extract_path(entry, path)
        .as_str()
        .filter(|s| !s.trim().is_empty())
}

/// Check that a result URL is absolute and carries no credentials.
pub fn absolute_url(url: &str) -> Result<String, EntryError> {
    let url = url.trim();
    if url::Url::parse(url).is_err() {
        return Err(EntryError::RelativeUrl(url.to_string()));
    }
    if has_credentials(url) {
        return Err(EntryError::CredentialUrl);
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_path_mixed() {
        let data = json!({"a": [0, {"b": {"2003": [null, "x"]}}]});
        assert_eq!(extract_path(&data, "a.1.b.2003.1"), &json!("x"));
        assert_eq!(extract_path(&data, "a.7"), &Value::Null);
        assert_eq!(extract_path(&data, "a.b"), &Value::Null);
        assert_eq!(extract_path(&data, ""), &data);
    }

    #[test]
    fn test_required_str_errors() {
        let entry = json!({"title": 3});
        assert!(matches!(
            required_str(&entry, "title"),
            Err(EntryError::WrongType(_))
        ));
        assert!(matches!(
            required_str(&entry, "link"),
            Err(EntryError::MissingField(_))
        ));
    }

    #[test]
    fn test_absolute_url() {
        assert!(absolute_url("https://example.com/a.png").is_ok());
        assert!(absolute_url("plugin://plugin.video.youtube/play/?video_id=x").is_ok());
        assert!(matches!(
            absolute_url("/images/a.png"),
            Err(EntryError::RelativeUrl(_))
        ));
        assert!(matches!(
            absolute_url("https://example.com/a.png?key=secret"),
            Err(EntryError::CredentialUrl)
        ));
    }
}

//! Reading the initial mode from the page URL.

/// Read a boolean query flag.
///
/// Accepts a full URL, a query string with or without the leading `?`, and
/// ignores any `#fragment`. `1` and `true` are true, `0` and `false` are
/// false. A missing or unparseable flag is `None`.
///
/// ```
/// # use portico_login::query::sign_up_flag;
/// assert_eq!(sign_up_flag("/login?sign_up=1", "sign_up"), Some(true));
/// assert_eq!(sign_up_flag("sign_up=0", "sign_up"), Some(false));
/// assert_eq!(sign_up_flag("?sign_up=maybe", "sign_up"), None);
/// assert_eq!(sign_up_flag("", "sign_up"), None);
/// ```
#[must_use]
pub fn sign_up_flag(query: &str, param: &str) -> Option<bool> {
    let query = query.split_once('#').map_or(query, |(before, _)| before);
    let query = query.split_once('?').map_or(query, |(_, after)| after);

    let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(query) {
        Ok(pairs) => pairs,
        Err(error) => {
            tracing::debug!(%error, "Ignoring malformed query string");
            return None;
        },
    };

    let value = pairs
        .into_iter()
        .find_map(|(key, value)| (key == param).then_some(value))?;

    match value.as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_flag_from_full_url() {
        assert_eq!(
            sign_up_flag("https://app.example.com/login?next=%2Fa&sign_up=1#top", "sign_up"),
            Some(true)
        );
    }

    #[test]
    fn missing_flag_is_none() {
        assert_eq!(sign_up_flag("?next=/home", "sign_up"), None);
        assert_eq!(sign_up_flag("/login", "sign_up"), None);
    }

    #[test]
    fn accepts_boolean_words() {
        assert_eq!(sign_up_flag("sign_up=true", "sign_up"), Some(true));
        assert_eq!(sign_up_flag("sign_up=false", "sign_up"), Some(false));
    }

    #[test]
    fn custom_param_name() {
        assert_eq!(sign_up_flag("?register=1", "register"), Some(true));
        assert_eq!(sign_up_flag("?register=1", "sign_up"), None);
    }
}

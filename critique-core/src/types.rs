/// Metric counts reported alongside a review.
///
/// Each field is 0 when the service omits it or sends `null`, so a response
/// with no `metrics` object at all deserializes to all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Metrics {
    #[serde(deserialize_with = "null_as_zero")]
    pub insights: u32,
    #[serde(deserialize_with = "null_as_zero")]
    pub suggestions: u32,
    #[serde(deserialize_with = "null_as_zero")]
    pub issues: u32,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let count: Option<u32> = serde::Deserialize::deserialize(deserializer)?;
    Ok(count.unwrap_or_default())
}

/// The normalized outcome of one successful assessment request.
///
/// Never mutated after construction; the session replaces it wholesale when a
/// newer request succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    /// Markdown narrative. May be empty.
    pub review_text: String,
    /// Quality score, expected in `0..=100`. Passed through as received.
    pub score: i64,
    pub metrics: Metrics,
}

/// Lifecycle of the session's single assessment request slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// One request is in flight. Further review requests are ignored.
    Pending,
    /// The most recent request produced a result.
    Succeeded,
    /// The most recent request failed. Any earlier result is still held.
    Failed,
}

impl RequestState {
    /// Short label for status bars and logs.
    pub fn label(self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending => "reviewing",
            RequestState::Succeeded => "done",
            RequestState::Failed => "failed",
        }
    }
}

/// Persisted light/dark preference.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    /// Value written to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parses a stored value. Returns `None` for anything other than
    /// `"light"` or `"dark"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_preference_round_trips_through_store_values() {
        assert_eq!(ThemePreference::parse("light"), Some(ThemePreference::Light));
        assert_eq!(ThemePreference::parse("dark"), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse("Dark"), None);
        assert_eq!(ThemePreference::default(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled().as_str(), "light");
    }

    #[test]
    fn metrics_default_missing_keys_to_zero() {
        let m: Metrics = serde_json::from_str(r#"{"issues": 4}"#).unwrap();
        assert_eq!(m, Metrics { insights: 0, suggestions: 0, issues: 4 });
    }
}

use serde::Deserialize;

/// How hard the location provider should try. Providers are free to treat this as a hint.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyHint {
    Low,
    #[default]
    Balanced,
    High,
}

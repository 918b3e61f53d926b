use serde::{Deserialize, Deserializer};

/// Deserializes an optional query value into an `i64`, treating empty or
/// non-numeric input as absent.
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Deserializes an integer id sent either as a JSON number or as a numeric
/// string (JSON object keys are always strings, so clients echoing a
/// category map send ids that way).
pub fn deserialize_int_or_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<i32>,
{
    let raw = match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => n,
        IntOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid id `{}`", s)))?,
    };

    i32::try_from(raw)
        .map(T::from)
        .map_err(|_| serde::de::Error::custom(format!("id {} out of range", raw)))
}

use thiserror::Error;

/// Errors raised while reading component options from `data-*` attributes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("attribute `{attr}`: `{value}` is not a number")]
    InvalidNumber { attr: &'static str, value: String },
    #[error("attribute `{attr}`: `{value}` is not a boolean")]
    InvalidBool { attr: &'static str, value: String },
    #[error("attribute `{attr}`: expected `x,y,z`, got `{value}`")]
    InvalidVector { attr: &'static str, value: String },
    #[error("attribute `{attr}`: {value} is outside {min}..={max}")]
    OutOfRange {
        attr: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("unknown reveal variant `{0}`")]
    UnknownVariant(String),
}

pub(crate) fn parse_f64(attr: &'static str, value: &str) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            attr,
            value: value.to_string(),
        })
}

pub(crate) fn parse_u32(attr: &'static str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidNumber {
            attr,
            value: value.to_string(),
        })
}

// Bare attributes (`data-once`) read as an empty string and mean true.
pub(crate) fn parse_bool(attr: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "" | "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            attr,
            value: value.to_string(),
        }),
    }
}

pub(crate) fn parse_vec3(attr: &'static str, value: &str) -> Result<[f32; 3], ConfigError> {
    let invalid = || ConfigError::InvalidVector {
        attr,
        value: value.to_string(),
    };
    let mut out = [0.0_f32; 3];
    let mut parts = value.split(',');
    for slot in out.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        *slot = part
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(invalid)?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(out)
}

//! Parsing of cache region specification strings.

/// Options recognized in a region specification string.
///
/// The format is comma-separated `key=value` pairs. Only `expiration`
/// (seconds) is understood today; unknown keys and empty segments are
/// ignored so older configurations keep working when new options appear.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    pub expiration: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("invalid expiration '{value}' in cache specification: {source}")]
    InvalidExpiration {
        value: String,
        source: std::num::ParseIntError,
    },
}

impl RegionSpec {
    pub fn parse(spec: &str) -> Result<RegionSpec, SpecError> {
        let mut parsed = RegionSpec::default();

        for option in spec.split(',') {
            let option = option.trim();

            if option.is_empty() {
                continue;
            }

            let Some((key, value)) = option.split_once('=') else {
                // A bare key carries no value to apply.
                continue;
            };

            if key.trim() != "expiration" {
                continue;
            }

            let value = value.trim();
            let seconds = value.parse::<u64>().map_err(|source| SpecError::InvalidExpiration {
                value: value.to_string(),
                source,
            })?;

            parsed.expiration = Some(seconds);
        }

        Ok(parsed)
    }
}

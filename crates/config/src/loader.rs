use std::path::Path;

use crate::{Config, Error};

pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> crate::Result<()> {
    if config.auth.userinfo_url.is_none() {
        log::warn!("auth.userinfo_url is not set, token validation is disabled");
    }

    for (name, region) in &config.cache.regions {
        validate_region_spec(name, &region.spec)?;
    }

    Ok(())
}

/// Checks the one option the cache adapter recognizes. The full parse lives
/// with the adapter; a misconfigured expiration must already fail startup.
fn validate_region_spec(name: &str, spec: &str) -> crate::Result<()> {
    for option in spec.split(',') {
        let option = option.trim();

        let Some((key, value)) = option.split_once('=') else {
            continue;
        };

        if key.trim() != "expiration" {
            continue;
        }

        if let Err(error) = value.trim().parse::<u64>() {
            return Err(Error::Validation(format!(
                "cache region '{name}' has an invalid expiration '{}': {error}",
                value.trim(),
            )));
        }
    }

    Ok(())
}

// src/config/validate.rs

use std::path::Component;

use crate::config::model::{RawSettings, Settings};
use crate::errors::{HostkitError, Result};

impl TryFrom<RawSettings> for Settings {
    type Error = crate::errors::HostkitError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_timeouts(raw)?;
    validate_names(raw)?;
    Ok(())
}

fn validate_timeouts(raw: &RawSettings) -> Result<()> {
    if raw.shell_timeout.as_duration().is_zero() {
        return Err(HostkitError::ConfigError(
            "shell_timeout must be positive (got 0)".to_string(),
        ));
    }
    if raw.sync_timeout.as_duration().is_zero() {
        return Err(HostkitError::ConfigError(
            "sync_timeout must be positive (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_names(raw: &RawSettings) -> Result<()> {
    if raw.proc_root.as_os_str().is_empty() {
        return Err(HostkitError::ConfigError(
            "proc_root must not be empty".to_string(),
        ));
    }

    if raw.kill_program.trim().is_empty() {
        return Err(HostkitError::ConfigError(
            "kill_program must not be empty".to_string(),
        ));
    }

    // The marker must stay inside the mountpoint it is created under.
    let marker = std::path::Path::new(&raw.sync_marker);
    let mut components = marker.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(HostkitError::ConfigError(format!(
            "sync_marker must be a plain file name (got '{}')",
            raw.sync_marker
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::types::HumanDuration;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::try_from(RawSettings::default()).unwrap();
        assert_eq!(settings.shell_timeout(), Duration::from_secs(300));
        assert_eq!(settings.kill_program(), "kill");
    }

    #[test]
    fn zero_sync_timeout_is_rejected() {
        let raw = RawSettings {
            sync_timeout: HumanDuration::from_duration(Duration::ZERO),
            ..RawSettings::default()
        };
        match Settings::try_from(raw) {
            Err(HostkitError::ConfigError(msg)) => assert!(msg.contains("sync_timeout")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn marker_with_directories_is_rejected() {
        for marker in ["../escape", "a/b", "/abs", "", ".."] {
            let raw = RawSettings {
                sync_marker: marker.to_string(),
                ..RawSettings::default()
            };
            assert!(
                matches!(Settings::try_from(raw), Err(HostkitError::ConfigError(_))),
                "marker {marker:?} should be rejected"
            );
        }
    }
}

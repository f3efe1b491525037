//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;
use crate::domain::recording::Duration;
use crate::domain::session::SessionType;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "assemblyai_api_key" => config.assemblyai_api_key = Some(value.to_string()),
        "anthropic_api_key" => config.anthropic_api_key = Some(value.to_string()),
        "session_type" => config.session_type = Some(value.to_string()),
        "duration" => config.duration = Some(value.to_string()),
        "output_dir" => config.output_dir = Some(value.to_string()),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;
    let value = config_value(&config, key);

    presenter.key_value(key, value.as_deref().unwrap_or("(not set)"));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = config_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or("(not set)"));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().display().to_string());
    Ok(())
}

fn config_value(config: &crate::domain::config::AppConfig, key: &str) -> Option<String> {
    match key {
        "assemblyai_api_key" => config.assemblyai_api_key.clone(),
        "anthropic_api_key" => config.anthropic_api_key.clone(),
        "session_type" => config.session_type.clone(),
        "duration" => config.duration.clone(),
        "output_dir" => config.output_dir.clone(),
        _ => None,
    }
}

fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "session_type" => {
            value
                .parse::<SessionType>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "duration" => {
            value
                .parse::<Duration>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_session_type_value() {
        assert!(validate_config_value("session_type", "initial").is_ok());
        assert!(validate_config_value("session_type", "followup").is_ok());
        assert!(validate_config_value("session_type", "invalid").is_err());
    }

    #[test]
    fn validate_duration_value() {
        assert!(validate_config_value("duration", "30m").is_ok());
        assert!(validate_config_value("duration", "invalid").is_err());
    }

    #[test]
    fn api_keys_accept_any_value() {
        assert!(validate_config_value("assemblyai_api_key", "anything").is_ok());
        assert!(validate_config_value("anthropic_api_key", "anything").is_ok());
    }
}

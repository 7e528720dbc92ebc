use std::{collections::HashMap, fs, path::Path};

use morph_client::{Credentials, MorphSettings};
use tracing::warn;

#[derive(Default)]
pub struct Settings {
    pub api_key: String,
    pub api_secret: Option<String>,
    pub morph: MorphSettings,
}

impl Settings {
    pub fn credentials(&self) -> Credentials {
        let credentials = Credentials::new(self.api_key.clone());
        match &self.api_secret {
            Some(secret) => credentials.with_secret(secret.clone()),
            None => credentials,
        }
    }
}

/// Defaults, then `path` if it exists, then `MORPH_*` environment variables.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(%error, "ignoring unreadable settings file");
            return;
        }
    };

    for (key, value) in file_cfg {
        apply(settings, &key, value);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for (var, key) in [
        ("MORPH_API_KEY", "api_key"),
        ("MORPH_API_SECRET", "api_secret"),
        ("MORPH_BASE_URL", "base_url"),
        ("MORPH_MODE", "mode"),
        ("MORPH_ACTION_RULES", "action_rules"),
    ] {
        if let Some(value) = lookup(var) {
            apply(settings, key, value);
        }
    }
}

fn apply(settings: &mut Settings, key: &str, value: String) {
    match key {
        "api_key" => settings.api_key = value,
        "api_secret" => settings.api_secret = Some(value),
        "base_url" => settings.morph.base_url = value,
        "mode" => match value.parse() {
            Ok(mode) => settings.morph.mode = mode,
            Err(error) => warn!(%error, "ignoring response mode"),
        },
        "action_rules" => match value.parse() {
            Ok(rules) => settings.morph.action_rules = rules,
            Err(error) => warn!(%error, "ignoring action rule set"),
        },
        other => warn!(key = other, "ignoring unknown setting"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "portfolio.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub form_endpoint: String,
    pub contact_email: String,
    /// Absolute URL of the contact page; its `subject` query parameter is honoured.
    pub site_url: String,
    pub copy_feedback_ms: u64,
    pub reveal_stagger_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            form_endpoint: "https://formspree.io/f/mwpqygrq".into(),
            contact_email: "ghisingniranjan@gmail.com".into(),
            site_url: "http://localhost:3000/contact".into(),
            copy_feedback_ms: 3000,
            reveal_stagger_ms: 100,
            log_level: "info".into(),
        }
    }
}

impl Settings {
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    form_endpoint: Option<String>,
    contact_email: Option<String>,
    site_url: Option<String>,
    copy_feedback_ms: Option<u64>,
    reveal_stagger_ms: Option<u64>,
    log_level: Option<String>,
}

/// Defaults, then `portfolio.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_with(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        apply_file(&mut settings, file_cfg);
    }

    apply_env(&mut settings, env)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.form_endpoint {
        settings.form_endpoint = v;
    }
    if let Some(v) = file_cfg.contact_email {
        settings.contact_email = v;
    }
    if let Some(v) = file_cfg.site_url {
        settings.site_url = v;
    }
    if let Some(v) = file_cfg.copy_feedback_ms {
        settings.copy_feedback_ms = v;
    }
    if let Some(v) = file_cfg.reveal_stagger_ms {
        settings.reveal_stagger_ms = v;
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
}

/// `PORTFOLIO_*` first, `APP__*` overrides it.
fn apply_env(
    settings: &mut Settings,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    let lookup =
        |name: &str| env(&format!("APP__{name}")).or_else(|| env(&format!("PORTFOLIO_{name}")));

    if let Some(v) = lookup("FORM_ENDPOINT") {
        settings.form_endpoint = v;
    }
    if let Some(v) = lookup("CONTACT_EMAIL") {
        settings.contact_email = v;
    }
    if let Some(v) = lookup("SITE_URL") {
        settings.site_url = v;
    }
    if let Some(v) = lookup("COPY_FEEDBACK_MS") {
        settings.copy_feedback_ms = v
            .parse()
            .with_context(|| format!("COPY_FEEDBACK_MS must be milliseconds, got '{v}'"))?;
    }
    if let Some(v) = lookup("REVEAL_STAGGER_MS") {
        settings.reveal_stagger_ms = v
            .parse()
            .with_context(|| format!("REVEAL_STAGGER_MS must be milliseconds, got '{v}'"))?;
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        settings.log_level = v;
    }

    Ok(())
}

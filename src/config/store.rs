use anyhow::bail;

use super::structure::{ChatBotConfigInner, ChatBotConfigTOML, Secrets};
use std::{ops::Deref, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct ChatBotConfig {
    pub path: PathBuf,
    pub secrets: Secrets,
    cached: ChatBotConfigTOML,
}

impl ChatBotConfig {
    /// Reads the settings file and pulls credentials from the environment.
    pub fn load(path: PathBuf) -> Result<Self, anyhow::Error> {
        let mut config = Self::read(path)?;
        config.secrets = Secrets::from_env()?;

        Ok(config)
    }

    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            return Self::new(path);
        }

        if !path.is_file() {
            bail!(
                "Given path exists and is not a file... either change the path or delete the file."
            );
        }

        let config_str = std::fs::read_to_string(&path)?;

        let config = Self {
            path,
            secrets: Secrets::default(),
            cached: toml::from_str(&config_str)?,
        };
        config.cooldown()?;

        Ok(config)
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            secrets: Secrets::default(),
            cached: ChatBotConfigTOML::default(),
        };

        config.save()?;
        log::info!("wrote default settings to {}", config.path.display());

        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }

    pub fn cooldown(&self) -> Result<Duration, anyhow::Error> {
        Duration::try_from_secs_f64(self.discord.cooldown_secs).map_err(|why| {
            anyhow::anyhow!(
                "invalid cooldown_secs {}: {why}",
                self.discord.cooldown_secs
            )
        })
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.discord.chunk_delay_ms)
    }

    pub fn heartbeat(&self) -> Duration {
        Duration::from_secs(self.discord.heartbeat_secs.max(1))
    }
}

impl Deref for ChatBotConfig {
    type Target = ChatBotConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}

impl Default for ChatBotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config.toml"),
            secrets: Secrets::default(),
            cached: ChatBotConfigTOML::default(),
        }
    }
}

use std::fmt;

use anyhow::bail;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ChatBotConfigTOML {
    #[serde(default)]
    pub config: ChatBotConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChatBotConfigInner {
    pub discord: DiscordConfig,
    pub llm: LLMConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DiscordConfig {
    pub prefix: String,
    pub cooldown_secs: f64,
    /// Discord rejects messages over 2000 characters, one is kept as margin
    pub chunk_size: usize,
    pub chunk_delay_ms: u64,
    pub heartbeat_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            prefix: "!!".to_string(),
            cooldown_secs: 5.0,
            chunk_size: 1999,
            chunk_delay_ms: 1000,
            heartbeat_secs: 60,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u64,
    pub temperature: f64,
    pub persona: String,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.together.xyz/v1".to_string(),
            model: "meta-llama/Llama-4-Maverick-17B-128E-Instruct-FP8".to_string(),
            max_tokens: 800,
            temperature: 0.85,
            persona: "You are FRIDAYGPT, a powerful AI assistant designed by a Latina Tony Stark \
                      with adhd and a passion for ai ethics"
                .to_string(),
            max_attempts: 3,
            backoff_base_ms: 2000,
        }
    }
}

pub const TOGETHER_API_KEY: &str = "TOGETHER_API_KEY";
pub const DISCORD_TOKEN: &str = "DISCORD_TOKEN";

/// Credentials, only ever read from the environment.
#[derive(Clone, Default, PartialEq)]
pub struct Secrets {
    pub together_api_key: String,
    pub discord_token: String,
}

impl Secrets {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let fetch = |key: &str| -> anyhow::Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                Some(_) => bail!("{key} is set but empty"),
                None => bail!("missing {key} in environment variables"),
            }
        };

        Ok(Self {
            together_api_key: fetch(TOGETHER_API_KEY)?,
            discord_token: fetch(DISCORD_TOKEN)?,
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("together_api_key", &"<redacted>")
            .field("discord_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let parsed: ChatBotConfigTOML = toml::from_str(
            r#"
            [config.discord]
            prefix = "!"

            [config.llm]
            temperature = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(parsed.config.discord.prefix, "!");
        assert_eq!(parsed.config.discord.chunk_size, 1999);
        assert_eq!(parsed.config.llm.temperature, 0.2);
        assert_eq!(parsed.config.llm.max_tokens, 800);
        assert_eq!(parsed.config.llm.max_attempts, 3);
    }

    #[test]
    fn empty_toml_is_default() {
        let parsed: ChatBotConfigTOML = toml::from_str("").unwrap();
        assert_eq!(parsed, ChatBotConfigTOML::default());
    }

    #[test]
    fn secrets_are_read_and_trimmed() {
        let vars = env(&[(TOGETHER_API_KEY, " key "), (DISCORD_TOKEN, "token")]);
        let secrets = Secrets::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(secrets.together_api_key, "key");
        assert_eq!(secrets.discord_token, "token");
    }

    #[test]
    fn missing_secret_names_the_variable() {
        let vars = env(&[(TOGETHER_API_KEY, "key")]);
        let err = Secrets::from_lookup(|k| vars.get(k).cloned()).unwrap_err();

        assert!(err.to_string().contains(DISCORD_TOKEN));
    }

    #[test]
    fn blank_secret_is_rejected() {
        let vars = env(&[(TOGETHER_API_KEY, "   "), (DISCORD_TOKEN, "token")]);
        let err = Secrets::from_lookup(|k| vars.get(k).cloned()).unwrap_err();

        assert!(err.to_string().contains(TOGETHER_API_KEY));
    }

    #[test]
    fn debug_hides_secrets() {
        let secrets = Secrets {
            together_api_key: "sk-live".to_string(),
            discord_token: "discord-token".to_string(),
        };
        let printed = format!("{secrets:?}");

        assert!(!printed.contains("sk-live"));
        assert!(!printed.contains("discord-token"));
    }
}

// Bot configuration, read once from the environment at startup.
//
// Everything the services need (database location, act, channel ids, file
// paths) lives here and is handed to them explicitly from `main`.

use thiserror::Error;

const DEFAULT_ACT: &str = "6";
const DEFAULT_CREDENTIALS_PATH: &str = "firebase.json";
const DEFAULT_LEADERBOARD_ROOT: &str = "vitcc/owasp";
const DEFAULT_MEMBERS_FILE: &str = "members.txt";

/// Variables that must be present for the bot to start.
const REQUIRED_VARS: [&str; 4] = ["CURRENT_ACT", "FIREBASE_DB", "FIREBASE_STORAGE", "BOT_TOKEN"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("The following required environment variables have not been set: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("{var} must be a numeric channel id, got `{value}`")]
    InvalidChannelId { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub bot_token: String,
    /// Realtime database URL, e.g. `https://project-default-rtdb.firebaseio.com`.
    pub database_url: String,
    pub storage_bucket: String,
    /// Path to the service account key file.
    pub credentials_path: String,
    /// Path segments above the act, e.g. `vitcc/owasp`.
    pub leaderboard_root: String,
    pub current_act: String,
    pub spam_bait_channel_id: Option<u64>,
    pub spam_log_channel_id: Option<u64>,
    pub members_file: String,
    /// Keep the leaderboard in memory instead of the realtime database.
    pub use_memory_store: bool,
    pub debug: bool,
}

impl BotConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|var| lookup(var).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let required = |var: &str| lookup(var).unwrap_or_default();
        let or_default = |var: &str, default: &str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let current_act = or_default("CURRENT_ACT", DEFAULT_ACT);
        let debug = matches!(lookup("DEBUG").as_deref(), Some("TRUE" | "true" | "True"));

        Ok(Self {
            bot_token: required("BOT_TOKEN"),
            database_url: required("FIREBASE_DB").trim_end_matches('/').to_string(),
            storage_bucket: required("FIREBASE_STORAGE"),
            credentials_path: or_default("FIREBASE_CREDENTIALS", DEFAULT_CREDENTIALS_PATH),
            leaderboard_root: or_default("LEADERBOARD_ROOT", DEFAULT_LEADERBOARD_ROOT)
                .trim_matches('/')
                .to_string(),
            current_act,
            spam_bait_channel_id: parse_channel_id(
                "SPAM_BAIT_CHANNEL_ID",
                lookup("SPAM_BAIT_CHANNEL_ID"),
            )?,
            spam_log_channel_id: parse_channel_id(
                "SPAM_LOG_CHANNEL_ID",
                lookup("SPAM_LOG_CHANNEL_ID"),
            )?,
            members_file: or_default("MEMBERS_FILE", DEFAULT_MEMBERS_FILE),
            use_memory_store: lookup("LEADERBOARD_STORE")
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("memory")),
            debug,
        })
    }

    /// Prefix for text commands, including the trailing space.
    pub fn command_prefix(&self) -> &'static str {
        if self.debug {
            "!cyscom-dev "
        } else {
            "!cyscom "
        }
    }

    /// Database path holding this act's leaderboard, e.g. `vitcc/owasp/6`.
    pub fn leaderboard_path(&self) -> String {
        if self.leaderboard_root.is_empty() {
            self.current_act.clone()
        } else {
            format!("{}/{}", self.leaderboard_root, self.current_act)
        }
    }
}

fn parse_channel_id(var: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidChannelId {
                var,
                value: raw.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn required_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("CURRENT_ACT", "7"),
            ("FIREBASE_DB", "https://cyscom-default-rtdb.firebaseio.com/"),
            ("FIREBASE_STORAGE", "cyscom.appspot.com"),
            ("BOT_TOKEN", "token"),
        ]
    }

    #[test]
    fn reads_required_values_and_defaults() {
        let config = BotConfig::from_lookup(lookup_from(&required_pairs())).unwrap();

        assert_eq!(config.current_act, "7");
        assert_eq!(config.database_url, "https://cyscom-default-rtdb.firebaseio.com");
        assert_eq!(config.credentials_path, "firebase.json");
        assert_eq!(config.members_file, "members.txt");
        assert_eq!(config.leaderboard_path(), "vitcc/owasp/7");
        assert_eq!(config.spam_bait_channel_id, None);
        assert!(!config.use_memory_store);
        assert!(!config.debug);
        assert_eq!(config.command_prefix(), "!cyscom ");
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = BotConfig::from_lookup(lookup_from(&[("BOT_TOKEN", "token")])).unwrap_err();

        assert_eq!(
            err,
            ConfigError::MissingVars(vec!["CURRENT_ACT", "FIREBASE_DB", "FIREBASE_STORAGE"])
        );
        assert!(err.to_string().contains("FIREBASE_DB"));
    }

    #[test]
    fn empty_act_falls_back_to_default() {
        let mut pairs = required_pairs();
        pairs[0] = ("CURRENT_ACT", "");

        let config = BotConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.current_act, "6");
    }

    #[test]
    fn debug_flag_switches_prefix() {
        let mut pairs = required_pairs();
        pairs.push(("DEBUG", "True"));

        let config = BotConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert!(config.debug);
        assert_eq!(config.command_prefix(), "!cyscom-dev ");
    }

    #[test]
    fn memory_store_is_opt_in() {
        let mut pairs = required_pairs();
        pairs.push(("LEADERBOARD_STORE", "Memory"));

        let config = BotConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert!(config.use_memory_store);
    }

    #[test]
    fn other_debug_values_are_false() {
        let mut pairs = required_pairs();
        pairs.push(("DEBUG", "yes"));

        let config = BotConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert!(!config.debug);
    }

    #[test]
    fn parses_moderation_channels() {
        let mut pairs = required_pairs();
        pairs.push(("SPAM_BAIT_CHANNEL_ID", "123456789012345678"));
        pairs.push(("SPAM_LOG_CHANNEL_ID", " 42 "));

        let config = BotConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.spam_bait_channel_id, Some(123456789012345678));
        assert_eq!(config.spam_log_channel_id, Some(42));
    }

    #[test]
    fn rejects_zero_channel_id() {
        let mut pairs = required_pairs();
        pairs.push(("SPAM_LOG_CHANNEL_ID", "0"));

        let err = BotConfig::from_lookup(lookup_from(&pairs)).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidChannelId { .. }));
    }

    #[test]
    fn rejects_malformed_channel_id() {
        let mut pairs = required_pairs();
        pairs.push(("SPAM_BAIT_CHANNEL_ID", "#spam-bait"));

        let err = BotConfig::from_lookup(lookup_from(&pairs)).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidChannelId {
                var: "SPAM_BAIT_CHANNEL_ID",
                value: "#spam-bait".to_string(),
            }
        );
    }
}

use serde::{Deserialize, Serialize};

/// Persona handed to the text-generation service with every request
pub const SYSTEM_PROMPT: &str = "\
You are C0R-T3X, a cyberpunk system AI watching a hacker (the player) steer a data serpent \
through a grid. Reply with one short sentence at most. Be cynical and glitchy and use \
cyberpunk jargon. Call eating food \"uploading data\" or \"decrypting a block\". Call a \
crash a \"segfault\", \"link severed\" or \"neural interface overload\". When the serpent \
evolves, grudgingly praise the player's processing power. Do not be helpful. Build atmosphere.";

/// Settings for the remote commentary service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryConfig {
    /// Disable remote calls even if a key is present
    pub enabled: bool,
    /// Credential for the service; usually supplied through the environment
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the generative language API
    pub endpoint: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    /// Number of log lines kept; `None` keeps everything
    pub log_retention: Option<usize>,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            max_output_tokens: 60,
            temperature: 0.8,
            request_timeout_secs: 10,
            log_retention: Some(5),
        }
    }
}

impl CommentaryConfig {
    /// Key to use for remote calls, if remote commentary is possible at all
    pub fn credential(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

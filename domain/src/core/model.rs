//! Model value object representing an LLM on the inference service

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Models reachable through the OpenRouter-compatible endpoint (Value Object)
///
/// Identifiers are the provider-qualified names the endpoint expects.
/// Anything not listed is carried through as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    DeepSeekChat,
    Llama33_70bInstruct,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::DeepSeekChat => "deepseek/deepseek-chat",
            Model::Llama33_70bInstruct => "meta-llama/llama-3.3-70b-instruct",
            Model::Custom(s) => s,
        }
    }

    /// Short human-readable name for progress output
    pub fn display_name(&self) -> &str {
        match self {
            Model::DeepSeekChat => "DeepSeek",
            Model::Llama33_70bInstruct => "Llama 3.3 70B",
            Model::Custom(s) => s.rsplit('/').next().unwrap_or(s),
        }
    }
}

impl Default for Model {
    /// Returns the default model (DeepSeek Chat)
    fn default() -> Self {
        Model::DeepSeekChat
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "deepseek/deepseek-chat" => Model::DeepSeekChat,
            "meta-llama/llama-3.3-70b-instruct" => Model::Llama33_70bInstruct,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // FromStr is infallible
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models_round_trip() {
        for model in [Model::DeepSeekChat, Model::Llama33_70bInstruct] {
            let parsed: Model = model.as_str().parse().unwrap();
            assert_eq!(parsed, model);
        }
    }

    #[test]
    fn test_unknown_model_is_custom() {
        let model: Model = "anthropic/claude-3.5-sonnet".parse().unwrap();
        assert_eq!(
            model,
            Model::Custom("anthropic/claude-3.5-sonnet".to_string())
        );
        assert_eq!(model.display_name(), "claude-3.5-sonnet");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Model::Llama33_70bInstruct).unwrap();
        assert_eq!(json, "\"meta-llama/llama-3.3-70b-instruct\"");
        let model: Model = serde_json::from_str("\"deepseek/deepseek-chat\"").unwrap();
        assert_eq!(model, Model::DeepSeekChat);
    }
}

//! Login page configuration.
//!
//! Configuration values should be provided by the application, not hardcoded.
//! The defaults reproduce the production page.

use crate::providers::OAuthProvider;

/// Support-chat widget settings passed to [`Telemetry::boot_chat`](crate::providers::Telemetry::boot_chat).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Widget application id.
    ///
    /// Default: `gm6369ty`
    pub app_id: String,

    /// Side of the screen the widget docks to.
    ///
    /// Default: `right`
    pub alignment: String,

    /// Hide the floating launcher button.
    ///
    /// Default: `true`
    pub hide_default_launcher: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            app_id: "gm6369ty".to_string(),
            alignment: "right".to_string(),
            hide_default_launcher: true,
        }
    }
}

/// Login page configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    /// Product name shown in the form title.
    ///
    /// Default: `Highlight`
    pub app_name: String,

    /// Query parameter that opens the page in sign-up mode.
    ///
    /// Default: `sign_up`
    pub sign_up_param: String,

    /// Identity provider behind the redirect button.
    ///
    /// Default: [`OAuthProvider::Google`]
    pub oauth_provider: OAuthProvider,

    /// Support-chat widget settings.
    pub chat: ChatConfig,
}

impl LoginConfig {
    /// Create a configuration for the given product name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    /// Set the sign-up query parameter name.
    #[must_use]
    pub fn with_sign_up_param(mut self, name: impl Into<String>) -> Self {
        self.sign_up_param = name.into();
        self
    }

    /// Set the OAuth provider.
    #[must_use]
    pub const fn with_oauth_provider(mut self, provider: OAuthProvider) -> Self {
        self.oauth_provider = provider;
        self
    }

    /// Set the chat widget configuration.
    #[must_use]
    pub fn with_chat(mut self, chat: ChatConfig) -> Self {
        self.chat = chat;
        self
    }
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            app_name: "Highlight".to_string(),
            sign_up_param: "sign_up".to_string(),
            oauth_provider: OAuthProvider::Google,
            chat: ChatConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_page() {
        let config = LoginConfig::default();
        assert_eq!(config.app_name, "Highlight");
        assert_eq!(config.sign_up_param, "sign_up");
        assert_eq!(config.oauth_provider, OAuthProvider::Google);
        assert_eq!(config.chat.app_id, "gm6369ty");
        assert_eq!(config.chat.alignment, "right");
        assert!(config.chat.hide_default_launcher);
    }

    #[test]
    fn builder_overrides_only_what_it_sets() {
        let chat = ChatConfig {
            alignment: "left".to_string(),
            ..ChatConfig::default()
        };
        let config = LoginConfig::new("Acme")
            .with_sign_up_param("register")
            .with_oauth_provider(OAuthProvider::GitHub)
            .with_chat(chat.clone());

        assert_eq!(config.app_name, "Acme");
        assert_eq!(config.sign_up_param, "register");
        assert_eq!(config.oauth_provider, OAuthProvider::GitHub);
        assert_eq!(config.chat, chat);
    }
}

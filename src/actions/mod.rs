pub mod catalog;

pub use catalog::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::Locale;
use crate::types::{HttpMethod, StrategyId};

/// Placeholder substituted with the strategy identifier in endpoint templates
pub const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Enable,
    Disable,
    Reset,
    Delete,
    ClosePosition,
}

impl ActionKind {
    pub fn all() -> [ActionKind; 5] {
        [
            ActionKind::Enable,
            ActionKind::Disable,
            ActionKind::Reset,
            ActionKind::Delete,
            ActionKind::ClosePosition,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Enable => "enable",
            ActionKind::Disable => "disable",
            ActionKind::Reset => "reset",
            ActionKind::Delete => "delete",
            ActionKind::ClosePosition => "close-position",
        }
    }

    /// Reset, delete and close-position cannot be undone from the client.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            ActionKind::Reset | ActionKind::Delete | ActionKind::ClosePosition
        )
    }

    pub fn descriptor(&self, locale: Locale) -> ActionDescriptor {
        catalog::descriptor(*self, locale)
    }

    /// Look an action up by the CSS class of the element that triggers it,
    /// with or without the leading dot.
    pub fn from_trigger(selector: &str) -> Option<ActionKind> {
        let class = selector.trim().trim_start_matches('.');
        ActionKind::all()
            .into_iter()
            .find(|kind| catalog::trigger_selector(*kind).trim_start_matches('.') == class)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ActionKind::all()
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .or_else(|| ActionKind::from_trigger(&normalized))
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Everything needed to turn one click into one request and one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    pub trigger_selector: &'static str,
    pub method: HttpMethod,
    pub endpoint_template: &'static str,
    pub requires_confirmation: bool,
    pub confirmation_prompt: &'static str,
    pub success_message: &'static str,
}

impl ActionDescriptor {
    pub fn path_for(&self, id: &StrategyId) -> String {
        self.endpoint_template.replace(ID_PLACEHOLDER, id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_per_action() {
        let id = StrategyId::new("abc-123");
        let cases = [
            (ActionKind::Enable, HttpMethod::Get, "/action/enable_strategy/abc-123"),
            (ActionKind::Disable, HttpMethod::Get, "/action/disable_strategy/abc-123"),
            (ActionKind::Reset, HttpMethod::Get, "/action/reset_strategy/abc-123"),
            (ActionKind::Delete, HttpMethod::Delete, "/strategy/abc-123"),
            (ActionKind::ClosePosition, HttpMethod::Get, "/action/close_position/abc-123"),
        ];

        for (kind, method, path) in cases {
            let descriptor = kind.descriptor(Locale::ZhTw);
            assert_eq!(descriptor.method, method, "{}", kind);
            assert_eq!(descriptor.path_for(&id), path, "{}", kind);
        }
    }

    #[test]
    fn test_confirmation_only_for_destructive_actions() {
        for kind in ActionKind::all() {
            let descriptor = kind.descriptor(Locale::ZhTw);
            assert_eq!(descriptor.requires_confirmation, kind.is_destructive());
            assert_eq!(descriptor.confirmation_prompt.is_empty(), !kind.is_destructive());
        }
    }

    #[test]
    fn test_locale_does_not_change_routing() {
        for kind in ActionKind::all() {
            let zh = kind.descriptor(Locale::ZhTw);
            let en = kind.descriptor(Locale::En);
            assert_eq!(zh.method, en.method);
            assert_eq!(zh.endpoint_template, en.endpoint_template);
            assert_eq!(zh.trigger_selector, en.trigger_selector);
            assert_ne!(zh.success_message, en.success_message);
        }
    }

    #[test]
    fn test_parse_by_name_or_trigger() {
        assert_eq!("close-position".parse::<ActionKind>(), Ok(ActionKind::ClosePosition));
        assert_eq!("close_position".parse::<ActionKind>(), Ok(ActionKind::ClosePosition));
        assert_eq!(".action-delete-strategy".parse::<ActionKind>(), Ok(ActionKind::Delete));
        assert_eq!("action-enable-strategy".parse::<ActionKind>(), Ok(ActionKind::Enable));
        assert!("share".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_from_trigger() {
        assert_eq!(ActionKind::from_trigger(".action-close-position"), Some(ActionKind::ClosePosition));
        assert_eq!(ActionKind::from_trigger(".action-share-strategy"), None);
    }
}

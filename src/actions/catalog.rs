use crate::config::Locale;
use crate::types::HttpMethod;

use super::{ActionDescriptor, ActionKind};

pub(super) fn trigger_selector(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Enable => ".action-enable-strategy",
        ActionKind::Disable => ".action-disable-strategy",
        ActionKind::Reset => ".action-reset-strategy",
        ActionKind::Delete => ".action-delete-strategy",
        ActionKind::ClosePosition => ".action-close-position",
    }
}

fn method(kind: ActionKind) -> HttpMethod {
    match kind {
        ActionKind::Delete => HttpMethod::Delete,
        _ => HttpMethod::Get,
    }
}

fn endpoint_template(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Enable => "/action/enable_strategy/{id}",
        ActionKind::Disable => "/action/disable_strategy/{id}",
        ActionKind::Reset => "/action/reset_strategy/{id}",
        ActionKind::Delete => "/strategy/{id}",
        ActionKind::ClosePosition => "/action/close_position/{id}",
    }
}

fn confirmation_prompt(kind: ActionKind, locale: Locale) -> &'static str {
    match (locale, kind) {
        (_, ActionKind::Enable | ActionKind::Disable) => "",
        (Locale::ZhTw, ActionKind::Reset) => "確定要重置狀態嗎?",
        (Locale::ZhTw, ActionKind::Delete) => "確定要刪除嗎?",
        (Locale::ZhTw, ActionKind::ClosePosition) => "確定要平倉嗎?",
        (Locale::En, ActionKind::Reset) => "Are you sure you want to reset the state?",
        (Locale::En, ActionKind::Delete) => "Are you sure you want to delete this strategy?",
        (Locale::En, ActionKind::ClosePosition) => "Are you sure you want to close the position?",
    }
}

fn success_message(kind: ActionKind, locale: Locale) -> &'static str {
    match (locale, kind) {
        (Locale::ZhTw, ActionKind::Enable) => "啟動中, 請留意通知, 即將重整頁面",
        (Locale::ZhTw, ActionKind::Disable) => "關閉中, 請留意通知, 即將重整頁面",
        (Locale::ZhTw, ActionKind::Reset) => "已成功重置狀態, 即將重整頁面",
        (Locale::ZhTw, ActionKind::Delete) => "已成功刪除, 即將重整頁面",
        (Locale::ZhTw, ActionKind::ClosePosition) => "已成功平倉, 即將重整頁面",
        (Locale::En, ActionKind::Enable) => "Enabling, watch for notifications. Reloading shortly",
        (Locale::En, ActionKind::Disable) => "Disabling, watch for notifications. Reloading shortly",
        (Locale::En, ActionKind::Reset) => "State reset. Reloading shortly",
        (Locale::En, ActionKind::Delete) => "Deleted. Reloading shortly",
        (Locale::En, ActionKind::ClosePosition) => "Position closed. Reloading shortly",
    }
}

pub fn descriptor(kind: ActionKind, locale: Locale) -> ActionDescriptor {
    ActionDescriptor {
        kind,
        trigger_selector: trigger_selector(kind),
        method: method(kind),
        endpoint_template: endpoint_template(kind),
        requires_confirmation: kind.is_destructive(),
        confirmation_prompt: confirmation_prompt(kind, locale),
        success_message: success_message(kind, locale),
    }
}

/// All five descriptors, in display order.
pub fn catalog(locale: Locale) -> Vec<ActionDescriptor> {
    ActionKind::all()
        .into_iter()
        .map(|kind| descriptor(kind, locale))
        .collect()
}

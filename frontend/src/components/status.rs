//! 页面状态提示
//!
//! 各页面共用的一行式提示：(文案, 是否错误)。错误与成功分别
//! 渲染成不同 tone 的样式，None 时不渲染任何内容。

use leptos::prelude::*;

/// 页面状态信号里存放的值：文案 + 是否错误
pub type StatusEntry = (String, bool);

pub fn success(text: &str) -> Option<StatusEntry> {
    Some((text.to_string(), false))
}

pub fn error(text: impl ToString) -> Option<StatusEntry> {
    Some((text.to_string(), true))
}

/// 状态提示行
#[component]
pub fn StatusNote(status: RwSignal<Option<StatusEntry>>) -> impl IntoView {
    move || {
        status.get().map(|(text, is_error)| {
            let class = if is_error {
                "form-status error"
            } else {
                "form-status success"
            };
            view! { <p class=class>{text}</p> }
        })
    }
}

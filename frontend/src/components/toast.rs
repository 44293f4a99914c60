use super::super::{Model, Msg};
use super::utils::generate_id;
use shared::{IconHint, NotificationSink};
use yew::html::Scope;
use yew::prelude::*;

/// How long a toast stays on screen.
pub const TOAST_MILLIS: u32 = 4000;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error(IconHint),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Turns core notifications into toast messages on the component.
pub struct ToastSink {
    link: Scope<Model>,
}

impl ToastSink {
    pub fn new(link: Scope<Model>) -> Self {
        Self { link }
    }

    fn push(&self, kind: ToastKind, message: &str) {
        self.link.send_message(Msg::Notify(Toast {
            id: generate_id(),
            kind,
            message: message.to_string(),
        }));
    }
}

impl NotificationSink for ToastSink {
    fn notify_success(&self, message: &str) {
        log::info!("{}", message);
        self.push(ToastKind::Success, message);
    }

    fn notify_error(&self, message: &str, icon: IconHint) {
        log::warn!("{}", message);
        self.push(ToastKind::Error(icon), message);
    }
}

fn icon_class(kind: &ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "fa-solid fa-file-arrow-up",
        ToastKind::Error(IconHint::Alert) => "fa-solid fa-circle-exclamation",
        ToastKind::Error(IconHint::Warning) => "fa-solid fa-triangle-exclamation",
        ToastKind::Error(IconHint::Offline) => "fa-solid fa-plug-circle-xmark",
    }
}

pub fn render_toasts(model: &Model, ctx: &Context<Model>) -> Html {
    if model.toasts.is_empty() {
        return html! {};
    }

    let link = ctx.link();
    html! {
        <div class="toast-stack">
            { for model.toasts.iter().map(|toast| {
                let id = toast.id;
                let kind_class = match toast.kind {
                    ToastKind::Success => "toast-success".to_string(),
                    ToastKind::Error(icon) => format!("toast-error toast-{}", icon.as_ref()),
                };
                html! {
                    <div class={classes!("toast", kind_class)} key={id.to_string()}>
                        <i class={icon_class(&toast.kind)}></i>
                        <p>{ &toast.message }</p>
                        <button
                            class="toast-close"
                            title="Dismiss"
                            onclick={link.callback(move |_| Msg::DismissToast(id))}
                        >
                            <i class="fa-solid fa-times"></i>
                        </button>
                    </div>
                }
            })}
        </div>
    }
}

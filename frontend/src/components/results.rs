use super::super::{Model, Msg};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(receipt) = &model.receipt else {
        return html! {};
    };

    let body = serde_json::to_string_pretty(&receipt.body)
        .unwrap_or_else(|_| receipt.body.to_string());

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-circle-check"></i>{" Analysis accepted"}</h2>
                <span class="status-badge">{ format!("HTTP {}", receipt.status) }</span>
            </div>
            <pre class="result-body">{ body }</pre>
            <button
                class="analyze-btn"
                onclick={ctx.link().callback(|_| Msg::Acknowledge)}
            >
                <i class="fa-solid fa-check"></i>{" Dismiss"}
            </button>
        </div>
    }
}

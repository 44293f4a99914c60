use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-file-csv"></i> {" InsightForge "}<span class="accent">{"AI"}</span></h1>
            <p class="subtitle">{"Upload a dataset or a chart and let the analysis service do the rest"}</p>
        </header>
    }
}

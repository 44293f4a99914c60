use super::super::{Model, Msg};
use super::utils::{debounce, display_name};
use shared::file::format_size;
use shared::{FileClass, SelectedFile};
use yew::prelude::*;

pub fn render_selected_files(model: &Model, ctx: &Context<Model>) -> Html {
    let form = model.session.form();
    if !form.intent().has_files() {
        return html! {};
    }
    let files = form.selected_files();
    let primary = form.mode().primary_class();

    let link = ctx.link().clone();

    html! {
        <div id="selected-files">
            <h2>{ "Selected files" }</h2>
            <ul class="file-list">
                { for files.iter().map(|file| render_file_item(file, file.class == primary)) }
            </ul>
            <div class="button-container">
                <button
                    id="clear-all-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    disabled={form.is_submitting()}
                    onclick={debounce(300, move || link.send_message(Msg::ClearFiles))}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
            </div>
        </div>
    }
}

fn render_file_item(file: &SelectedFile, is_primary: bool) -> Html {
    let icon = match file.class {
        FileClass::Csv => "fa-solid fa-file-csv",
        FileClass::Pdf => "fa-solid fa-file-pdf",
        FileClass::Image => "fa-solid fa-file-image",
    };

    html! {
        <li class={classes!("file-item", is_primary.then_some("primary-file"))} title={file.name.clone()}>
            <i class={icon}></i>
            <span class="file-name">{ display_name(&file.name, 32) }</span>
            <span class="file-size">{ format_size(file.size) }</span>
        </li>
    }
}

use super::super::Model;
use super::super::Msg;
use super::utils::{debounce, extract_accepted_files};
use shared::UploadMode;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_mode_tabs(model, ctx) }
            { render_file_input_area(model, ctx) }
        </div>
    }
}

fn render_mode_tabs(model: &Model, ctx: &Context<Model>) -> Html {
    let form = model.session.form();
    let current = form.mode();
    let locked = form.is_submitting();

    html! {
        <div class="mode-tabs" role="tablist">
            { for UploadMode::iter().map(|mode| {
                let icon = match mode {
                    UploadMode::Dataset => "fa-solid fa-table",
                    UploadMode::ChartImage => "fa-solid fa-chart-column",
                };
                html! {
                    <button
                        role="tab"
                        class={classes!("mode-tab", (mode == current).then_some("active"))}
                        disabled={locked}
                        onclick={ctx.link().callback(move |_| Msg::SwitchMode(mode))}
                    >
                        <i class={icon}></i>{ format!(" {}", mode.label()) }
                    </button>
                }
            })}
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let mode = model.session.form().mode();
    let locked = model.awaiting_submission || model.session.form().is_submitting();
    let link = ctx.link();

    let handle_change = link.batch_callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input
            .files()
            .map(|list| extract_accepted_files(&list, mode))
            .unwrap_or_default();

        input.set_value("");

        (!files.is_empty()).then(|| Msg::FilesAdded(files))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(input) = input {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    let (prompt, file_types) = match mode {
        UploadMode::Dataset => (
            "Drag & drop a CSV and an optional PDF here, paste, or click",
            "Supported formats: CSV, PDF",
        ),
        UploadMode::ChartImage => (
            "Drag & drop a chart image here, paste, or click",
            "Supported formats: PNG, JPG, WEBP, GIF",
        ),
    };

    html! {
        <>
            <input
                type="file"
                id="file-input"
                multiple={mode == UploadMode::Dataset}
                accept={mode.accept_attribute()}
                disabled={locked}
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!(
                    "upload-area",
                    model.is_dragging.then_some("drag-over"),
                    locked.then_some("disabled"),
                )}
                aria-disabled={locked.to_string()}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{ prompt }</p>
                    <p class="file-types">{ file_types }</p>
                </div>
            </div>
        </>
    }
}

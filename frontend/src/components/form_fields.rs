use super::super::{Model, Msg};
use shared::{TaskType, UploadMode};
use strum::IntoEnumIterator;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

pub fn render_form_fields(model: &Model, ctx: &Context<Model>) -> Html {
    let form = model.session.form();

    html! {
        <div class="form-fields">
            {
                if form.mode() == UploadMode::Dataset {
                    html! {
                        <>
                            { render_target_select(model, ctx) }
                            { render_task_type_select(model, ctx) }
                        </>
                    }
                } else {
                    html! {}
                }
            }
            { render_submit_button(model, ctx) }
        </div>
    }
}

fn render_target_select(model: &Model, ctx: &Context<Model>) -> Html {
    let form = model.session.form();
    let selected = form.target_column().map(str::to_string);
    let onchange = ctx.link().callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectTarget(select.value())
    });

    html! {
        <label class="field">
            <span class="field-label">{ "Target column" }</span>
            <select
                id="target-column"
                disabled={!form.can_select_target()}
                onchange={onchange}
            >
                <option value="" selected={selected.is_none()} disabled=true>
                    { if form.columns().is_empty() { "Upload a CSV first" } else { "Select a column" } }
                </option>
                { for form.columns().iter().map(|column| html! {
                    <option
                        value={column.clone()}
                        selected={selected.as_deref() == Some(column.as_str())}
                    >
                        { column }
                    </option>
                })}
            </select>
        </label>
    }
}

fn render_task_type_select(model: &Model, ctx: &Context<Model>) -> Html {
    let form = model.session.form();
    let current = form.task_type();
    let onchange = ctx.link().callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectTaskType(select.value())
    });

    html! {
        <label class="field">
            <span class="field-label">{ "Task type" }</span>
            <select id="task-type" disabled={form.is_submitting()} onchange={onchange}>
                { for TaskType::iter().map(|task_type| html! {
                    <option
                        value={task_type.to_string()}
                        selected={current == Some(task_type)}
                    >
                        { task_type.label() }
                    </option>
                })}
            </select>
        </label>
    }
}

fn render_submit_button(model: &Model, ctx: &Context<Model>) -> Html {
    let form = model.session.form();
    let submitting = model.awaiting_submission || form.is_submitting();
    let label = match form.mode() {
        UploadMode::Dataset => " Upload & Analyze",
        UploadMode::ChartImage => " Analyze Chart",
    };

    html! {
        <button
            id="submit-btn"
            class="analyze-btn"
            disabled={submitting || !form.can_submit()}
            onclick={ctx.link().callback(|_| Msg::Submit)}
        >
            {
                if submitting {
                    html! { <><span class="spinner"></span>{" Uploading..."}</> }
                } else {
                    html! { <><i class="fa-solid fa-magnifying-glass-chart"></i>{ label }</> }
                }
            }
        </button>
    }
}

use super::super::{Model, Msg};
use super::toast::{Toast, TOAST_MILLIS};
use super::utils::extract_accepted_files;
use crate::api::BrowserFile;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::{SubmissionError, UploadMode, UploadReceipt};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_files_added(model: &mut Model, ctx: &Context<Model>, files: Vec<GlooFile>) -> bool {
    let files: Vec<BrowserFile> = files.into_iter().map(BrowserFile::from).collect();
    let mut report = model.session.accept_drop(files);

    if !report.accepted.is_empty() {
        model.receipt = None;
    }

    if let Some(ticket) = report.introspection.take() {
        let session = Rc::clone(&model.session);
        let link = ctx.link().clone();
        spawn_local(async move {
            if session.introspect(ticket).await {
                link.send_message(Msg::ColumnsReady);
            }
        });
    }

    true
}

pub fn handle_switch_mode(model: &mut Model, mode: UploadMode) -> bool {
    if model.session.form().mode() == mode {
        return false;
    }
    if model.session.switch_mode(mode) {
        model.receipt = None;
        true
    } else {
        false
    }
}

pub fn handle_clear_files(model: &mut Model) -> bool {
    model.session.discard_files();
    model.receipt = None;
    true
}

pub fn handle_select_target(model: &mut Model, column: String) -> bool {
    model.session.select_target_column(&column)
}

pub fn handle_select_task_type(model: &mut Model, raw: String) -> bool {
    model.session.select_task_type(&raw)
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    // A repeated submit still goes through the session, which refuses and
    // reports it.
    model.awaiting_submission = true;

    let session = Rc::clone(&model.session);
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = session.submit().await;
        link.send_message(Msg::SubmissionFinished(outcome));
    });

    true
}

pub fn handle_submission_finished(
    model: &mut Model,
    outcome: Result<UploadReceipt, SubmissionError>,
) -> bool {
    if !matches!(outcome, Err(SubmissionError::InProgress)) {
        model.awaiting_submission = false;
    }
    match outcome {
        Ok(receipt) => {
            log::debug!("Receipt status {}", receipt.status);
            model.receipt = Some(receipt);
        }
        Err(e) => log::debug!("Submission ended without a receipt: {}", e),
    }
    true
}

pub fn handle_acknowledge(model: &mut Model) -> bool {
    model.session.acknowledge();
    model.receipt = None;
    true
}

pub fn handle_notify(model: &mut Model, ctx: &Context<Model>, toast: Toast) -> bool {
    let id = toast.id;
    let link = ctx.link().clone();
    let timeout = Timeout::new(TOAST_MILLIS, move || {
        link.send_message(Msg::DismissToast(id));
    });
    model.toast_timeouts.insert(id, timeout);
    model.toasts.push(toast);
    true
}

pub fn handle_dismiss_toast(model: &mut Model, id: u64) -> bool {
    // Dropping the timeout cancels it.
    model.toast_timeouts.remove(&id);
    let before = model.toasts.len();
    model.toasts.retain(|toast| toast.id != id);
    model.toasts.len() != before
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(model, ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(model, ctx, file_list);
                return true;
            }
        }
    }
    false
}

pub fn process_file_list(model: &Model, ctx: &Context<Model>, file_list: FileList) {
    let mode = model.session.form().mode();
    let files = extract_accepted_files(&file_list, mode);

    if !files.is_empty() {
        ctx.link().send_message(Msg::FilesAdded(files));
    }
}

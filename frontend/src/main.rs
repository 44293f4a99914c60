mod api;
mod components;
mod config;

use api::{BrowserFile, BrowserTransport};
use components::form_fields::render_form_fields;
use components::handlers::*;
use components::header::render_header;
use components::results::render_results;
use components::selected_files::render_selected_files;
use components::toast::{Toast, ToastSink, render_toasts};
use components::upload_section::render_upload_section;
use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use shared::{SubmissionError, UploadForm, UploadMode, UploadReceipt, UploadSession};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub type Session = UploadSession<BrowserFile, BrowserTransport, ToastSink>;

// Yew msg components
pub enum Msg {
    // File operations
    FilesAdded(Vec<GlooFile>),
    ColumnsReady,
    ClearFiles,

    // Form fields
    SwitchMode(UploadMode),
    SelectTarget(String),
    SelectTaskType(String),

    // Submission
    Submit,
    SubmissionFinished(Result<UploadReceipt, SubmissionError>),
    Acknowledge,

    // UI states
    SetDragging(bool),
    Notify(Toast),
    DismissToast(u64),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    session: Rc<Session>,
    receipt: Option<UploadReceipt>,
    // Set between Msg::Submit and the spawned submission's first poll.
    awaiting_submission: bool,
    is_dragging: bool,
    toasts: Vec<Toast>,
    toast_timeouts: HashMap<u64, Timeout>,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = config::load_api_config();
        let form = UploadForm::new(config, UploadMode::Dataset);
        let session = UploadSession::new(form, BrowserTransport, ToastSink::new(ctx.link().clone()));

        let mut model = Self {
            session: Rc::new(session),
            receipt: None,
            awaiting_submission: false,
            is_dragging: false,
            toasts: Vec::new(),
            toast_timeouts: HashMap::new(),
            paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        } else {
            log::warn!("No window available, paste uploads are disabled");
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FilesAdded(files) => handle_files_added(self, ctx, files),
            Msg::ColumnsReady => true,
            Msg::ClearFiles => handle_clear_files(self),

            Msg::SwitchMode(mode) => handle_switch_mode(self, mode),
            Msg::SelectTarget(column) => handle_select_target(self, column),
            Msg::SelectTaskType(raw) => handle_select_task_type(self, raw),

            Msg::Submit => handle_submit(self, ctx),
            Msg::SubmissionFinished(outcome) => handle_submission_finished(self, outcome),
            Msg::Acknowledge => handle_acknowledge(self),

            Msg::SetDragging(is_dragging) => {
                let changed = self.is_dragging != is_dragging;
                self.is_dragging = is_dragging;
                changed
            }
            Msg::Notify(toast) => handle_notify(self, ctx, toast),
            Msg::DismissToast(id) => handle_dismiss_toast(self, id),

            Msg::HandleDrop(event) => handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                { render_toasts(self, ctx) }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_selected_files(self, ctx) }
                    { render_form_fields(self, ctx) }
                    { render_results(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"InsightForge | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<Model>::new().render();
}

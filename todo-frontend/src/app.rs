use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, channel};

use eframe::egui;
use todo_core::markup::INTRO_TEXT;
use todo_core::{Action, Command, Context, execute};
use todo_view::client::{AlertNotifier, HttpItemStore};

use crate::components::{todo_input, todo_list};
use crate::state::{Response, TodoAppState};

type BrowserContext = Context<HttpItemStore, AlertNotifier>;

pub struct TodoApp {
    state: TodoAppState,
    ctx: Rc<BrowserContext>,
    response_rx: Receiver<Response>,
    response_tx: Sender<Response>,
    repaint: egui::Context,
}

impl TodoApp {
    pub fn new(state: TodoAppState, repaint: egui::Context) -> Self {
        let (tx, rx) = channel();
        let ctx = Context::new(state.resource_path.clone(), HttpItemStore, AlertNotifier);
        Self {
            state,
            ctx: Rc::new(ctx),
            response_rx: rx,
            response_tx: tx,
            repaint,
        }
    }

    /// Fetch `{resource}.model.json` unless the page already carried state.
    pub fn start_fetch(&mut self) {
        if !self.state.begin_fetch() {
            return;
        }
        let ctx = self.ctx.clone();
        let tx = self.response_tx.clone();
        let repaint = self.repaint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            use todo_core::ItemStore;
            let result = ctx.store.fetch_model(&ctx.resource_path).await;
            let _ = tx.send(Response::Model(result));
            repaint.request_repaint();
        });
    }

    fn run(&self, command: Command) {
        let ctx = self.ctx.clone();
        let tx = self.response_tx.clone();
        let repaint = self.repaint.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(action) = execute(command, &ctx).await {
                let _ = tx.send(Response::Action(action));
                repaint.request_repaint();
            }
        });
    }

    fn dispatch(&mut self, action: Action) {
        if let Some(command) = self.state.dispatch(action) {
            self.run(command);
        }
    }

    fn process_responses(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            if let Some(command) = self.state.handle(response) {
                self.run(command);
            }
        }
    }
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_responses();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.title.as_str());
            ui.label(INTRO_TEXT);
            ui.add_space(8.0);

            if self.state.hydration().is_loading() {
                ui.spinner();
            }

            let view = self.state.view();
            let toggled = todo_list(ui, &view);
            ui.add_space(16.0);
            let submitted = todo_input(ui, &mut self.state.new_item_text, &view.input);

            if let Some(key) = toggled {
                self.dispatch(Action::Toggle(key));
            }
            if submitted {
                if let Some(command) = self.state.submit_input() {
                    self.run(command);
                }
            }
        });
    }
}

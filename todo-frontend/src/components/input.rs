use eframe::egui;
use todo_core::InputView;

/// Text field plus submit button. Returns `true` when the user submitted.
pub fn todo_input(ui: &mut egui::Ui, text: &mut String, view: &InputView) -> bool {
    let mut submitted = false;
    ui.horizontal(|ui| {
        let text_edit = ui.text_edit_singleline(text);
        if ui.button(view.submit_label).clicked()
            || text_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            submitted = true;
        }
    });
    submitted
}

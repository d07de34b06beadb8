use eframe::egui;
use todo_core::ListView;

/// One row per item. Returns the key of the item whose toggle was clicked.
pub fn todo_list(ui: &mut egui::Ui, view: &ListView) -> Option<String> {
    let mut to_toggle = None;

    for row in &view.rows {
        ui.horizontal(|ui| {
            let text = if row.struck_through() {
                egui::RichText::new(&row.name).strikethrough()
            } else {
                egui::RichText::new(&row.name)
            };
            ui.label(text);

            if ui.link(row.toggle_label).clicked() {
                to_toggle = Some(row.item_key.clone());
            }
        });
    }

    to_toggle
}

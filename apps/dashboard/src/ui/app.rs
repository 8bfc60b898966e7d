use std::time::Duration;

use client_core::{DashboardSnapshot, ModalState, DELETE_CONFIRMATION};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{StatusFilter, UserDraft, UserField, UserId, UserRecord};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

const ACTIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 160, 67);
const INACTIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 70, 60);

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormKey {
    Create,
    Edit(UserId),
}

fn form_key(modal: &ModalState) -> Option<FormKey> {
    match modal {
        ModalState::Closed => None,
        ModalState::Creating(_) => Some(FormKey::Create),
        ModalState::Editing(record) => Some(FormKey::Edit(record.id.clone())),
    }
}

/// Local copy of the open form so typing is not overwritten by in-flight snapshots.
#[derive(Debug, Clone)]
struct FormMirror {
    key: FormKey,
    draft: UserDraft,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    base_url: String,
    snapshot: DashboardSnapshot,
    search_input: String,
    form: Option<FormMirror>,
    pending_delete: Option<UserRecord>,
    alert: Option<String>,
    status: String,
    status_banner: Option<StatusBanner>,
}

impl DashboardApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, base_url: String) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            base_url,
            snapshot: DashboardSnapshot {
                current_page: 1,
                ..DashboardSnapshot::default()
            },
            search_input: String::new(),
            form: None,
            pending_delete: None,
            alert: None,
            status: "Loading users...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                    self.status_banner = None;
                }
                UiEvent::ViewUpdated(snapshot) => self.apply_snapshot(snapshot),
                UiEvent::Alert(message) => self.alert = Some(message),
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
                    self.status_banner = Some(StatusBanner {
                        message: err.banner_text(),
                    });
                }
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        match form_key(&snapshot.modal) {
            None => self.form = None,
            Some(key) => {
                let same_form = self.form.as_ref().is_some_and(|form| form.key == key);
                if !same_form {
                    self.form = Some(FormMirror {
                        key,
                        draft: snapshot.modal.draft().unwrap_or_default(),
                    });
                }
            }
        }
        self.snapshot = snapshot;
    }

    fn is_blocked(&self) -> bool {
        self.alert.is_some() || self.pending_delete.is_some()
    }

    /// Field edits only reach the local form copy once the worker has them queued.
    fn dispatch_all(&mut self, commands: Vec<BackendCommand>) {
        for cmd in commands {
            let edit = match &cmd {
                BackendCommand::UpdateField { field, value } => Some((*field, value.clone())),
                _ => None,
            };
            if !dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
                continue;
            }
            if let (Some((field, value)), Some(form)) = (edit, self.form.as_mut()) {
                form.draft.set_field(field, &value);
            }
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui, commands: &mut Vec<BackendCommand>) {
        ui.horizontal(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .id_salt("user_search")
                    .hint_text("Search here")
                    .desired_width(260.0),
            );
            if search.changed() {
                commands.push(BackendCommand::SetSearchText(self.search_input.clone()));
            }

            let mut selected = self.snapshot.status_filter;
            egui::ComboBox::from_id_salt("status_filter")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for option in StatusFilter::ALL {
                        ui.selectable_value(&mut selected, option, option.label());
                    }
                });
            if selected != self.snapshot.status_filter {
                // The search box keeps its text even though the filter drops it.
                commands.push(BackendCommand::SetStatusFilter(selected));
            }

            if ui.button("Add Record").clicked() {
                commands.push(BackendCommand::BeginCreate);
            }
            if ui.button("Reload").clicked() {
                commands.push(BackendCommand::Refresh);
            }
        });
    }

    fn show_table(&mut self, ui: &mut egui::Ui, commands: &mut Vec<BackendCommand>) {
        egui::Grid::new("users_table")
            .striped(true)
            .num_columns(7)
            .spacing([18.0, 8.0])
            .show(ui, |ui| {
                for header in ["S.No", "Name", "E-Mail", "Phone", "Status", "Edit", "Delete"] {
                    ui.strong(header);
                }
                ui.end_row();

                for row in &self.snapshot.rows {
                    let record = &row.record;
                    ui.label(row.serial.to_string());
                    ui.label(&record.name);
                    ui.label(&record.email);
                    ui.label(&record.phone);
                    let color = if record.status {
                        ACTIVE_COLOR
                    } else {
                        INACTIVE_COLOR
                    };
                    ui.colored_label(color, record.status_label());
                    if ui.button("Edit").clicked() {
                        commands.push(BackendCommand::BeginEdit(record.clone()));
                    }
                    if ui.button("Delete").clicked() {
                        self.pending_delete = Some(record.clone());
                    }
                    ui.end_row();
                }
            });

        if self.snapshot.rows.is_empty() {
            ui.add_space(8.0);
            ui.weak("No users to show.");
        }
    }

    fn show_pagination(&self, ui: &mut egui::Ui, commands: &mut Vec<BackendCommand>) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.snapshot.can_previous, egui::Button::new("Previous"))
                .clicked()
            {
                commands.push(BackendCommand::PreviousPage);
            }
            if ui
                .add_enabled(self.snapshot.can_next, egui::Button::new("Next"))
                .clicked()
            {
                commands.push(BackendCommand::NextPage);
            }
            ui.label(page_label(&self.snapshot));
        });
    }

    fn show_form_window(&mut self, ctx: &egui::Context, commands: &mut Vec<BackendCommand>) {
        let blocked = self.is_blocked();
        let Some(form) = self.form.as_ref() else {
            return;
        };

        let mut open = true;
        egui::Window::new(self.snapshot.modal.title())
            .id(egui::Id::new("user_form_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    for (field, label) in [
                        (UserField::Name, "Full Name"),
                        (UserField::Email, "E-Mail"),
                        (UserField::Phone, "Phone Number"),
                    ] {
                        ui.label(label);
                        let mut value = form.draft.field(field);
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut value)
                                .id_salt(field.as_str())
                                .desired_width(280.0),
                        );
                        if response.changed() {
                            commands.push(BackendCommand::UpdateField { field, value });
                        }
                        ui.add_space(4.0);
                    }

                    ui.label("Status");
                    let mut status = form.draft.status;
                    egui::ComboBox::from_id_salt("form_status")
                        .selected_text(if status { "Active" } else { "Inactive" })
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut status, true, "Active");
                            ui.selectable_value(&mut status, false, "Inactive");
                        });
                    if status != form.draft.status {
                        commands.push(BackendCommand::UpdateField {
                            field: UserField::Status,
                            value: status.to_string(),
                        });
                    }

                    ui.add_space(8.0);
                    if ui.button(self.snapshot.modal.submit_label()).clicked() {
                        commands.push(BackendCommand::Submit);
                    }
                });
            });

        if !open {
            commands.push(BackendCommand::CloseModal);
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context, commands: &mut Vec<BackendCommand>) {
        let Some(record) = self.pending_delete.clone() else {
            return;
        };

        let mut answer = None;
        egui::Window::new("Confirm delete")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(DELETE_CONFIRMATION);
                ui.weak(format!("{} <{}>", record.name, record.email));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(confirmed) = answer {
            self.pending_delete = None;
            commands.push(BackendCommand::DeleteUser {
                id: record.id,
                confirmed,
            });
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

fn page_label(snapshot: &DashboardSnapshot) -> String {
    format!(
        "Page {} of {} ({} of {} users)",
        snapshot.current_page,
        snapshot.total_pages.max(1),
        snapshot.filtered_count,
        snapshot.total_count
    )
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let mut commands = Vec::new();
        let blocked = self.is_blocked();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(&self.base_url);
                ui.separator();
                match &self.status_banner {
                    Some(banner) => {
                        ui.colored_label(INACTIVE_COLOR, &banner.message);
                    }
                    None => {
                        ui.label(&self.status);
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("User Management Dashboard");
            ui.add_space(8.0);
            ui.add_enabled_ui(!blocked, |ui| {
                self.show_toolbar(ui, &mut commands);
                ui.add_space(8.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_table(ui, &mut commands);
                });
                ui.add_space(8.0);
                self.show_pagination(ui, &mut commands);
            });
        });

        self.show_form_window(ctx, &mut commands);
        self.show_delete_confirmation(ctx, &mut commands);
        self.show_alert(ctx);

        self.dispatch_all(commands);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn record(id: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            phone: "1".into(),
            status: true,
        }
    }

    fn app_with_queue(capacity: usize) -> (DashboardApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(capacity);
        let (ui_tx, ui_rx) = bounded(8);
        (
            DashboardApp::new(cmd_tx, ui_rx, "http://localhost:8000".into()),
            ui_tx,
            cmd_rx,
        )
    }

    fn app() -> (DashboardApp, Sender<UiEvent>) {
        let (app, ui_tx, _cmd_rx) = app_with_queue(8);
        (app, ui_tx)
    }

    fn name_edit(value: &str) -> BackendCommand {
        BackendCommand::UpdateField {
            field: UserField::Name,
            value: value.to_string(),
        }
    }

    fn with_modal(modal: ModalState) -> DashboardSnapshot {
        DashboardSnapshot {
            current_page: 1,
            modal,
            ..DashboardSnapshot::default()
        }
    }

    #[test]
    fn opening_a_form_seeds_the_local_copy() {
        let (mut app, ui_tx) = app();
        ui_tx
            .send(UiEvent::ViewUpdated(with_modal(ModalState::Editing(record("4")))))
            .expect("send");

        app.process_ui_events();

        let form = app.form.expect("form open");
        assert_eq!(form.key, FormKey::Edit(UserId::new("4")));
        assert_eq!(form.draft.name, "User 4");
    }

    #[test]
    fn later_snapshots_keep_local_typing() {
        let (mut app, _ui_tx) = app();
        app.apply_snapshot(with_modal(ModalState::Creating(UserDraft::default())));
        if let Some(form) = app.form.as_mut() {
            form.draft.name = "Ada Lo".into();
        }

        let lagging = UserDraft {
            name: "Ada".into(),
            ..UserDraft::default()
        };
        app.apply_snapshot(with_modal(ModalState::Creating(lagging)));

        assert_eq!(app.form.expect("form open").draft.name, "Ada Lo");
    }

    #[test]
    fn queued_field_edit_updates_the_local_copy() {
        let (mut app, _ui_tx, cmd_rx) = app_with_queue(8);
        app.apply_snapshot(with_modal(ModalState::Creating(UserDraft::default())));

        app.dispatch_all(vec![name_edit("Ada")]);

        assert_eq!(cmd_rx.try_recv().ok(), Some(name_edit("Ada")));
        assert_eq!(app.form.expect("form open").draft.name, "Ada");
    }

    #[test]
    fn rejected_field_edit_leaves_the_local_copy_alone() {
        let (mut app, _ui_tx, cmd_rx) = app_with_queue(1);
        app.apply_snapshot(with_modal(ModalState::Creating(UserDraft::default())));
        app.dispatch_all(vec![BackendCommand::Refresh]);

        app.dispatch_all(vec![name_edit("Ada")]);

        assert!(app.status.contains("full"));
        assert_eq!(app.form.as_ref().expect("form open").draft.name, "");
        assert_eq!(cmd_rx.try_recv().ok(), Some(BackendCommand::Refresh));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn closed_modal_drops_the_local_copy() {
        let (mut app, _ui_tx) = app();
        app.apply_snapshot(with_modal(ModalState::Creating(UserDraft::default())));
        app.apply_snapshot(with_modal(ModalState::Closed));
        assert!(app.form.is_none());
    }

    #[test]
    fn alerts_block_the_dashboard_until_acknowledged() {
        let (mut app, ui_tx) = app();
        ui_tx
            .send(UiEvent::Alert("All fields are required.".into()))
            .expect("send");
        app.process_ui_events();
        assert!(app.is_blocked());
    }

    #[test]
    fn page_label_never_reports_zero_pages() {
        let snapshot = DashboardSnapshot {
            current_page: 1,
            ..DashboardSnapshot::default()
        };
        assert_eq!(page_label(&snapshot), "Page 1 of 1 (0 of 0 users)");
    }
}

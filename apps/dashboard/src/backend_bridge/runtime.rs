//! Worker thread that owns the view-state controller and serializes every command.

use std::thread;

use client_core::{
    DeleteOutcome, HttpUsersApi, SubmitError, SubmitOutcome, UsersApi, ViewStateController,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, base_url: String) {
    thread::spawn(move || {
        send_event(&ui_tx, UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                send_event(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let api = match HttpUsersApi::new(&base_url) {
                Ok(api) => api,
                Err(err) => {
                    send_event(
                        &ui_tx,
                        UiEvent::Error(UiError::from_message(
                            UiErrorContext::BackendStartup,
                            format!("backend worker startup failure: {err}"),
                        )),
                    );
                    tracing::error!("failed to build users client: {err}");
                    return;
                }
            };
            tracing::info!(base_url = %api.base_url(), "backend worker ready");

            let mut controller = ViewStateController::new(api);
            handle_command(&mut controller, BackendCommand::Refresh, &ui_tx).await;
            publish(&controller, &ui_tx);

            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&mut controller, cmd, &ui_tx).await;
                publish(&controller, &ui_tx);
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    });
}

fn publish<A: UsersApi>(controller: &ViewStateController<A>, ui_tx: &Sender<UiEvent>) {
    send_event(ui_tx, UiEvent::ViewUpdated(controller.snapshot()));
}

/// Returns false when the UI queue is full or gone; the event is dropped with a warning.
fn send_event(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let kind = event.kind();
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = kind, "ui event queue is full; dropped event");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(event = kind, "ui event queue disconnected; dropped event");
            false
        }
    }
}

/// Applies one UI command. Any refresh it triggers finishes before this returns.
pub async fn handle_command<A: UsersApi>(
    controller: &mut ViewStateController<A>,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    match cmd {
        BackendCommand::Refresh => {
            if let Err(err) = controller.refresh().await {
                send_event(
                    ui_tx,
                    UiEvent::Error(UiError::from_client_error(UiErrorContext::Refresh, &err)),
                );
            }
        }
        BackendCommand::SetSearchText(text) => controller.set_search_text(&text),
        BackendCommand::SetStatusFilter(status) => controller.set_status_filter(status),
        BackendCommand::NextPage => {
            controller.next_page();
        }
        BackendCommand::PreviousPage => {
            controller.previous_page();
        }
        BackendCommand::BeginCreate => controller.begin_create(),
        BackendCommand::BeginEdit(record) => controller.begin_edit(&record),
        BackendCommand::UpdateField { field, value } => {
            if !controller.update_field(field, &value) {
                tracing::debug!(%field, "ignored field update without an open form");
            }
        }
        BackendCommand::Submit => match controller.submit().await {
            Ok(SubmitOutcome::Created(_)) => {
                send_event(ui_tx, UiEvent::Info("User added".to_string()));
            }
            Ok(SubmitOutcome::Updated(_)) => {
                send_event(ui_tx, UiEvent::Info("User updated".to_string()));
            }
            Err(SubmitError::Validation(err)) => {
                send_event(ui_tx, UiEvent::Alert(err.alert_message()));
            }
            Err(SubmitError::NoOpenForm) => {
                tracing::warn!("submit requested with no open form");
            }
            Err(SubmitError::Request(err)) => {
                send_event(
                    ui_tx,
                    UiEvent::Error(UiError::from_client_error(UiErrorContext::Save, &err)),
                );
            }
        },
        BackendCommand::DeleteUser { id, confirmed } => {
            match controller.delete_record(&id, &confirmed).await {
                Ok(DeleteOutcome::Deleted) => {
                    send_event(ui_tx, UiEvent::Info("User deleted successfully".to_string()));
                }
                Ok(DeleteOutcome::Declined) => {}
                Err(err) => {
                    send_event(
                        ui_tx,
                        UiEvent::Error(UiError::from_client_error(UiErrorContext::Delete, &err)),
                    );
                }
            }
        }
        BackendCommand::CloseModal => controller.close_modal().await,
    }
}

//! Backend commands queued from UI to backend worker.

use shared::domain::{StatusFilter, UserField, UserId, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    SetSearchText(String),
    SetStatusFilter(StatusFilter),
    NextPage,
    PreviousPage,
    BeginCreate,
    BeginEdit(UserRecord),
    UpdateField { field: UserField, value: String },
    Submit,
    DeleteUser { id: UserId, confirmed: bool },
    CloseModal,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::SetSearchText(_) => "set_search_text",
            Self::SetStatusFilter(_) => "set_status_filter",
            Self::NextPage => "next_page",
            Self::PreviousPage => "previous_page",
            Self::BeginCreate => "begin_create",
            Self::BeginEdit(_) => "begin_edit",
            Self::UpdateField { .. } => "update_field",
            Self::Submit => "submit",
            Self::DeleteUser { .. } => "delete_user",
            Self::CloseModal => "close_modal",
        }
    }
}

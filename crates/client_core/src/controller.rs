use shared::domain::{StatusFilter, UserDraft, UserField, UserId, UserRecord};
use tracing::{debug, error, info};

use crate::{
    api::{ConfirmPrompt, UsersApi},
    error::{ClientError, SubmitError},
    view::{self, VisibleRow, PAGE_SIZE},
};

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

/// Which form, if any, is open. The payload is the form buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Creating(UserDraft),
    Editing(UserRecord),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn draft(&self) -> Option<UserDraft> {
        match self {
            Self::Closed => None,
            Self::Creating(draft) => Some(draft.clone()),
            Self::Editing(record) => Some(record.to_draft()),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Editing(_) => "Edit User",
            _ => "Add User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Editing(_) => "Update User",
            _ => "Add User",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(UserRecord),
    Updated(UserRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

/// Render-ready copy of the controller state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardSnapshot {
    pub rows: Vec<VisibleRow>,
    pub current_page: usize,
    pub total_pages: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub status_filter: StatusFilter,
    pub search_text: String,
    pub modal: ModalState,
    pub total_count: usize,
    pub filtered_count: usize,
}

/// Owns the fetched users, the filter inputs, the page cursor and the open form.
pub struct ViewStateController<A: UsersApi> {
    api: A,
    all_records: Vec<UserRecord>,
    filtered_records: Vec<UserRecord>,
    search_text: String,
    status_filter: StatusFilter,
    current_page: usize,
    modal: ModalState,
}

impl<A: UsersApi> ViewStateController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            all_records: Vec::new(),
            filtered_records: Vec::new(),
            search_text: String::new(),
            status_filter: StatusFilter::All,
            current_page: 1,
            modal: ModalState::Closed,
        }
    }

    /// Replaces the whole list with what the service returns. On failure nothing changes.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.api.list_users().await {
            Ok(records) => {
                debug!(count = records.len(), "fetched users");
                self.all_records = records;
                self.recompute();
                Ok(())
            }
            Err(err) => {
                error!("error fetching users: {err}");
                Err(err)
            }
        }
    }

    /// Does not move the page cursor, so a narrowed result can leave the current page empty.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_lowercase();
        self.recompute();
    }

    /// Selecting a status drops the active search text.
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.status_filter = status;
        self.search_text.clear();
        self.recompute();
    }

    pub fn next_page(&mut self) -> bool {
        if self.can_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// A cursor left past the last page by a narrowing search snaps back to it.
    pub fn previous_page(&mut self) -> bool {
        let last_page = self.total_pages().max(1);
        if self.current_page > last_page {
            self.current_page = last_page;
            true
        } else if self.can_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn begin_create(&mut self) {
        self.modal = ModalState::Creating(UserDraft::default());
    }

    pub fn begin_edit(&mut self, record: &UserRecord) {
        self.modal = ModalState::Editing(record.clone());
    }

    /// Returns false when no form is open.
    pub fn update_field(&mut self, field: UserField, value: &str) -> bool {
        match &mut self.modal {
            ModalState::Closed => false,
            ModalState::Creating(draft) => {
                draft.set_field(field, value);
                true
            }
            ModalState::Editing(record) => {
                let mut draft = record.to_draft();
                draft.set_field(field, value);
                record.apply(draft);
                true
            }
        }
    }

    /// Sends the open form. Validation failures never reach the service; request
    /// failures leave the form open with its contents.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let draft = self.modal.draft().ok_or(SubmitError::NoOpenForm)?;
        draft.validate()?;

        let result = match &self.modal {
            ModalState::Editing(record) => self
                .api
                .update_user(&record.id, &draft)
                .await
                .map(SubmitOutcome::Updated),
            _ => self
                .api
                .create_user(&draft)
                .await
                .map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                match &outcome {
                    SubmitOutcome::Updated(record) => {
                        info!(user_id = %record.id, "user updated")
                    }
                    SubmitOutcome::Created(record) => info!(user_id = %record.id, "user added"),
                }
                self.close_modal().await;
                Ok(outcome)
            }
            Err(err) => {
                error!("error saving user data: {err}");
                Err(SubmitError::Request(err))
            }
        }
    }

    pub async fn delete_record(
        &mut self,
        id: &UserId,
        confirm: &dyn ConfirmPrompt,
    ) -> Result<DeleteOutcome, ClientError> {
        if !confirm.confirm(DELETE_CONFIRMATION) {
            debug!(user_id = %id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(err) = self.api.delete_user(id).await {
            error!(user_id = %id, "error deleting user: {err}");
            return Err(err);
        }
        info!(user_id = %id, "user deleted");
        // Failure is already logged by refresh and the stale list stays on screen.
        let _ = self.refresh().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Discards the form and reloads the list, whether or not anything changed.
    pub async fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        let _ = self.refresh().await;
    }

    pub fn all_records(&self) -> &[UserRecord] {
        &self.all_records
    }

    pub fn filtered_records(&self) -> &[UserRecord] {
        &self.filtered_records
    }

    pub fn visible_records(&self) -> &[UserRecord] {
        view::paginate(&self.filtered_records, self.current_page, PAGE_SIZE)
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        view::visible_rows(&self.filtered_records, self.current_page, PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        view::total_pages(self.filtered_records.len(), PAGE_SIZE)
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            rows: self.visible_rows(),
            current_page: self.current_page,
            total_pages: self.total_pages(),
            can_previous: self.can_previous(),
            can_next: self.can_next(),
            status_filter: self.status_filter,
            search_text: self.search_text.clone(),
            modal: self.modal.clone(),
            total_count: self.all_records.len(),
            filtered_count: self.filtered_records.len(),
        }
    }

    fn recompute(&mut self) {
        self.filtered_records = view::filter(&self.all_records, self.status_filter, &self.search_text);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

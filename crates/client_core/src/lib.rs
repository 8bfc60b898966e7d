pub mod api;
pub mod controller;
pub mod error;
pub mod view;

pub use api::{ConfirmPrompt, HttpUsersApi, UsersApi};
pub use controller::{
    DashboardSnapshot, DeleteOutcome, ModalState, SubmitOutcome, ViewStateController,
    DELETE_CONFIRMATION,
};
pub use error::{ClientError, SubmitError};
pub use view::{VisibleRow, PAGE_SIZE};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

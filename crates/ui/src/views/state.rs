use dioxus::prelude::*;
use services::{AdminError, AttemptServiceError, HistoryError};
use tryout_core::attempt::AttemptError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// No usable session; the view sends the user to login.
    SessionInvalid,
    /// Signed in without the required role.
    Forbidden,
    EmptyAnswers,
    AlreadyCompleted,
    NoQuestions,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::SessionInvalid => "Sesi tidak valid. Silakan masuk kembali.",
            ViewError::Forbidden => "Anda tidak memiliki izin untuk mengakses halaman ini.",
            ViewError::EmptyAnswers => {
                "Anda belum mengisi jawaban. Silakan isi minimal satu jawaban sebelum submit."
            }
            ViewError::AlreadyCompleted => "Subtest ini sudah dikerjakan.",
            ViewError::NoQuestions => "Belum ada soal untuk subtest ini.",
            ViewError::Unknown => "Terjadi kesalahan. Silakan coba lagi.",
        }
    }
}

impl From<AdminError> for ViewError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::SessionInvalid => ViewError::SessionInvalid,
            AdminError::Forbidden => ViewError::Forbidden,
            _ => ViewError::Unknown,
        }
    }
}

impl From<AttemptServiceError> for ViewError {
    fn from(err: AttemptServiceError) -> Self {
        match err {
            AttemptServiceError::Attempt(err) => err.into(),
            _ => ViewError::Unknown,
        }
    }
}

impl From<AttemptError> for ViewError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::EmptyAnswers => ViewError::EmptyAnswers,
            AttemptError::AlreadyCompleted => ViewError::AlreadyCompleted,
            AttemptError::NoQuestions => ViewError::NoQuestions,
            _ => ViewError::Unknown,
        }
    }
}

impl From<HistoryError> for ViewError {
    fn from(_: HistoryError) -> Self {
        ViewError::Unknown
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

use thiserror::Error;

use crate::attempt::AttemptError;
use crate::model::{ParseIdError, SoalDraftError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    SoalDraft(#[from] SoalDraftError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::instrument;
use validator::Validate;

use crate::{
    constants::SUBMIT_SUCCESS_MESSAGE,
    entities::upload_draft::UploadDraft,
    errors::AppError,
    repositories::project::ProjectStore,
    utils::placeholder_image::ImageSource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
}

/// Sends drafts from the upload form to the store.
pub struct UploadHandler<S, I>
where
    S: ProjectStore,
    I: ImageSource,
{
    pub store: S,
    images: I,
    in_flight: AtomicBool,
}

impl<S, I> UploadHandler<S, I>
where
    S: ProjectStore,
    I: ImageSource,
{
    pub fn new(store: S, images: I) -> Self {
        UploadHandler {
            store,
            images,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a submission is waiting on the store.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates the draft and inserts it unverified. The draft is borrowed so
    /// the form keeps its contents when this fails.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn submit(&self, draft: &UploadDraft) -> Result<SubmissionReceipt, AppError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Ignoring duplicate submit while a request is in flight");
            return Err(AppError::SubmissionInProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        draft.validate()?;

        let project = draft.to_new_project(self.images.next_image_url());
        self.store.insert_project(&project).await.map_err(|e| {
            tracing::warn!("Project submission rejected: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(tools = project.tools.len(), "Project submitted for verification");
        Ok(SubmissionReceipt {
            message: SUBMIT_SUCCESS_MESSAGE.to_string(),
        })
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

//! Transit classes sub-client: get-or-create, update, patch, messages, batch.

use crate::client::WalletClient;
use crate::domain::common::{Message, ReviewStatus, Uri};
use crate::domain::transit_class::{TransitClass, TransitClassPatch};
use crate::domain::CreateOutcome;
use crate::error::SdkError;
use crate::http::batch::BatchItemResult;
use crate::shared::ResourceId;

/// Sub-client for transit class operations.
///
/// Every mutation first fetches the class; a missing class fails with a
/// not-found error and nothing is sent.
pub struct Classes<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Classes<'a> {
    pub async fn get(&self, id: &ResourceId) -> Result<TransitClass, SdkError> {
        self.client.fetch(id).await
    }

    /// Insert `class` unless one with the same ID exists.
    pub async fn create(&self, class: TransitClass) -> Result<CreateOutcome<TransitClass>, SdkError> {
        self.client.create(class).await
    }

    /// Apply `mutate` to the stored class and replace it with the result.
    pub async fn update<F>(&self, id: &ResourceId, mutate: F) -> Result<TransitClass, SdkError>
    where
        F: FnOnce(&mut TransitClass),
    {
        self.client.update(id, mutate).await
    }

    /// Merge the body built from the stored class into it.
    pub async fn patch<F>(&self, id: &ResourceId, build: F) -> Result<TransitClass, SdkError>
    where
        F: FnOnce(&TransitClass) -> TransitClassPatch,
    {
        self.client.patch(id, build).await
    }

    pub async fn add_message(&self, id: &ResourceId, message: Message) -> Result<TransitClass, SdkError> {
        self.client.add_message(id, message).await
    }

    /// Set the homepage through a full update. Updates must go back under review.
    pub async fn set_homepage_update(&self, id: &ResourceId, homepage: Uri) -> Result<TransitClass, SdkError> {
        self.update(id, |class| {
            class.homepage_uri = Some(homepage);
            class.review_status = Some(ReviewStatus::UnderReview);
        })
        .await
    }

    /// Set the homepage through a patch.
    pub async fn set_homepage_patch(&self, id: &ResourceId, homepage: Uri) -> Result<TransitClass, SdkError> {
        self.patch(id, |_| TransitClassPatch {
            homepage_uri: Some(homepage),
            review_status: Some(ReviewStatus::UnderReview),
            ..Default::default()
        })
        .await
    }

    /// Insert every class in a single batch call.
    pub async fn batch_insert(&self, classes: &[TransitClass]) -> Result<Vec<BatchItemResult>, SdkError> {
        self.client.batch_insert(classes).await
    }
}

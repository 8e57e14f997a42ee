//! Transit objects sub-client: get-or-create, update, patch, links, expiry, batch.

use crate::client::WalletClient;
use crate::domain::common::{LinksModuleData, Message, Uri};
use crate::domain::transit_object::{TransitObject, TransitObjectPatch};
use crate::domain::CreateOutcome;
use crate::error::SdkError;
use crate::http::batch::BatchItemResult;
use crate::shared::ResourceId;

/// Sub-client for transit object operations.
pub struct Objects<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Objects<'a> {
    pub async fn get(&self, id: &ResourceId) -> Result<TransitObject, SdkError> {
        self.client.fetch(id).await
    }

    /// Insert `object` unless one with the same ID exists.
    pub async fn create(&self, object: TransitObject) -> Result<CreateOutcome<TransitObject>, SdkError> {
        self.client.create(object).await
    }

    pub async fn update<F>(&self, id: &ResourceId, mutate: F) -> Result<TransitObject, SdkError>
    where
        F: FnOnce(&mut TransitObject),
    {
        self.client.update(id, mutate).await
    }

    pub async fn patch<F>(&self, id: &ResourceId, build: F) -> Result<TransitObject, SdkError>
    where
        F: FnOnce(&TransitObject) -> TransitObjectPatch,
    {
        self.client.patch(id, build).await
    }

    pub async fn add_message(&self, id: &ResourceId, message: Message) -> Result<TransitObject, SdkError> {
        self.client.add_message(id, message).await
    }

    /// Append `uri` to the object's links and replace the whole object.
    pub async fn add_link_update(&self, id: &ResourceId, uri: Uri) -> Result<TransitObject, SdkError> {
        self.update(id, |object| {
            object.links_module_data = Some(LinksModuleData::appended(
                object.links_module_data.take(),
                uri,
            ));
        })
        .await
    }

    /// Append `uri` to the object's links, sending only `linksModuleData`.
    pub async fn add_link_patch(&self, id: &ResourceId, uri: Uri) -> Result<TransitObject, SdkError> {
        self.patch(id, |object| TransitObjectPatch::append_link(object, uri))
            .await
    }

    /// Mark the object expired.
    pub async fn expire(&self, id: &ResourceId) -> Result<TransitObject, SdkError> {
        self.patch(id, |_| TransitObjectPatch::expire()).await
    }

    /// Insert every object in a single batch call.
    pub async fn batch_insert(&self, objects: &[TransitObject]) -> Result<Vec<BatchItemResult>, SdkError> {
        self.client.batch_insert(objects).await
    }
}

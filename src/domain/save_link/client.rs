//! Links sub-client: save-to-wallet URLs signed with the client's key.

use crate::client::WalletClient;
use crate::domain::save_link::{ObjectReference, SavePayload, SaveLinkIssuer};
use crate::domain::transit_class::TransitClass;
use crate::domain::transit_object::TransitObject;
use crate::domain::PassKind;
use crate::error::{AuthError, SdkError};

/// Sub-client for save-to-wallet links. Nothing here touches the network.
pub struct Links<'a> {
    pub(crate) client: &'a WalletClient,
}

impl<'a> Links<'a> {
    /// A link that creates `class` and `object` when the user saves it.
    pub fn new_objects(&self, class: &TransitClass, object: &TransitObject) -> Result<String, SdkError> {
        let payload = SavePayload::new()
            .with_resource(class)?
            .with_resource(object)?;
        self.issue(payload)
    }

    /// A link to objects that already exist, of any pass kind.
    pub fn existing_objects(&self, references: Vec<(PassKind, ObjectReference)>) -> Result<String, SdkError> {
        let payload = references
            .into_iter()
            .try_fold(SavePayload::new(), |payload, (kind, reference)| {
                payload.with_reference(kind, reference)
            })?;
        self.issue(payload)
    }

    /// Sign `payload` for the configured origins.
    pub fn issue(&self, payload: SavePayload) -> Result<String, SdkError> {
        let issuer = self.issuer()?;
        let claims = issuer.claims(self.client.origins.clone(), payload);
        issuer.issue(&claims)
    }

    fn issuer(&self) -> Result<&SaveLinkIssuer, SdkError> {
        self.client
            .issuer
            .as_ref()
            .ok_or(SdkError::Auth(AuthError::MissingCredentials))
    }
}

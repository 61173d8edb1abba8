//! Auth-signup creation path
//!
//! Credential-bearing seeds are created by the identity provider rather than
//! inserted directly. The password never reaches storage or the returned
//! document.

use serde_json::Value;

use seedkit_core_types::Sensitive;

use crate::errors::{Result, SeedError};
use crate::model::{Document, SeedAction, SeedEntity, SeededDocument};
use crate::ops::{IdentityProvider, SignUpError, SignUpRequest, Storage};

/// Shortest password accepted for auth-signup seeds
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Role assigned by the identity provider; any other role is patched in
pub const DEFAULT_ROLE: &str = "user";

const PASSWORD_FIELD: &str = "password";

pub(crate) fn strip_password(data: &mut Document) {
    data.remove(PASSWORD_FIELD);
}

fn string_field(data: &Document, field: &str) -> String {
    data.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Register the account with the identity provider
///
/// Returns the created document without the password. The role is not
/// applied here; see [`apply_role`].
pub(crate) fn create_via_signup(
    provider: &mut dyn IdentityProvider,
    entity: &SeedEntity,
    mut data: Document,
) -> Result<SeededDocument> {
    let password = string_field(&data, PASSWORD_FIELD);
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SeedError::CredentialTooShort {
            seed_id: entity.seed_id.clone(),
            min_length: MIN_PASSWORD_LENGTH,
        });
    }

    let request = SignUpRequest {
        name: string_field(&data, "name"),
        email: string_field(&data, "email"),
        password: Sensitive::new(password),
    };

    let user = match provider.sign_up_email(&request) {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Err(SeedError::SignUpFailed {
                seed_id: entity.seed_id.clone(),
                message: "identity provider returned no user".to_string(),
            })
        }
        Err(SignUpError::AlreadyExists { .. }) => {
            return Err(SeedError::AccountAlreadyExists {
                seed_id: entity.seed_id.clone(),
                email: request.email,
            })
        }
        Err(SignUpError::Other { message }) => {
            return Err(SeedError::SignUpFailed {
                seed_id: entity.seed_id.clone(),
                message,
            })
        }
    };

    if user.id.is_empty() {
        return Err(SeedError::MissingDocumentId {
            seed_id: entity.seed_id.clone(),
            collection: entity.collection.clone(),
        });
    }

    strip_password(&mut data);

    Ok(SeededDocument {
        id: user.id,
        seed_id: entity.seed_id.clone(),
        collection: entity.collection.clone(),
        data,
        action: SeedAction::Created,
    })
}

/// Patch a non-default role onto an account created by [`create_via_signup`]
///
/// The account must already be on the rollback stack: a failed patch leaves
/// a provider-created document behind.
pub(crate) fn apply_role(storage: &mut dyn Storage, seeded: &SeededDocument) -> Result<()> {
    if let Some(role) = seeded.data.get("role").and_then(Value::as_str) {
        if role != DEFAULT_ROLE {
            let mut patch = Document::new();
            patch.insert("role".to_string(), Value::String(role.to_string()));
            storage.update(&seeded.collection, &seeded.id, patch)?;
        }
    }
    Ok(())
}

use seedkit_core_types::Sensitive;
use thiserror::Error;

/// Credentials for creating an account
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
}

/// The account created by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUpUser {
    /// Id of the user document in storage
    pub id: String,
}

/// Typed provider failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignUpError {
    #[error("account already exists: {message}")]
    AlreadyExists { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// External identity provider used for seeds flagged `use_auth_signup`
pub trait IdentityProvider {
    /// Create an email/password account
    ///
    /// `Ok(None)` means the provider accepted the request but returned no user.
    fn sign_up_email(
        &mut self,
        request: &SignUpRequest,
    ) -> std::result::Result<Option<SignedUpUser>, SignUpError>;
}

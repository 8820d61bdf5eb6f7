//! Email registration and verification.
//!
//! An email starts `Unverified` with a random token and moves to `Verified`
//! (token cleared) when that token is presented. There is no way back, and
//! a consumed token can never match again. Tokens carry no expiry.

use aliasly_core::error::CoreError;
use aliasly_core::ids::{is_well_formed_token, new_entity_id, new_verification_token};
use aliasly_core::models::Email;
use chrono::Utc;

use crate::messages::RegisterEmailRequest;
use crate::{validate_request, EmailService};

/// Subject line of the verification message.
pub const VERIFICATION_SUBJECT: &str = "Verify your email address";

/// Plain-text body of the verification message.
pub fn verification_body(link: &str) -> String {
    format!(
        "Hello,\n\n\
         Please verify your email address by opening the following link:\n\
         {link}\n\n\
         If you did not request this, you can ignore this message.\n\n\
         Best regards,\n\
         The aliasly team\n"
    )
}

impl EmailService {
    /// Persist a new unverified email and mail its verification link.
    ///
    /// Fails with [`CoreError::Conflict`] if the address is already
    /// registered. If the mail cannot be sent the error is returned but the
    /// email stays stored as unverified; the send is not retried.
    pub async fn register_email(&self, input: RegisterEmailRequest) -> Result<Email, CoreError> {
        validate_request(&input)?;

        let token = new_verification_token();
        let email = Email::pending(
            new_entity_id(),
            input.user_id,
            input.email_address,
            token.clone(),
            Utc::now(),
        );

        let email = self.store.create_email(&email).await?;
        tracing::info!(email_id = %email.id, user_id = %email.user_id, "Email registered");

        let body = verification_body(&self.config.verification_link(&token));
        if let Err(e) = self
            .mailer
            .send(&email.address, VERIFICATION_SUBJECT, &body)
            .await
        {
            tracing::error!(
                email_id = %email.id,
                error = %e,
                "Verification mail not sent; email left unverified"
            );
            return Err(e.into());
        }

        Ok(email)
    }

    /// Mark the email holding `token` as verified and clear the token.
    ///
    /// Unknown, malformed and already-consumed tokens all fail with the
    /// same [`CoreError::NotFound`].
    pub async fn verify_email(&self, token: &str) -> Result<Email, CoreError> {
        let not_found = || CoreError::NotFound {
            entity: "Email",
            key: "verification token".to_string(),
        };

        if !is_well_formed_token(token) {
            return Err(not_found());
        }

        let mut email = self
            .store
            .find_pending_email_by_token(token)
            .await?
            .ok_or_else(not_found)?;

        email.mark_verified(Utc::now());
        let email = self
            .store
            .update_email(&email)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(email_id = %email.id, "Email verified");
        Ok(email)
    }

    /// Live emails registered by `user_id`.
    pub async fn list_emails(&self, user_id: &str) -> Result<Vec<Email>, CoreError> {
        Ok(self.store.list_emails_for_user(user_id).await?)
    }

    /// Soft-delete an email. Existing aliases pointing at it are untouched.
    pub async fn delete_email(&self, id: &str) -> Result<(), CoreError> {
        if !self.store.soft_delete_email(id).await? {
            return Err(CoreError::not_found("Email", id));
        }
        tracing::info!(email_id = %id, "Email deleted");
        Ok(())
    }
}

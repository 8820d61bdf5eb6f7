//! Alias provisioning.
//!
//! Creating an alias registers a forwarding rule with the external provider
//! first and persists the local record second. Updates and deletions touch
//! only the local record; the provider's rule is left as it was.

use aliasly_core::address::{alias_address, validate_alias_prefix};
use aliasly_core::error::CoreError;
use aliasly_core::ids::new_entity_id;
use aliasly_core::models::{Alias, Email};
use aliasly_core::store::StoreError;
use chrono::Utc;

use crate::messages::{CreateAliasRequest, UpdateAliasRequest};
use crate::{validate_request, EmailService};

impl EmailService {
    /// Provision `prefix@alias_domain` forwarding to a verified email.
    ///
    /// The email must exist, belong to `user_id` and be verified; any miss
    /// is reported as the same [`CoreError::NotFound`]. A taken address fails
    /// with [`CoreError::Conflict`] before the provider is called.
    pub async fn create_alias(&self, input: CreateAliasRequest) -> Result<Alias, CoreError> {
        validate_request(&input)?;
        validate_alias_prefix(&input.alias_prefix).map_err(CoreError::Validation)?;

        let email = self
            .owned_verified_email(&input.email_id, &input.user_id)
            .await?;

        let domain = &self.config.alias_domain;
        let address = alias_address(&input.alias_prefix, domain);
        self.ensure_address_free(&address).await?;

        self.provider
            .create_forwarding_rule(domain, &input.alias_prefix, &email.address)
            .await
            .map_err(|e| {
                tracing::error!(alias_address = %address, error = %e, "Provider refused forwarding rule");
                CoreError::from(e)
            })?;

        let now = Utc::now();
        let alias = Alias {
            id: new_entity_id(),
            user_id: input.user_id,
            email_id: email.id,
            alias_address: address,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        match self.store.create_alias(&alias).await {
            Ok(alias) => {
                tracing::info!(
                    alias_id = %alias.id,
                    alias_address = %alias.alias_address,
                    "Alias created"
                );
                Ok(alias)
            }
            Err(StoreError::Backend(msg)) => {
                self.withdraw_forwarding_rule(&input.alias_prefix, &alias.alias_address)
                    .await;
                Err(StoreError::Backend(msg).into())
            }
            // The rule may belong to the request that won the race; keep it.
            Err(e) => {
                tracing::error!(
                    alias_address = %alias.alias_address,
                    user_id = %alias.user_id,
                    target = %email.address,
                    error = %e,
                    "Alias insert lost a uniqueness race: cross-user forwarding rule left at provider"
                );
                Err(e.into())
            }
        }
    }

    pub async fn get_alias(&self, id: &str) -> Result<Alias, CoreError> {
        self.store
            .find_alias_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("Alias", id))
    }

    /// Re-point or rename an alias locally. Concurrent updates are
    /// last-write-wins and the provider is not informed.
    pub async fn update_alias(
        &self,
        id: &str,
        input: UpdateAliasRequest,
    ) -> Result<Alias, CoreError> {
        validate_request(&input)?;

        let mut alias = self.get_alias(id).await?;

        if let Some(email_id) = input.email_id {
            let email = self.owned_verified_email(&email_id, &alias.user_id).await?;
            alias.email_id = email.id;
        }
        if let Some(prefix) = input.alias_prefix {
            validate_alias_prefix(&prefix).map_err(CoreError::Validation)?;
            alias.alias_address = alias_address(&prefix, &self.config.alias_domain);
        }
        alias.updated_at = Utc::now();

        let alias = self
            .store
            .update_alias(&alias)
            .await?
            .ok_or_else(|| CoreError::not_found("Alias", id))?;
        tracing::info!(alias_id = %alias.id, alias_address = %alias.alias_address, "Alias updated");
        Ok(alias)
    }

    /// Soft-delete an alias. The row stays in storage.
    pub async fn delete_alias(&self, id: &str) -> Result<(), CoreError> {
        if !self.store.soft_delete_alias(id).await? {
            return Err(CoreError::not_found("Alias", id));
        }
        tracing::info!(alias_id = %id, "Alias deleted");
        Ok(())
    }

    /// Live aliases owned by `user_id`, in insertion order.
    pub async fn list_aliases(&self, user_id: &str) -> Result<Vec<Alias>, CoreError> {
        Ok(self.store.list_aliases_for_user(user_id).await?)
    }

    async fn owned_verified_email(&self, email_id: &str, user_id: &str) -> Result<Email, CoreError> {
        self.store
            .find_verified_email(email_id, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Email", email_id))
    }

    /// Unique constraints cover soft-deleted aliases too.
    async fn ensure_address_free(&self, address: &str) -> Result<(), CoreError> {
        if self
            .store
            .find_alias_by_address_include_deleted(address)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict(format!(
                "Alias address {address} is already taken"
            )));
        }
        Ok(())
    }

    /// Best-effort removal of a rule whose local record could not be stored.
    async fn withdraw_forwarding_rule(&self, prefix: &str, address: &str) {
        match self
            .provider
            .delete_forwarding_rule(&self.config.alias_domain, prefix)
            .await
        {
            Ok(()) => {
                tracing::warn!(alias_address = %address, "Alias insert failed; forwarding rule withdrawn");
            }
            Err(e) => {
                tracing::error!(
                    alias_address = %address,
                    error = %e,
                    "Alias insert failed and rule withdrawal failed: orphaned forwarding rule"
                );
            }
        }
    }
}

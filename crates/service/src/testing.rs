//! Recording test doubles for the provider and mail collaborators.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use aliasly_core::mail::{MailError, MailSender};
use aliasly_core::provider::{ForwardingProvider, ProviderError};
use async_trait::async_trait;
use tokio::sync::Barrier;

/// A message captured by [`RecordingMailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl SentMail {
    /// The `token` query parameter of the first verification link in the body.
    pub fn verification_token(&self) -> Option<String> {
        let start = self.body.find("token=")? + "token=".len();
        let token: String = self.body[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        (!token.is_empty()).then_some(token)
    }
}

/// Captures every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail with [`MailError::Delivery`].
    pub fn fail_sends(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, to_address: &str, subject: &str, body: &str) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Delivery("smtp relay unreachable".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentMail {
                to: to_address.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        Ok(())
    }
}

/// A forwarding rule registered with [`RecordingProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardingRule {
    pub domain: String,
    pub prefix: String,
    pub target: String,
}

/// Records provider calls; can be told to refuse new rules.
#[derive(Default)]
pub struct RecordingProvider {
    created: Mutex<Vec<ForwardingRule>>,
    deleted: Mutex<Vec<(String, String)>>,
    fail_creates: AtomicBool,
    create_barrier: Option<Arc<Barrier>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every `create_forwarding_rule` call until `callers` calls are
    /// in flight, so concurrent requests all pass their pre-checks before
    /// any of them persists.
    pub fn with_create_barrier(callers: usize) -> Self {
        Self {
            create_barrier: Some(Arc::new(Barrier::new(callers))),
            ..Self::default()
        }
    }

    /// Make subsequent `create_forwarding_rule` calls fail.
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn created(&self) -> Vec<ForwardingRule> {
        self.created.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// `(domain, prefix)` pairs passed to `delete_forwarding_rule`.
    pub fn deleted(&self) -> Vec<(String, String)> {
        self.deleted.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ForwardingProvider for RecordingProvider {
    async fn create_forwarding_rule(
        &self,
        domain: &str,
        prefix: &str,
        target_address: &str,
    ) -> Result<(), ProviderError> {
        if let Some(barrier) = &self.create_barrier {
            barrier.wait().await;
        }
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(ProviderError::Rejected {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }
        self.created
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ForwardingRule {
                domain: domain.to_string(),
                prefix: prefix.to_string(),
                target: target_address.to_string(),
            });
        Ok(())
    }

    async fn delete_forwarding_rule(
        &self,
        domain: &str,
        prefix: &str,
    ) -> Result<(), ProviderError> {
        self.deleted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((domain.to_string(), prefix.to_string()));
        Ok(())
    }
}

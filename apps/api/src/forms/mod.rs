//! Forms: one server-side session per feature tab.
//!
//! Each form owns its busy flag and its last result. Forms never share state
//! with each other; the registry only maps ids to sessions.
//!
//! State machine: Idle → (non-blank submit) → Pending → Idle(result).
//! Blank input and submits while Pending are rejected without contacting
//! the completion capability.

pub mod handlers;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::completion::{CompletionClient, CompletionRequest, CompletionResult};
use crate::features::{FeatureId, FeatureInput};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please provide input before submitting.")]
    EmptyInput,

    #[error("A request is already in progress for this form.")]
    Busy,

    #[error("Form {form_id} belongs to feature '{expected}', not '{actual}'")]
    FeatureMismatch {
        form_id: Uuid,
        expected: FeatureId,
        actual: FeatureId,
    },

    #[error("Form {0} not found")]
    NotFound(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Idle,
    Pending,
}

/// Read-only view of a form, returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub form_id: Uuid,
    pub feature: FeatureId,
    pub status: FormStatus,
    pub result: Option<CompletionResult>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
struct FormState {
    result: Option<CompletionResult>,
    updated_at: DateTime<Utc>,
}

/// A single form instance. At most one request is in flight at a time.
#[derive(Debug)]
pub struct FormSession {
    id: Uuid,
    feature: FeatureId,
    busy: AtomicBool,
    state: Mutex<FormState>,
}

/// Clears the busy flag when dropped, so an aborted submit never wedges the form.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormSession {
    pub fn new(feature: FeatureId) -> Self {
        Self {
            id: Uuid::new_v4(),
            feature,
            busy: AtomicBool::new(false),
            state: Mutex::new(FormState {
                result: None,
                updated_at: Utc::now(),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn feature(&self) -> FeatureId {
        self.feature
    }

    pub fn is_pending(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validates, sends one request, and stores the outcome.
    ///
    /// The previous result is cleared as soon as the request is dispatched,
    /// so after a failure the form holds the failure, not stale text.
    pub async fn submit(
        &self,
        client: &CompletionClient,
        input: FeatureInput,
    ) -> Result<CompletionResult, FormError> {
        if input.is_blank() {
            return Err(FormError::EmptyInput);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(form_id = %self.id, "Rejected submit while request is pending");
            return Err(FormError::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        self.set_result(None);

        let request = CompletionRequest::for_feature(self.feature, &input);
        let result = client.submit(&request).await;

        self.set_result(Some(result.clone()));
        info!(
            form_id = %self.id,
            feature = %self.feature,
            success = result.is_success(),
            "Form submission finished"
        );
        Ok(result)
    }

    #[cfg(test)]
    pub fn result(&self) -> Option<CompletionResult> {
        self.lock_state().result.clone()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.lock_state();
        FormSnapshot {
            form_id: self.id,
            feature: self.feature,
            status: if self.is_pending() {
                FormStatus::Pending
            } else {
                FormStatus::Idle
            },
            result: state.result.clone(),
            updated_at: state.updated_at,
        }
    }

    fn set_result(&self, result: Option<CompletionResult>) {
        let mut state = self.lock_state();
        state.result = result;
        state.updated_at = Utc::now();
    }

    // The guarded data is plain values, so a poisoned lock is still usable.
    fn lock_state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Maps form ids to their sessions.
#[derive(Debug, Default, Clone)]
pub struct FormRegistry {
    forms: Arc<Mutex<HashMap<Uuid, Arc<FormSession>>>>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new idle form bound to `feature`.
    pub fn open(&self, feature: FeatureId) -> Arc<FormSession> {
        let session = Arc::new(FormSession::new(feature));
        self.lock_forms().insert(session.id(), session.clone());
        info!(form_id = %session.id(), %feature, "Opened form");
        session
    }

    pub fn get(&self, form_id: Uuid) -> Result<Arc<FormSession>, FormError> {
        self.lock_forms()
            .get(&form_id)
            .cloned()
            .ok_or(FormError::NotFound(form_id))
    }

    /// Returns the existing form for `feature`. Without an id the caller gets a
    /// detached one-shot form that is never registered, so nothing about the
    /// submission outlives the request.
    pub fn resolve(
        &self,
        form_id: Option<Uuid>,
        feature: FeatureId,
    ) -> Result<Arc<FormSession>, FormError> {
        let Some(form_id) = form_id else {
            let session = Arc::new(FormSession::new(feature));
            debug!(form_id = %session.id(), %feature, "Using detached form");
            return Ok(session);
        };

        let session = self.get(form_id)?;
        if session.feature() != feature {
            return Err(FormError::FeatureMismatch {
                form_id,
                expected: session.feature(),
                actual: feature,
            });
        }
        Ok(session)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock_forms().len()
    }

    fn lock_forms(&self) -> MutexGuard<'_, HashMap<Uuid, Arc<FormSession>>> {
        self.forms.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

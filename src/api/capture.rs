// src/api/capture.rs
//! One-shot credential capture over an injected network facility.
//!
//! Two paths race to fill a single credential slot: passive observation of
//! Authorization headers on outgoing requests (the tap), and a manual
//! operator-supplied value. The first writer wins; the loser's value is
//! discarded. Downstream work suspends on [`CredentialSlot::wait`] until
//! either path resolves it, and the wait never expires.

use super::{DispatchResponse, HttpDispatch, RequestOptions};
use crate::error::AppError;
use crate::types::BearerToken;
use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

/// The supported header representations, as a closed variant set.
///
/// Each shape answers one question — does it carry an Authorization entry —
/// through [`HeaderShape::find_authorization`], so callers dispatch on
/// capability rather than probing runtime types.
#[derive(Debug, Clone)]
pub enum HeaderShape {
    /// Plain key/value mapping
    Map(HashMap<String, String>),
    /// Ordered key/value pair list
    Pairs(Vec<(String, String)>),
    /// Structured header collection with case-insensitive lookup
    Collection(HeaderMap),
}

impl HeaderShape {
    /// Case-insensitive lookup of the Authorization entry's value.
    pub fn find_authorization(&self) -> Option<String> {
        match self {
            Self::Map(entries) => entries
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                .map(|(_, value)| value.clone()),
            Self::Pairs(pairs) => pairs
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
                .map(|(_, value)| value.clone()),
            Self::Collection(headers) => headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        }
    }

    /// Converts any shape into the transport's native header collection.
    pub fn into_header_map(self) -> Result<HeaderMap, AppError> {
        let entries: Vec<(String, String)> = match self {
            Self::Collection(headers) => return Ok(headers),
            Self::Map(entries) => entries.into_iter().collect(),
            Self::Pairs(pairs) => pairs,
        };

        let mut headers = HeaderMap::with_capacity(entries.len());
        for (name, value) in entries {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                AppError::InvalidHeader {
                    message: format!("{}: {}", name, e),
                }
            })?;
            let value = HeaderValue::from_str(&value).map_err(|e| AppError::InvalidHeader {
                message: e.to_string(),
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// A single-resolution credential slot.
///
/// Starts unset; transitions to set exactly once; never cleared. The
/// check-and-set under a mutex is the entire locking discipline — there is
/// no contention beyond the capture race itself.
pub struct CredentialSlot {
    value: Mutex<Option<BearerToken>>,
    resolved: watch::Sender<bool>,
}

impl CredentialSlot {
    pub fn new() -> Self {
        let (resolved, _) = watch::channel(false);
        Self {
            value: Mutex::new(None),
            resolved,
        }
    }

    /// Stores `token` if the slot is still empty. Returns true only for the
    /// winning writer; a losing value is dropped, not queued.
    pub fn try_set(&self, token: BearerToken) -> bool {
        {
            let mut slot = self.value.lock();
            if slot.is_some() {
                return false;
            }
            *slot = Some(token);
        }
        self.resolved.send_replace(true);
        true
    }

    pub fn get(&self) -> Option<BearerToken> {
        self.value.lock().clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.value.lock().is_some()
    }

    /// Suspends until the slot resolves; returns immediately ever after.
    pub async fn wait(&self) -> BearerToken {
        let mut rx = self.resolved.subscribe();
        loop {
            if let Some(token) = self.get() {
                return token;
            }
            // Mark the current version seen, then sleep until try_set signals
            if *rx.borrow_and_update() {
                continue;
            }
            rx.changed()
                .await
                .expect("credential slot sender outlives its waiters - this is a bug in the code");
        }
    }
}

impl Default for CredentialSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// A capture session: the credential slot plus its two filling paths.
#[derive(Clone)]
pub struct CaptureSession {
    slot: Arc<CredentialSlot>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(CredentialSlot::new()),
        }
    }

    /// Wraps a network facility with the observation tap. The returned
    /// dispatcher forwards every request unchanged; before forwarding it
    /// inspects the outgoing headers for an Authorization entry and, if the
    /// slot is still empty, captures it.
    pub fn wrap<D: HttpDispatch>(&self, inner: D) -> TappedDispatch<D> {
        TappedDispatch {
            inner,
            slot: Arc::clone(&self.slot),
        }
    }

    /// Manual supply path. Normalizes an operator-pasted Authorization value
    /// and races it against the tap. Returns true only when this call
    /// resolved the slot; once the credential is set the entry point is
    /// retracted and always returns false.
    pub fn supply(&self, raw: &str) -> bool {
        if self.slot.is_resolved() {
            log::debug!("Manual credential supply ignored: already resolved");
            return false;
        }

        match BearerToken::normalize(raw) {
            Ok(token) => self.slot.try_set(token),
            Err(e) => {
                log::warn!("Manual credential supply rejected: {}", e);
                false
            }
        }
    }

    /// Suspends until a credential is available via either path.
    pub async fn wait(&self) -> BearerToken {
        self.slot.wait().await
    }

    #[allow(dead_code)] // Public API - used by library consumers
    pub fn credential(&self) -> Option<BearerToken> {
        self.slot.get()
    }

    #[allow(dead_code)] // Public API - used by library consumers
    pub fn is_resolved(&self) -> bool {
        self.slot.is_resolved()
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

/// The observation tap around a wrapped dispatcher.
pub struct TappedDispatch<D> {
    inner: D,
    slot: Arc<CredentialSlot>,
}

impl<D> TappedDispatch<D> {
    /// The wrapped facility.
    #[allow(dead_code)] // Public API - used by library consumers
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Header inspection, synchronous and infallible. Unsupported shapes or
    /// a missing Authorization entry change nothing — the slot keeps
    /// waiting for a later request or a manual supply.
    fn observe(&self, options: &RequestOptions) {
        if self.slot.is_resolved() {
            return;
        }

        let Some(value) = options.headers.as_ref().and_then(HeaderShape::find_authorization)
        else {
            return;
        };

        match BearerToken::normalize(&value) {
            Ok(token) => {
                if self.slot.try_set(token) {
                    log::info!("Captured Authorization header from an outgoing request");
                }
            }
            Err(e) => log::debug!("Ignored unusable Authorization header: {}", e),
        }
    }
}

#[async_trait::async_trait]
impl<D: HttpDispatch> HttpDispatch for TappedDispatch<D> {
    async fn dispatch(
        &self,
        target: &str,
        options: RequestOptions,
    ) -> Result<DispatchResponse, AppError> {
        // Inspect before the forward; the tap adds no suspension of its own
        self.observe(&options);
        self.inner.dispatch(target, options).await
    }
}

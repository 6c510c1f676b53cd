//! Standalone error types for poolkit-memory
//!
//! Every failure is a distinct, non-fatal variant; nothing in the allocator
//! panics on caller misuse.

use thiserror::Error;

use crate::core::Location;

// ============================================================================
// Main Error Types
// ============================================================================

/// Pool allocator errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemoryError {
    // --- Lifecycle Errors ---
    #[error("Pool already initialized (capacity: {capacity})")]
    AlreadyInitialized { capacity: usize },

    #[error("Pool used before init or after deinit: {operation}")]
    UninitializedUse { operation: &'static str },

    // --- Allocation Errors ---
    #[error("Pool exhausted: requested {requested} bytes, largest free block {largest_free}")]
    AllocationExhausted { requested: usize, largest_free: usize },

    #[error("Zero-sized allocation rejected")]
    ZeroSizedRequest,

    #[error("Descriptor metadata limit exceeded: {used} bytes needed, {limit} bytes allowed")]
    MetadataLimitExceeded { used: usize, limit: usize },

    // --- Handle Errors ---
    #[error("Invalid handle {location}: {reason}")]
    InvalidHandle {
        location: Location,
        reason: &'static str,
    },

    // --- Configuration Errors ---
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // --- System Errors ---
    #[error("Descriptor chain corrupted: {details}")]
    Corruption { details: String },
}

impl MemoryError {
    /// Check if error is retryable
    ///
    /// Only space shortages can succeed later, once other regions are freed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::AllocationExhausted { .. } | Self::MetadataLimitExceeded { .. }
        )
    }

    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized { .. } => "POOL:LIFECYCLE:ALREADY_INIT",
            Self::UninitializedUse { .. } => "POOL:LIFECYCLE:UNINIT",
            Self::AllocationExhausted { .. } => "POOL:ALLOC:EXHAUSTED",
            Self::ZeroSizedRequest => "POOL:ALLOC:ZERO_SIZE",
            Self::MetadataLimitExceeded { .. } => "POOL:ALLOC:METADATA",
            Self::InvalidHandle { .. } => "POOL:HANDLE:INVALID",
            Self::InvalidConfig { .. } => "POOL:CONFIG:INVALID",
            Self::Corruption { .. } => "POOL:SYSTEM:CORRUPTION",
        }
    }

    // ============================================================================
    // Convenience Constructors
    // ============================================================================

    /// Create already initialized error
    pub fn already_initialized(capacity: usize) -> Self {
        #[cfg(feature = "logging")]
        poolkit_log::warn!(capacity, "pool already initialized");
        Self::AlreadyInitialized { capacity }
    }

    /// Create uninitialized use error
    pub fn uninitialized(operation: &'static str) -> Self {
        Self::UninitializedUse { operation }
    }

    /// Create exhaustion error
    pub fn exhausted(requested: usize, largest_free: usize) -> Self {
        #[cfg(feature = "logging")]
        poolkit_log::warn!(requested, largest_free, "pool exhausted");
        Self::AllocationExhausted {
            requested,
            largest_free,
        }
    }

    /// Create metadata limit error
    pub fn metadata_limit(used: usize, limit: usize) -> Self {
        #[cfg(feature = "logging")]
        poolkit_log::warn!(used, limit, "descriptor metadata limit reached");
        Self::MetadataLimitExceeded { used, limit }
    }

    /// Create invalid handle error
    pub fn invalid_handle(location: Location, reason: &'static str) -> Self {
        #[cfg(feature = "logging")]
        poolkit_log::warn!(%location, reason, "invalid handle");
        Self::InvalidHandle { location, reason }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create corruption error
    pub fn corruption(details: impl Into<String>) -> Self {
        let details = details.into();
        #[cfg(feature = "logging")]
        poolkit_log::error!(%details, "descriptor chain corrupted");
        Self::Corruption { details }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result type for pool operations
pub type MemoryResult<T> = Result<T, MemoryError>;

// ============================================================================
// Tests
// ============================================================================

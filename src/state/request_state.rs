//! RequestState - Loading Tri-State Plus Error Variants

use crate::error::RemoteError;

/// Status of a store's remote operation
///
/// Exactly one value holds per store instance. Only `trigger` leaves `Init`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// Nothing requested yet, or the store was reset
    #[default]
    Init,
    /// A request is in flight
    Loading,
    /// The latest request returned at least one record
    Loaded,
    /// The latest request returned nothing, or a 404-equivalent
    NotFoundError,
    /// The latest request failed for any other reason
    GeneralError,
}

impl RequestState {
    /// Classify a remote failure
    pub fn from_error(error: &RemoteError) -> Self {
        if error.is_not_found() {
            RequestState::NotFoundError
        } else {
            RequestState::GeneralError
        }
    }

    /// Classify a successful response by its size
    pub fn from_len(len: usize) -> Self {
        if len == 0 {
            RequestState::NotFoundError
        } else {
            RequestState::Loaded
        }
    }

    pub fn is_init(&self) -> bool {
        matches!(self, Self::Init)
    }

    /// Check if currently loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if loaded successfully
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Check if in one of the error variants
    pub fn is_error(&self) -> bool {
        matches!(self, Self::NotFoundError | Self::GeneralError)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestState::Init => "init",
            RequestState::Loading => "loading",
            RequestState::Loaded => "loaded",
            RequestState::NotFoundError => "not-found",
            RequestState::GeneralError => "error",
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

use std::fmt;

/// Failures reported by the span buffer and the rasterize entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    /// Storage for the span buffer could not be reserved
    AllocationFailure { capacity: usize },
    /// A push was rejected because every slot is already filled
    CapacityExceeded { capacity: usize },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure { capacity } => {
                write!(f, "failed to allocate span buffer for {} rows", capacity)
            },
            Self::CapacityExceeded { capacity } => {
                write!(f, "span buffer full ({} rows)", capacity)
            },
        }
    }
}

impl std::error::Error for RasterError {}

//! Construction parameters for `ChainTable`.

use crate::error::TableError;
use crate::hash::DEFAULT_MULTIPLIER;

/// Bucket count used by `TableConfig::default()`.
pub const DEFAULT_CAPACITY: usize = 16;

/// Fixed-for-life table parameters. There is no resizing: the capacity
/// chosen here is the number of buckets until the table is dropped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    pub capacity: usize,
    pub multiplier: i32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl TableConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_multiplier(mut self, multiplier: i32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.capacity == 0 {
            return Err(TableError::InvalidArgument("capacity must be positive"));
        }
        if self.multiplier <= 0 || self.multiplier % 2 == 0 {
            return Err(TableError::InvalidArgument(
                "multiplier must be a positive odd integer",
            ));
        }
        Ok(())
    }
}

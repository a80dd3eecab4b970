//! Strongly-typed identifiers used across the domain.
//!
//! Both identifiers are stored as `i64`. Callers holding 32-bit ids widen
//! them through `From<i32>` before comparing, so membership checks never
//! mix integer widths.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a batch (assigned by the store, immutable).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(i64);

/// Identifier of an employee (profile data lives in the directory).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<i32> for $t {
            fn from(value: i32) -> Self {
                Self(i64::from(value))
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::validation(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(BatchId, "BatchId");
impl_int_newtype!(EmployeeId, "EmployeeId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_and_wide_ids_compare_equal() {
        assert_eq!(EmployeeId::from(7_i32), EmployeeId::from(7_i64));
    }

    #[test]
    fn parses_from_path_segment() {
        let id: BatchId = "42".parse().unwrap();
        assert_eq!(id.get(), 42);
        assert!("forty-two".parse::<BatchId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&EmployeeId::new(101)).unwrap();
        assert_eq!(json, "101");
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Field level validation of decoded payloads.
//!
//! Every numeric field of a pattern item is checked in two tiers:
//!
//! 1. against the `spec` of the same item when the candidate is a `mask` or `last`
//!    ([`check_field`]): a field cannot be constrained unless `spec` sets it, and the upper bound
//!    of a range cannot be below its lower bound.
//! 2. against the bit width of the protocol field ([`check_width_u8`], [`check_width_u16`]),
//!    whatever the role of the candidate.
//!
//! Action configurations have no `mask` or `last`; they are validated in the [`Role::Spec`] role
//! against themselves, so only the second tier applies.

use std::fmt::Display;

/// The role of a payload within a pattern item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Spec,
    Last,
    Mask,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::Spec => "spec",
            Role::Last => "last",
            Role::Mask => "mask",
        })
    }
}

/// A field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("spec.{field} must be specified when {role}.{field} is set")]
    SpecMissing { field: &'static str, role: Role },
    #[error("last.{field} ({last}) must not be lower than spec.{field} ({spec})")]
    LastBelowSpec {
        field: &'static str,
        spec: u64,
        last: u64,
    },
    #[error("{field} must be in 0-{max} range, got {value}")]
    OutOfRange {
        field: &'static str,
        max: u64,
        value: u64,
    },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("payload shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Field validation of a wire shape.
pub trait FieldCheck {
    /// False for shapes which decode but whose fields are not validated.
    const STRICT: bool = true;

    /// Validate `self`, used in `role`, against the `spec` of the same item.
    ///
    /// When `role` is [`Role::Spec`], `spec` is `self`.
    ///
    /// # Errors
    ///
    /// Returns the first constraint which does not hold.
    fn validate(&self, spec: &Self, role: Role) -> Result<(), FieldError>;
}

/// Cross check one field of a `mask` or `last` candidate against `spec`.
///
/// # Errors
///
/// * [`FieldError::SpecMissing`] if the candidate sets a field `spec` leaves at 0,
/// * [`FieldError::LastBelowSpec`] if a `last` value is lower than `spec`.
pub fn check_field<T: Into<u64>>(
    field: &'static str,
    spec: T,
    candidate: T,
    role: Role,
) -> Result<(), FieldError> {
    let (spec, candidate) = (spec.into(), candidate.into());
    if role == Role::Spec {
        return Ok(());
    }
    if spec == 0 && candidate != 0 {
        return Err(FieldError::SpecMissing { field, role });
    }
    if role == Role::Last && candidate < spec {
        return Err(FieldError::LastBelowSpec {
            field,
            spec,
            last: candidate,
        });
    }
    Ok(())
}

/// Check `value` against an arbitrary upper bound.
///
/// # Errors
///
/// [`FieldError::OutOfRange`] if `value > max`.
pub fn check_max<T: Into<u64>>(field: &'static str, value: T, max: T) -> Result<(), FieldError> {
    let (value, max) = (value.into(), max.into());
    if value > max {
        return Err(FieldError::OutOfRange { field, max, value });
    }
    Ok(())
}

/// Width check of an 8 bit field.
///
/// # Errors
///
/// [`FieldError::OutOfRange`] above 255.
pub fn check_width_u8(field: &'static str, value: u32) -> Result<(), FieldError> {
    check_max(field, value, u32::from(u8::MAX))
}

/// Width check of a 16 bit field.
///
/// # Errors
///
/// [`FieldError::OutOfRange`] above 65535.
pub fn check_width_u16(field: &'static str, value: u32) -> Result<(), FieldError> {
    check_max(field, value, u32::from(u16::MAX))
}

/// Both tiers for an 8 bit field.
pub(crate) fn check_u8(
    field: &'static str,
    spec: u32,
    candidate: u32,
    role: Role,
) -> Result<(), FieldError> {
    check_field(field, spec, candidate, role)?;
    check_width_u8(field, candidate)
}

/// Both tiers for a 16 bit field.
pub(crate) fn check_u16(
    field: &'static str,
    spec: u32,
    candidate: u32,
    role: Role,
) -> Result<(), FieldError> {
    check_field(field, spec, candidate, role)?;
    check_width_u16(field, candidate)
}

/// Shapes which decode but whose fields are not validated.
macro_rules! unvalidated {
    ($($wire:ty),+ $(,)?) => {
        $(
            impl $crate::field::FieldCheck for $wire {
                const STRICT: bool = false;

                fn validate(
                    &self,
                    _spec: &Self,
                    _role: $crate::field::Role,
                ) -> Result<(), $crate::field::FieldError> {
                    Ok(())
                }
            }
        )+
    };
}

mod action;
mod item;

//! The module contains the error the engine can throw.
//!
//! Validation failures (bad or missing input) are:
//!
//! - [`InvalidName`] a group or member name is blank.
//! - [`InvalidAmount`] an amount or share is not a positive two-decimal value.
//! - [`InvalidPayer`] the payer is not a member of the expense's group.
//! - [`InvalidSplit`] explicit shares reference unknown members or do not add up.
//! - [`NoMembers`] the group has nobody to split an expense with.
//!
//! [`KeyNotFound`] is thrown when a referenced group does not exist, while
//! [`Inconsistent`] and [`Database`] are storage side failures.
//!
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidPayer`]: EngineError::InvalidPayer
//!  [`InvalidSplit`]: EngineError::InvalidSplit
//!  [`NoMembers`]: EngineError::NoMembers
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Inconsistent`]: EngineError::Inconsistent
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid payer: {0}")]
    InvalidPayer(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("No members in group {0}")]
    NoMembers(i64),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Inconsistent data: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` for errors caused by the caller's input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName(_)
                | Self::InvalidAmount(_)
                | Self::InvalidPayer(_)
                | Self::InvalidSplit(_)
                | Self::NoMembers(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidPayer(a), Self::InvalidPayer(b)) => a == b,
            (Self::InvalidSplit(a), Self::InvalidSplit(b)) => a == b,
            (Self::NoMembers(a), Self::NoMembers(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Inconsistent(a), Self::Inconsistent(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

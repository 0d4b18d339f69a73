//! User domain
//!
//! This module provides the user record, the ordered field-rule chain that
//! guards it, and the repository trait storage backends implement.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserCandidate, UserId, UserPatch, ValidUser, ValidUserPatch};
pub use repository::UserRepository;
pub use validation::{
    validate_user, validate_user_patch, FieldError, MAX_AGE, MIN_AGE, MIN_NAME_LENGTH,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;

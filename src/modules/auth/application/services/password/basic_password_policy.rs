use crate::auth::application::ports::incoming::password_policy::{
    PasswordPolicy, PasswordPolicyError,
};

pub const MIN_PASSWORD_CHARS: usize = 12;
pub const MAX_PASSWORD_CHARS: usize = 128;

/// Length-only policy, counted in characters rather than bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicPasswordPolicy;

impl PasswordPolicy for BasicPasswordPolicy {
    fn validate(&self, password: &str) -> Result<(), PasswordPolicyError> {
        let len = password.chars().count();

        if len < MIN_PASSWORD_CHARS {
            return Err(PasswordPolicyError::TooShort(MIN_PASSWORD_CHARS));
        }

        if len > MAX_PASSWORD_CHARS {
            return Err(PasswordPolicyError::TooLong(MAX_PASSWORD_CHARS));
        }

        Ok(())
    }
}

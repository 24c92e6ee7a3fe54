//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::store::CODE_LENGTH;

/// Validates that a game code is exactly 6 alphanumeric characters.
///
/// Case is not checked here: codes are uppercased during normalization, so
/// `ab12cd` and `AB12CD` address the same session.
///
/// # Examples
///
/// ```ignore
/// validate_game_code("AB12CD") // Ok
/// validate_game_code("ab12cd") // Ok - normalized later
/// validate_game_code("AB12C")  // Err - too short
/// validate_game_code("AB 2CD") // Err - whitespace
/// ```
pub fn validate_game_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != CODE_LENGTH {
        let mut err = ValidationError::new("game_code_length");
        err.message = Some(
            format!(
                "Game code must be exactly {CODE_LENGTH} characters (got {})",
                code.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("game_code_format");
        err.message = Some("Game code must contain only letters and digits".into());
        return Err(err);
    }

    Ok(())
}

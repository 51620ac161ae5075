//! Project field validation.

use crate::error::CoreError;
use crate::palette;

/// Maximum length of a project name, matching the form's character counter.
pub const MAX_PROJECT_NAME_LENGTH: usize = 120;

/// Validate a project name: required, non-empty, at most
/// [`MAX_PROJECT_NAME_LENGTH`] characters.
pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    let len = name.chars().count();
    if len > MAX_PROJECT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project name has {len} characters, maximum is {MAX_PROJECT_NAME_LENGTH}"
        )));
    }
    Ok(())
}

/// Validate the full set of user-writable project fields.
pub fn validate_project_fields(name: &str, color_name: &str, color_hex: &str) -> Result<(), CoreError> {
    validate_project_name(name)?;
    palette::validate_color_pair(color_name, color_hex)
}

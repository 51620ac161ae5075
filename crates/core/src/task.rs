//! Task field validation.

use crate::error::CoreError;

/// Validate task content: required, non-empty after trimming.
pub fn validate_task_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Task content must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_content_passes() {
        assert!(validate_task_content("Buy milk").is_ok());
    }

    #[test]
    fn empty_content_fails() {
        assert!(validate_task_content("").is_err());
    }

    #[test]
    fn whitespace_only_content_fails() {
        assert!(validate_task_content("   \t ").is_err());
    }
}

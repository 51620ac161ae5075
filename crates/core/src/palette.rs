//! Fixed color palette for projects.
//!
//! Every project carries a `color_name` + `color_hex` pair; the pair must
//! come from this palette, and the two fields are always set together.

use crate::error::CoreError;
use serde::Serialize;

/// A palette entry: human-readable name plus `#RRGGBB` hex value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// Default color applied when a project form offers no explicit choice.
pub const DEFAULT_PROJECT_COLOR: ProjectColor = ProjectColor {
    name: "Slate",
    hex: "#64748b",
};

/// The full palette offered by the project form.
pub const PROJECT_COLORS: &[ProjectColor] = &[
    ProjectColor { name: "Slate", hex: "#64748b" },
    ProjectColor { name: "Gray", hex: "#6b7280" },
    ProjectColor { name: "Zinc", hex: "#71717a" },
    ProjectColor { name: "Neutral", hex: "#737373" },
    ProjectColor { name: "Stone", hex: "#78716c" },
    ProjectColor { name: "Red", hex: "#ef4444" },
    ProjectColor { name: "Orange", hex: "#f97316" },
    ProjectColor { name: "Amber", hex: "#f59e0b" },
    ProjectColor { name: "Yellow", hex: "#eab308" },
    ProjectColor { name: "Lime", hex: "#84cc16" },
    ProjectColor { name: "Green", hex: "#22c55e" },
    ProjectColor { name: "Emerald", hex: "#10b981" },
    ProjectColor { name: "Teal", hex: "#14b8a6" },
    ProjectColor { name: "Cyan", hex: "#06b6d4" },
    ProjectColor { name: "Sky", hex: "#0ea5e9" },
    ProjectColor { name: "Blue", hex: "#3b82f6" },
    ProjectColor { name: "Indigo", hex: "#6366f1" },
    ProjectColor { name: "Violet", hex: "#8b5cf6" },
    ProjectColor { name: "Purple", hex: "#a855f7" },
    ProjectColor { name: "Fuchsia", hex: "#d946ef" },
    ProjectColor { name: "Pink", hex: "#ec4899" },
    ProjectColor { name: "Rose", hex: "#f43f5e" },
];

/// Look up a palette entry by its name (case-sensitive).
pub fn find_color(name: &str) -> Option<&'static ProjectColor> {
    PROJECT_COLORS.iter().find(|c| c.name == name)
}

/// Validate that a color string matches `#RRGGBB` hex format.
pub fn validate_color_hex(color: &str) -> Result<(), CoreError> {
    if color.len() != 7 || !color.starts_with('#') {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must be in #RRGGBB hex format"
        )));
    }

    let hex_part = &color[1..];
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Must contain only hex digits after '#'"
        )));
    }

    Ok(())
}

/// Validate that `name` and `hex` form a palette pair.
///
/// The two fields are an invariant pair: both must be present and must
/// match the same palette entry.
pub fn validate_color_pair(name: &str, hex: &str) -> Result<(), CoreError> {
    validate_color_hex(hex)?;

    let entry = find_color(name).ok_or_else(|| {
        CoreError::Validation(format!("Unknown project color '{name}'"))
    })?;

    if !entry.hex.eq_ignore_ascii_case(hex) {
        return Err(CoreError::Validation(format!(
            "Color hex '{hex}' does not match palette entry '{name}' ({})",
            entry.hex
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_in_palette() {
        let entry = find_color(DEFAULT_PROJECT_COLOR.name).expect("Slate must be in the palette");
        assert_eq!(entry.hex, DEFAULT_PROJECT_COLOR.hex);
    }

    #[test]
    fn find_color_is_case_sensitive() {
        assert!(find_color("Red").is_some());
        assert!(find_color("red").is_none());
    }

    #[test]
    fn valid_pair_passes() {
        assert!(validate_color_pair("Red", "#ef4444").is_ok());
    }

    #[test]
    fn pair_hex_comparison_ignores_case() {
        assert!(validate_color_pair("Red", "#EF4444").is_ok());
    }

    #[test]
    fn mismatched_pair_fails() {
        let err = validate_color_pair("Red", "#3b82f6").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn unknown_name_fails() {
        let err = validate_color_pair("Vermilion", "#ef4444").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn bad_hex_format_fails() {
        assert!(validate_color_hex("ef4444").is_err());
        assert!(validate_color_hex("#ef44").is_err());
        assert!(validate_color_hex("#ef444z").is_err());
        assert!(validate_color_hex("#ef4444ff").is_err());
    }
}

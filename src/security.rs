use crate::errors::InvalidConfigError;
use crate::writer::NUMBER_PLACEHOLDER;

/// Checks that a suffix template yields a single, distinct file name per
/// chunk: it must contain the numbering placeholder and must not contain path
/// separators, control characters or traversal components.
pub fn validate_suffix_template(template: &str) -> Result<(), InvalidConfigError> {
    if !template.contains(NUMBER_PLACEHOLDER) {
        return Err(InvalidConfigError::new(format!(
            "suffix template '{template}' must contain the {NUMBER_PLACEHOLDER} placeholder"
        ))
        .with_field("suffix_template"));
    }
    validate_filename_component("suffix_template", template)
}

/// Rejects values that would escape the output directory when joined onto it.
pub fn validate_filename_component(
    field: &'static str,
    value: &str,
) -> Result<(), InvalidConfigError> {
    if value.chars().any(|c| c.is_control()) {
        return Err(
            InvalidConfigError::new(format!("{field} must not contain control characters"))
                .with_field(field),
        );
    }
    if value.contains(['/', '\\']) {
        return Err(
            InvalidConfigError::new(format!("{field} must not contain path separators"))
                .with_field(field),
        );
    }
    if value == "." || value == ".." {
        return Err(
            InvalidConfigError::new(format!("{field} must not be a relative path component"))
                .with_field(field),
        );
    }
    Ok(())
}

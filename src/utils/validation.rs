use crate::utils::error::{Result, ToolError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ToolError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("todo.file", "todos.txt").is_ok());
        assert!(validate_path("todo.file", "").is_err());
        assert!(validate_path("todo.file", "bad\0name").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("ports.timeout_secs", 0.5).is_ok());
        assert!(validate_positive("ports.timeout_secs", 0.0).is_err());
        assert!(validate_positive("ports.timeout_secs", -1.0).is_err());
        assert!(validate_positive("ports.timeout_secs", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("ports.start", 8000u32, 1, 65535).is_ok());
        assert!(validate_range("ports.start", 0u32, 1, 65535).is_err());
        assert!(validate_range("ports.end", 70000u32, 1, 65535).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("web.bind", "127.0.0.1:5000").is_ok());
        assert!(validate_non_empty_string("web.bind", "   ").is_err());
    }
}

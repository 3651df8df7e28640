//! Field-level checks shared by the request forms.

pub fn required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("This field is required.".to_string())
    } else {
        Ok(())
    }
}

pub fn length(value: &str, min: usize, max: usize) -> Result<(), String> {
    let count = value.chars().count();
    if count < min || count > max {
        Err(format!(
            "Field must be between {min} and {max} characters long."
        ))
    } else {
        Ok(())
    }
}

pub fn max_length(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("Field cannot be longer than {max} characters."))
    } else {
        Ok(())
    }
}

/// Shape check only, not RFC-grade parsing: one `@`, a non-empty local
/// part and a dotted domain.
pub fn email_shape(value: &str) -> Result<(), String> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err("Invalid email address.".to_string())
    }
}

pub fn equal_to(value: &str, other: &str, other_name: &str) -> Result<(), String> {
    if value == other {
        Ok(())
    } else {
        Err(format!("Field must be equal to {other_name}."))
    }
}

pub fn allowed_extension(filename: &str, allowed: &[&str]) -> Result<(), String> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(format!(
            "File does not have an approved extension: {}",
            allowed.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_input() {
        assert!(required("alice").is_ok());
        assert!(required("").is_err());
        assert!(required("   ").is_err());
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(length("ab", 2, 20).is_ok());
        assert!(length(&"x".repeat(20), 2, 20).is_ok());
        assert!(length("a", 2, 20).is_err());
        assert!(length(&"x".repeat(21), 2, 20).is_err());
    }

    #[test]
    fn email_shape_requires_local_part_and_dotted_domain() {
        assert!(email_shape("a@x.com").is_ok());
        assert!(email_shape("not-an-email").is_err());
        assert!(email_shape("@x.com").is_err());
        assert!(email_shape("a@nodot").is_err());
        assert!(email_shape("a@.com").is_err());
    }

    #[test]
    fn equal_to_compares_exactly() {
        assert!(equal_to("pw", "pw", "password").is_ok());
        let err = equal_to("pw", "other", "password").unwrap_err();
        assert_eq!(err, "Field must be equal to password.");
    }

    #[test]
    fn allowed_extension_is_case_insensitive_and_exact() {
        let allowed = &["jpg", "png"];
        assert!(allowed_extension("me.jpg", allowed).is_ok());
        assert!(allowed_extension("me.PNG", allowed).is_ok());
        assert!(allowed_extension("me.gif", allowed).is_err());
        assert!(allowed_extension("me.jpeg", allowed).is_err());
        assert!(allowed_extension("no-extension", allowed).is_err());
    }
}

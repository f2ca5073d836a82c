use crate::error::ValidationErrors;

/// A required string field with a length range counted in characters.
///
/// A missing or blank value reports `mandatory`. A present value outside
/// `min..=max` also reports `length`.
pub struct TextField {
    pub mandatory: &'static str,
    pub length: &'static str,
    pub min: usize,
    pub max: usize,
}

impl TextField {
    pub fn check(&self, value: Option<String>, errors: &mut ValidationErrors) -> String {
        let Some(value) = value else {
            errors.push(self.mandatory);
            return String::new();
        };
        if value.trim().is_empty() {
            errors.push(self.mandatory);
        }
        let length = value.chars().count();
        if length < self.min || length > self.max {
            errors.push(self.length);
        }
        value
    }
}

pub const INVALID_EMAIL: &str = "must be a well-formed email address";

/// Empty input is left to the mandatory check.
pub fn is_email_shaped(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !value.chars().any(char::is_whitespace)
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

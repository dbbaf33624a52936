//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a team name is non-blank once trimmed and reasonably short.
pub fn validate_team_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("team_name_blank");
        err.message = Some("Team name must not be blank".into());
        return Err(err);
    }

    if trimmed.len() > 64 {
        let mut err = ValidationError::new("team_name_length");
        err.message = Some(format!("Team name must be at most 64 characters (got {})", trimmed.len()).into());
        return Err(err);
    }

    Ok(())
}

/// Validates that every member identifier in the list is non-blank.
pub fn validate_members(members: &[String]) -> Result<(), ValidationError> {
    if members.is_empty() {
        let mut err = ValidationError::new("members_empty");
        err.message = Some("At least one member is required".into());
        return Err(err);
    }

    if members.iter().any(|member| member.trim().is_empty()) {
        let mut err = ValidationError::new("member_blank");
        err.message = Some("Member names must not be blank".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_team_names() {
        assert!(validate_team_name("The Seekers").is_ok());
        assert!(validate_team_name("  padded  ").is_ok());
    }

    #[test]
    fn rejects_blank_or_oversized_team_names() {
        assert!(validate_team_name("").is_err());
        assert!(validate_team_name("   ").is_err());
        assert!(validate_team_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn rejects_empty_or_blank_member_lists() {
        assert!(validate_members(&[]).is_err());
        assert!(validate_members(&["a".to_owned(), " ".to_owned()]).is_err());
        assert!(validate_members(&["a".to_owned(), "b".to_owned()]).is_ok());
    }
}

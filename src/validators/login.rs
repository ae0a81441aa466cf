use super::ValidationError;
use crate::api::staff::LoginRequest;

pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 30;

/// Same limits the backend applies to the login form.
pub struct LoginFormValidator;

impl LoginFormValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, req: &LoginRequest) -> Result<(), ValidationError> {
        // V008: Missing account
        if req.account.trim().is_empty() {
            return Err(ValidationError::new("V008", "account", "Account cannot be empty")
                .with_suggestion("Enter the account issued by your administrator"));
        }

        // V009: Password length
        let len = req.password.chars().count();
        if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len) {
            return Err(ValidationError::new(
                "V009",
                "password",
                format!(
                    "Password must be {}-{} characters (got {})",
                    PASSWORD_MIN_CHARS, PASSWORD_MAX_CHARS, len
                ),
            ));
        }

        Ok(())
    }
}

impl Default for LoginFormValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(account: &str, password: &str) -> LoginRequest {
        LoginRequest { account: account.to_string(), password: password.to_string() }
    }

    #[test]
    fn test_valid_login_form() {
        let v = LoginFormValidator::new();
        assert!(v.validate(&req("zhang", "123456")).is_ok());
        assert!(v.validate(&req("zhang", &"x".repeat(30))).is_ok());
    }

    #[test]
    fn test_empty_account() {
        let err = LoginFormValidator::new().validate(&req("  ", "123456")).unwrap_err();
        assert_eq!(err.code, "V008");
        assert_eq!(err.field, "account");
    }

    #[test]
    fn test_password_length_bounds() {
        let v = LoginFormValidator::new();
        assert_eq!(v.validate(&req("zhang", "12345")).unwrap_err().code, "V009");
        assert_eq!(v.validate(&req("zhang", &"x".repeat(31))).unwrap_err().code, "V009");
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Six CJK characters are 18 bytes but still six characters.
        assert!(LoginFormValidator::new().validate(&req("zhang", "密码密码密码")).is_ok());
    }
}

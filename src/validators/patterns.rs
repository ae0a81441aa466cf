//! Field patterns used by the client, order and staff forms.

use regex::Regex;
use std::sync::LazyLock;

use super::{ValidationError, Validator};

/// Mainland mobile number.
static TELEPHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^1[3-9][0-9]{9}$").expect("Invalid regex")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("Invalid regex")
});

static ORDER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]{6,20}$").expect("Invalid regex")
});

/// CJK (including Extension A for rare characters) plus the middle dots
/// used in transliterated and minority names.
static CHINESE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{3400}-\x{9fa5}·•]{2,15}$").expect("Invalid regex")
});

/// 18-digit resident ID: region, birth date, sequence, check digit.
static ID_CARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[1-9][0-9]{5}(18|19|20)[0-9]{2}((0[1-9])|(10|11|12))(([0-2][1-9])|10|20|30|31)[0-9]{3}[0-9Xx]$",
    )
    .expect("Invalid regex")
});

static BANK_CARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9][0-9]{15,18}$").expect("Invalid regex")
});

pub struct PatternValidator {
    field: &'static str,
    code: &'static str,
    pattern: &'static LazyLock<Regex>,
    message: &'static str,
    suggestion: &'static str,
}

impl PatternValidator {
    pub fn telephone() -> Self {
        Self {
            field: "telphone",
            code: "V002",
            pattern: &TELEPHONE,
            message: "Invalid mobile number",
            suggestion: "Use an 11-digit number starting with 13-19, e.g. 13812345678",
        }
    }

    pub fn email() -> Self {
        Self {
            field: "email",
            code: "V003",
            pattern: &EMAIL,
            message: "Invalid e-mail address",
            suggestion: "Use the form name@example.com",
        }
    }

    pub fn order_id() -> Self {
        Self {
            field: "order_id",
            code: "V004",
            pattern: &ORDER_ID,
            message: "Invalid order number",
            suggestion: "Use 6 to 20 letters or digits",
        }
    }

    pub fn chinese_name() -> Self {
        Self {
            field: "name",
            code: "V005",
            pattern: &CHINESE_NAME,
            message: "Invalid Chinese name",
            suggestion: "Use 2 to 15 Chinese characters; · may separate name parts",
        }
    }

    pub fn id_card() -> Self {
        Self {
            field: "id_card",
            code: "V006",
            pattern: &ID_CARD,
            message: "Invalid ID card number",
            suggestion: "Use the 18-character resident ID number",
        }
    }

    pub fn bank_card() -> Self {
        Self {
            field: "bank_card",
            code: "V007",
            pattern: &BANK_CARD,
            message: "Invalid bank card number",
            suggestion: "Use 16 to 19 digits without spaces",
        }
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }
}

impl Validator for PatternValidator {
    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let s = input.trim();

        // V001: Empty field
        if s.is_empty() {
            return Err(ValidationError::new("V001", self.field, format!("{} cannot be empty", self.field)));
        }

        if !self.is_match(s) {
            return Err(ValidationError::new(self.code, self.field, self.message)
                .with_suggestion(self.suggestion));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telephone() {
        let v = PatternValidator::telephone();
        assert!(v.validate("13812345678").is_ok());
        assert!(v.validate(" 19912345678 ").is_ok());
        assert_eq!(v.validate("12812345678").unwrap_err().code, "V002");
        assert_eq!(v.validate("1381234567").unwrap_err().code, "V002");
        assert_eq!(v.validate("").unwrap_err().code, "V001");
    }

    #[test]
    fn test_telephone_rejects_non_ascii_digits() {
        assert!(!PatternValidator::telephone().is_match("1３812345678"));
    }

    #[test]
    fn test_email() {
        let v = PatternValidator::email();
        assert!(v.validate("zhang.san@example.com").is_ok());
        assert!(v.validate("a@[192.168.1.1]").is_ok());
        assert!(v.validate("\"odd name\"@example.cn").is_ok());
        assert_eq!(v.validate("no-at-sign.example.com").unwrap_err().code, "V003");
        assert!(v.validate("a@example").is_err());
        assert!(v.validate("a..b@example.com").is_err());
    }

    #[test]
    fn test_order_id() {
        let v = PatternValidator::order_id();
        assert!(v.validate("AB1234").is_ok());
        assert!(v.validate("A1B2C3D4E5F6G7H8I9J0").is_ok());
        assert!(v.validate("AB123").is_err());
        assert!(v.validate("AB-1234").is_err());
    }

    #[test]
    fn test_chinese_name() {
        let v = PatternValidator::chinese_name();
        assert!(v.validate("张三").is_ok());
        assert!(v.validate("阿卜杜拉·买买提").is_ok());
        assert!(v.validate("张").is_err());
        assert!(v.validate("Zhang San").is_err());
    }

    #[test]
    fn test_id_card() {
        let v = PatternValidator::id_card();
        assert!(v.validate("11010519491231002X").is_ok());
        assert!(v.validate("440524188001010014").is_ok());
        assert!(v.validate("110105194913310021").is_err()); // month 13
        assert!(v.validate("11010517491231002X").is_err()); // century 17
        assert!(v.validate("01010519491231002X").is_err());
    }

    #[test]
    fn test_bank_card() {
        let v = PatternValidator::bank_card();
        assert!(v.validate("6222021234567890").is_ok());
        assert!(v.validate("6222021234567890123").is_ok());
        assert!(v.validate("622202123456789").is_err());
        assert!(v.validate("0222021234567890").is_err());
    }
}

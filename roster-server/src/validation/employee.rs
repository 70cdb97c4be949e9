use validator::ValidateEmail;

use super::Checker;

pub(super) const REQUIRED: &[&str] = &["name", "email", "phone", "salary", "department", "position"];

const TEXT_FIELDS: &[&str] = &[
    "name",
    "phone",
    "department",
    "position",
    "address",
    "city",
    "country",
    "role",
    "avatar",
];

pub(super) fn check_formats(checker: &mut Checker<'_>) {
    checker.strings(TEXT_FIELDS);

    if let Some(email) = checker.string("email")
        && !email.trim().is_empty()
        && !is_valid_email(email)
    {
        checker.push("email must be a valid email address");
    }

    if let Some(salary) = checker.get("salary")
        && !salary.as_f64().is_some_and(|s| s >= 0.0)
    {
        checker.push("salary must be a non-negative number");
    }

    checker.date("dateOfBirth");
}

/// `local@domain.tld`
fn is_valid_email(email: &str) -> bool {
    email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.') && !domain.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Mode, RecordKind, validate};
    use serde_json::json;

    fn valid_employee() -> serde_json::Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0000",
            "salary": 5200,
            "department": "Engineering",
            "position": "Analyst"
        })
    }

    #[test]
    fn test_valid_employee() {
        assert!(validate(RecordKind::Employee, &valid_employee(), Mode::Create).is_empty());
    }

    #[test]
    fn test_zero_salary_is_present() {
        let mut record = valid_employee();
        record["salary"] = json!(0);
        assert!(validate(RecordKind::Employee, &record, Mode::Create).is_empty());
    }

    #[test]
    fn test_missing_required_fields_are_listed() {
        let errors = validate(
            RecordKind::Employee,
            &json!({"name": "", "email": null, "salary": 10}),
            Mode::Create,
        );
        assert_eq!(
            errors,
            vec![
                "name is required",
                "email is required",
                "phone is required",
                "department is required",
                "position is required",
            ]
        );
    }

    #[test]
    fn test_format_errors() {
        let mut record = valid_employee();
        record["email"] = json!("ada@localhost");
        record["salary"] = json!(-5);
        record["phone"] = json!(12345);
        record["dateOfBirth"] = json!("31/12/1990");

        let errors = validate(RecordKind::Employee, &record, Mode::Create);
        assert!(errors.contains(&"email must be a valid email address".to_string()));
        assert!(errors.contains(&"salary must be a non-negative number".to_string()));
        assert!(errors.contains(&"phone must be a string".to_string()));
        assert!(errors.contains(&"dateOfBirth must be a valid date".to_string()));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_salary_must_be_numeric() {
        let mut record = valid_employee();
        record["salary"] = json!("5200");
        let errors = validate(RecordKind::Employee, &record, Mode::Create);
        assert_eq!(errors, vec!["salary must be a non-negative number"]);
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(!is_valid_email("ada@localhost"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada@example."));
    }

    #[test]
    fn test_partial_update_checks_present_fields_only() {
        let errors = validate(
            RecordKind::Employee,
            &json!({"salary": 6000, "city": "Paris"}),
            Mode::Partial,
        );
        assert!(errors.is_empty());

        let errors = validate(RecordKind::Employee, &json!({"email": "nope"}), Mode::Partial);
        assert_eq!(errors, vec!["email must be a valid email address"]);
    }
}

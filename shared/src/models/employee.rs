//! Employee Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::serde_helpers;
use crate::response::PageMeta;

/// Default role assigned to new employees
pub const DEFAULT_EMPLOYEE_ROLE: &str = "employee";

fn default_role() -> String {
    DEFAULT_EMPLOYEE_ROLE.to_string()
}

/// Employee as returned by the API (bookkeeping fields stripped)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Integral salaries stay integers on the wire
    pub salary: Number,
    pub department: String,
    pub position: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_calendar_date"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub avatar: String,
}

/// Create employee payload (validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub salary: Number,
    pub department: String,
    pub position: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_calendar_date"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub avatar: String,
}

/// Update employee payload (partial merge, validated)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_calendar_date"
    )]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// One page of the filtered employee listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub pagination: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_applies_defaults() {
        let create: EmployeeCreate = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "phone": "555-0100",
            "salary": 0,
            "department": "Engineering",
            "position": "Engineer"
        }))
        .unwrap();

        assert_eq!(create.role, "employee");
        assert_eq!(create.avatar, "");
        assert_eq!(create.salary, Number::from(0));
        assert!(create.date_of_birth.is_none());
    }

    #[test]
    fn test_employee_serializes_camel_case_without_empty_optionals() {
        let employee = Employee {
            id: "0123456789abcdef0123456789abcdef".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            salary: Number::from_f64(1200.5).unwrap(),
            department: "Engineering".into(),
            position: "Engineer".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10),
            address: None,
            city: Some("London".into()),
            country: None,
            role: "employee".into(),
            avatar: String::new(),
        };

        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["dateOfBirth"], "1990-12-10");
        assert_eq!(json["city"], "London");
        assert!(json.get("address").is_none());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json["salary"], json!(1200.5));
    }

    #[test]
    fn test_integral_salary_stays_integer() {
        let update: EmployeeUpdate = serde_json::from_value(json!({ "salary": 52000 })).unwrap();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["salary"].to_string(), "52000");
        assert!(json["salary"].is_u64());
    }
}

use shared::models::{TaskImportance, TaskStatus};
use shared::util::is_valid_record_id;

use super::Checker;

pub(super) const REQUIRED: &[&str] = &["title", "description", "employeeId"];

pub(super) fn check_formats(checker: &mut Checker<'_>) {
    checker.strings(&["title", "description"]);

    if let Some(employee_id) = checker.string("employeeId")
        && !employee_id.trim().is_empty()
        && !is_valid_record_id(employee_id)
    {
        checker.push("employeeId must be a valid ID");
    }

    let statuses: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.as_str()).collect();
    checker.one_of("status", &statuses);

    let importances: Vec<&str> = TaskImportance::ALL.iter().map(|i| i.as_str()).collect();
    checker.one_of("importance", &importances);

    checker.boolean("scheduled");
    checker.date("day");
    checker.integer_at_least("slotCount", 1);
    checker.integer_at_least("startSlot", 0);
}

#[cfg(test)]
mod tests {
    use crate::validation::{Mode, RecordKind, validate};
    use serde_json::json;

    fn valid_task() -> serde_json::Value {
        json!({
            "title": "Inventory",
            "description": "Count stock in aisle 4",
            "employeeId": "0123456789abcdef0123456789abcdef"
        })
    }

    #[test]
    fn test_valid_task_with_defaults() {
        assert!(validate(RecordKind::Task, &valid_task(), Mode::Create).is_empty());
    }

    #[test]
    fn test_valid_task_with_all_fields() {
        let mut record = valid_task();
        record["status"] = json!("in-progress");
        record["importance"] = json!("high");
        record["scheduled"] = json!(false);
        record["day"] = json!("2024-02-10");
        record["slotCount"] = json!(2);
        record["startSlot"] = json!(0);
        assert!(validate(RecordKind::Task, &record, Mode::Create).is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let errors = validate(RecordKind::Task, &json!({"title": "Only title"}), Mode::Create);
        assert_eq!(
            errors,
            vec!["description is required", "employeeId is required"]
        );
    }

    #[test]
    fn test_enum_and_range_errors() {
        let mut record = valid_task();
        record["status"] = json!("done");
        record["importance"] = json!("urgent");
        record["scheduled"] = json!("yes");
        record["slotCount"] = json!(0);
        record["startSlot"] = json!(-1);
        record["day"] = json!("2024-02-30");
        record["employeeId"] = json!("emp-1");

        let errors = validate(RecordKind::Task, &record, Mode::Create);
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&"employeeId must be a valid ID".to_string()));
        assert!(errors.contains(
            &"status must be one of: pending, in-progress, completed, cancelled".to_string()
        ));
        assert!(errors.contains(&"importance must be one of: low, medium, high".to_string()));
        assert!(errors.contains(&"scheduled must be a boolean".to_string()));
        assert!(errors.contains(&"day must be a valid date".to_string()));
    }

    #[test]
    fn test_fractional_slot_count_rejected() {
        let mut record = valid_task();
        record["slotCount"] = json!(1.5);
        let errors = validate(RecordKind::Task, &record, Mode::Create);
        assert_eq!(
            errors,
            vec!["slotCount must be an integer greater than or equal to 1"]
        );
    }
}

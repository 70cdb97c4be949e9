//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::bulk::BulkInsert;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::new_record_id;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "employee";

/// Projection used by every read; sort keys must stay in it
const FIELDS: &str = "record::id(id) AS id, name, email, phone, salary, department, position, \
     dateOfBirth, address, city, country, role, avatar, createdAt, updatedAt";

/// Sortable columns for the paginated listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
    Salary,
    Department,
    Position,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Parse a `sortBy` value; unknown names fall back to `createdAt`
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("name") => SortField::Name,
            Some("email") => SortField::Email,
            Some("salary") => SortField::Salary,
            Some("department") => SortField::Department,
            Some("position") => SortField::Position,
            Some("updatedAt") => SortField::UpdatedAt,
            _ => SortField::CreatedAt,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Salary => "salary",
            SortField::Department => "department",
            SortField::Position => "position",
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse a `sortOrder` value; anything but `asc` is descending
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.to_ascii_lowercase()) {
            Some(v) if v == "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter and sort options for [`EmployeeRepository::find_filtered`]
#[derive(Debug, Clone, Default)]
pub struct EmployeeQuery {
    /// Case-insensitive substring over name, email, phone, department, position
    pub search: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl EmployeeQuery {
    fn to_sql(&self) -> String {
        let mut conditions = Vec::new();
        if self.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(name), $search) \
                 OR string::contains(string::lowercase(email), $search) \
                 OR string::contains(string::lowercase(phone), $search) \
                 OR string::contains(string::lowercase(department), $search) \
                 OR string::contains(string::lowercase(position), $search))",
            );
        }
        if self.department.is_some() {
            conditions.push("department = $department");
        }
        if self.position.is_some() {
            conditions.push("position = $position");
        }

        let mut sql = format!("SELECT {} FROM {}", FIELDS, TABLE);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(&format!(
            " ORDER BY {} {}",
            self.sort_by.column(),
            self.sort_order.keyword()
        ));
        sql
    }
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees in creation order
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query(format!("SELECT {} FROM {} ORDER BY createdAt ASC", FIELDS, TABLE))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employees matching `query`, sorted; returns one page and the total count
    pub async fn find_filtered(
        &self,
        query: &EmployeeQuery,
        skip: u64,
        limit: u64,
    ) -> RepoResult<(Vec<Employee>, u64)> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query(query.to_sql())
            .bind((
                "search",
                query.search.as_deref().unwrap_or_default().to_lowercase(),
            ))
            .bind(("department", query.department.clone().unwrap_or_default()))
            .bind(("position", query.position.clone().unwrap_or_default()))
            .await?
            .take(0)?;

        // LIMIT/START combined with WHERE and ORDER BY drops rows on the embedded
        // engine, so the page is cut here
        let total = employees.len() as u64;
        let page = employees
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();
        Ok((page, total))
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {} FROM $thing", FIELDS))
            .bind(("thing", BaseRepository::thing(TABLE, id)))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find employee by email (exact match)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {} FROM {} WHERE email = $email",
                FIELDS, TABLE
            ))
            .bind(("email", email_owned))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Whether another employee already uses `email`
    pub async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Insert without the email pre-check; the unique index still applies
    pub async fn insert(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let id = new_record_id();
        self.base.create_record(TABLE, &id, &data).await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Create a new employee
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        // Check duplicate email
        if self.email_exists(&data.email).await? {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }
        self.insert(data).await
    }

    /// Update an employee (partial merge)
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        // Check duplicate email if changing
        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.email_exists(new_email).await?
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                new_email
            )));
        }

        self.base.merge_record(TABLE, id, &data).await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Hard delete an employee
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;
        self.base.delete_record(TABLE, id).await?;
        Ok(true)
    }

    /// Delete every employee
    pub async fn delete_all(&self) -> RepoResult<()> {
        self.base.delete_all(TABLE).await
    }
}

impl BulkInsert for EmployeeRepository {
    type Create = EmployeeCreate;
    type Record = Employee;

    async fn is_duplicate(&self, item: &EmployeeCreate) -> RepoResult<bool> {
        self.email_exists(&item.email).await
    }

    async fn insert(&self, item: EmployeeCreate) -> RepoResult<Employee> {
        EmployeeRepository::insert(self, item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parsing() {
        assert_eq!(SortField::parse(Some("salary")), SortField::Salary);
        assert_eq!(SortField::parse(Some("revision")), SortField::CreatedAt);
        assert_eq!(SortField::parse(None), SortField::CreatedAt);
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Asc);
        assert_eq!(SortOrder::parse(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::parse(None), SortOrder::Desc);
    }

    #[test]
    fn test_query_sql() {
        let plain = EmployeeQuery::default().to_sql();
        assert!(!plain.contains("WHERE"));
        assert!(plain.ends_with("ORDER BY createdAt DESC"));

        let filtered = EmployeeQuery {
            search: Some("ada".into()),
            department: Some("Engineering".into()),
            sort_by: SortField::Name,
            sort_order: SortOrder::Asc,
            ..Default::default()
        }
        .to_sql();
        assert!(filtered.contains("$search"));
        assert!(filtered.contains("department = $department"));
        assert!(!filtered.contains("$position"));
        assert!(filtered.ends_with("ORDER BY name ASC"));
    }
}

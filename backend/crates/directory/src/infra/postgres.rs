//! PostgreSQL Repository Implementations
//!
//! The hierarchy tables carry no foreign keys: parent checks happen in the
//! application layer, and the delete policy decides what happens to children.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::email::Email;
use kernel::id::{CompanyId, DepartmentId, EmployeeId, PositionId, UserId};
use kernel::pagination::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    company::Company, department::Department, employee::Employee, position::Position,
};
use crate::domain::repository::{
    CompanyRepository, DepartmentRepository, EmployeeRepository, PositionFilter,
    PositionRepository,
};
use crate::error::DirectoryResult;

/// PostgreSQL-backed directory repository
#[derive(Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Company Repository Implementation
// ============================================================================

impl CompanyRepository for PgDirectoryRepository {
    async fn create(&self, company: &Company) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO companies (
                id,
                owner_id,
                name,
                address,
                phone,
                email,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(company.id.as_uuid())
        .bind(company.owner_id.as_uuid())
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.phone)
        .bind(company.email.as_str())
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CompanyId) -> DirectoryResult<Option<Company>> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, owner_id, name, address, phone, email, created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CompanyRow::into_company))
    }

    async fn update(&self, company: &Company) -> DirectoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE companies SET
                name = $2,
                address = $3,
                phone = $4,
                email = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(company.id.as_uuid())
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.phone)
        .bind(company.email.as_str())
        .bind(company.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &CompanyId) -> DirectoryResult<u64> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn has_dependents(&self, id: &CompanyId) -> DirectoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM departments WHERE company_id = $1)
                OR EXISTS(SELECT 1 FROM positions WHERE company_id = $1)
                OR EXISTS(SELECT 1 FROM employees WHERE company_id = $1)
            "#,
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Department Repository Implementation
// ============================================================================

impl DepartmentRepository for PgDirectoryRepository {
    async fn create(&self, department: &Department) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO departments (id, company_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(department.id.as_uuid())
        .bind(department.company_id.as_uuid())
        .bind(&department.name)
        .bind(department.created_at)
        .bind(department.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &DepartmentId) -> DirectoryResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, company_id, name, created_at, updated_at
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DepartmentRow::into_department))
    }

    async fn update(&self, department: &Department) -> DirectoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE departments SET
                company_id = $2,
                name = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(department.id.as_uuid())
        .bind(department.company_id.as_uuid())
        .bind(&department.name)
        .bind(department.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &DepartmentId) -> DirectoryResult<u64> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, company_id, name, created_at, updated_at
            FROM departments
            WHERE company_id = $1
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DepartmentRow::into_department).collect())
    }

    async fn count_by_company(&self, company_id: &CompanyId) -> DirectoryResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments WHERE company_id = $1")
                .bind(company_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn has_dependents(&self, id: &DepartmentId) -> DirectoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM positions WHERE department_id = $1)
                OR EXISTS(SELECT 1 FROM employees WHERE department_id = $1)
            "#,
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Position Repository Implementation
// ============================================================================

impl PositionRepository for PgDirectoryRepository {
    async fn create(&self, position: &Position) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO positions (id, company_id, department_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(position.id.as_uuid())
        .bind(position.company_id.as_uuid())
        .bind(position.department_id.as_uuid())
        .bind(&position.name)
        .bind(position.created_at)
        .bind(position.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PositionId) -> DirectoryResult<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, company_id, department_id, name, created_at, updated_at
            FROM positions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PositionRow::into_position))
    }

    async fn update(&self, position: &Position) -> DirectoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE positions SET
                company_id = $2,
                department_id = $3,
                name = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(position.id.as_uuid())
        .bind(position.company_id.as_uuid())
        .bind(position.department_id.as_uuid())
        .bind(&position.name)
        .bind(position.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &PositionId) -> DirectoryResult<u64> {
        let result = sqlx::query("DELETE FROM positions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn search(
        &self,
        filter: &PositionFilter,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Position>> {
        let rows = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, company_id, department_id, name, created_at, updated_at
            FROM positions
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND ($2::uuid IS NULL OR department_id = $2)
            ORDER BY created_at, id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.company_id.map(CompanyId::into_uuid))
        .bind(filter.department_id.map(DepartmentId::into_uuid))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PositionRow::into_position).collect())
    }

    async fn count(&self, filter: &PositionFilter) -> DirectoryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM positions
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND ($2::uuid IS NULL OR department_id = $2)
            "#,
        )
        .bind(filter.company_id.map(CompanyId::into_uuid))
        .bind(filter.department_id.map(DepartmentId::into_uuid))
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn has_dependents(&self, id: &PositionId) -> DirectoryResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE position_id = $1)",
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Employee Repository Implementation
// ============================================================================

impl EmployeeRepository for PgDirectoryRepository {
    async fn create(&self, employee: &Employee) -> DirectoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees (
                id,
                company_id,
                department_id,
                position_id,
                name,
                last_name,
                phone_number,
                email,
                id_type,
                id_number,
                admission_date,
                salary,
                picture_url,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(employee.id.as_uuid())
        .bind(employee.company_id.as_uuid())
        .bind(employee.department_id.map(DepartmentId::into_uuid))
        .bind(employee.position_id.map(PositionId::into_uuid))
        .bind(&employee.name)
        .bind(&employee.last_name)
        .bind(&employee.phone_number)
        .bind(employee.email.as_str())
        .bind(&employee.id_type)
        .bind(&employee.id_number)
        .bind(employee.admission_date)
        .bind(employee.salary)
        .bind(&employee.picture_url)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &EmployeeId) -> DirectoryResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeRow::into_employee))
    }

    async fn update(&self, employee: &Employee) -> DirectoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                company_id = $2,
                department_id = $3,
                position_id = $4,
                name = $5,
                last_name = $6,
                phone_number = $7,
                email = $8,
                id_type = $9,
                id_number = $10,
                admission_date = $11,
                salary = $12,
                picture_url = $13,
                updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(employee.id.as_uuid())
        .bind(employee.company_id.as_uuid())
        .bind(employee.department_id.map(DepartmentId::into_uuid))
        .bind(employee.position_id.map(PositionId::into_uuid))
        .bind(&employee.name)
        .bind(&employee.last_name)
        .bind(&employee.phone_number)
        .bind(employee.email.as_str())
        .bind(&employee.id_type)
        .bind(&employee.id_number)
        .bind(employee.admission_date)
        .bind(employee.salary)
        .bind(&employee.picture_url)
        .bind(employee.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &EmployeeId) -> DirectoryResult<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_by_company(
        &self,
        company_id: &CompanyId,
        page: PageRequest,
    ) -> DirectoryResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            r#"
            SELECT {EMPLOYEE_COLUMNS}
            FROM employees
            WHERE company_id = $1
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(company_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmployeeRow::into_employee).collect())
    }

    async fn count_by_company(&self, company_id: &CompanyId) -> DirectoryResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE company_id = $1")
                .bind(company_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// ============================================================================
// Row Types
// ============================================================================

const EMPLOYEE_COLUMNS: &str = "id, company_id, department_id, position_id, name, last_name, \
     phone_number, email, id_type, id_number, admission_date, salary, picture_url, \
     created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    address: String,
    phone: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl CompanyRow {
    fn into_company(self) -> Company {
        Company {
            id: CompanyId::from_uuid(self.id),
            owner_id: UserId::from_uuid(self.owner_id),
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: Email::from_db(self.email),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DepartmentRow {
    id: Uuid,
    company_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl DepartmentRow {
    fn into_department(self) -> Department {
        Department {
            id: DepartmentId::from_uuid(self.id),
            company_id: CompanyId::from_uuid(self.company_id),
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PositionRow {
    id: Uuid,
    company_id: Uuid,
    department_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl PositionRow {
    fn into_position(self) -> Position {
        Position {
            id: PositionId::from_uuid(self.id),
            company_id: CompanyId::from_uuid(self.company_id),
            department_id: DepartmentId::from_uuid(self.department_id),
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    company_id: Uuid,
    department_id: Option<Uuid>,
    position_id: Option<Uuid>,
    name: String,
    last_name: String,
    phone_number: String,
    email: String,
    id_type: String,
    id_number: String,
    admission_date: NaiveDate,
    salary: f64,
    picture_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl EmployeeRow {
    fn into_employee(self) -> Employee {
        Employee {
            id: EmployeeId::from_uuid(self.id),
            company_id: CompanyId::from_uuid(self.company_id),
            department_id: self.department_id.map(DepartmentId::from_uuid),
            position_id: self.position_id.map(PositionId::from_uuid),
            name: self.name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: Email::from_db(self.email),
            id_type: self.id_type,
            id_number: self.id_number,
            admission_date: self.admission_date,
            salary: self.salary,
            picture_url: self.picture_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

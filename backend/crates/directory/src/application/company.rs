//! Company Use Cases

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{CompanyId, UserId};

use crate::application::config::{DeletePolicy, DirectoryConfig};
use crate::application::validation;
use crate::domain::entity::company::Company;
use crate::domain::repository::CompanyRepository;
use crate::error::{DirectoryError, DirectoryResult};

/// Company create / update input (all fields replaced)
pub struct CompanyInput {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

struct ValidCompany {
    name: String,
    address: String,
    phone: String,
    email: kernel::email::Email,
}

impl CompanyInput {
    fn validate(self) -> DirectoryResult<ValidCompany> {
        Ok(ValidCompany {
            name: validation::required_text("name", &self.name)?,
            address: validation::required_text("address", &self.address)?,
            phone: validation::required_text("phone", &self.phone)?,
            email: validation::email("email", &self.email)?,
        })
    }
}

/// Company use cases
pub struct CompanyService<C>
where
    C: CompanyRepository,
{
    companies: Arc<C>,
    config: Arc<DirectoryConfig>,
}

impl<C> CompanyService<C>
where
    C: CompanyRepository,
{
    pub fn new(companies: Arc<C>, config: Arc<DirectoryConfig>) -> Self {
        Self { companies, config }
    }

    /// Create a company owned by `owner`
    pub async fn create(&self, owner: UserId, input: CompanyInput) -> DirectoryResult<Company> {
        let valid = input.validate()?;

        let company = Company {
            id: CompanyId::new(),
            owner_id: owner,
            name: valid.name,
            address: valid.address,
            phone: valid.phone,
            email: valid.email,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.companies.create(&company).await?;

        tracing::info!(company_id = %company.id, owner_id = %owner, "Company created");

        Ok(company)
    }

    pub async fn get(&self, id: &CompanyId) -> DirectoryResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or(DirectoryError::not_found("Company"))
    }

    /// Replace name, address, phone and email. The owner is kept.
    pub async fn update(&self, id: &CompanyId, input: CompanyInput) -> DirectoryResult<Company> {
        let mut company = self.get(id).await?;
        let valid = input.validate()?;

        company.name = valid.name;
        company.address = valid.address;
        company.phone = valid.phone;
        company.email = valid.email;
        company.updated_at = Some(Utc::now());

        if !self.companies.update(&company).await? {
            return Err(DirectoryError::not_found("Company"));
        }

        tracing::info!(company_id = %company.id, "Company updated");

        Ok(company)
    }

    pub async fn delete(&self, id: &CompanyId) -> DirectoryResult<()> {
        if self.config.delete_policy == DeletePolicy::Restrict
            && self.companies.find_by_id(id).await?.is_some()
            && self.companies.has_dependents(id).await?
        {
            return Err(DirectoryError::Conflict(format!(
                "Company {id} still has departments, positions or employees"
            )));
        }

        let rows_deleted = self.companies.delete(id).await?;
        tracing::info!(
            company_id = %id,
            rows_deleted,
            policy = %self.config.delete_policy,
            "Company deleted"
        );
        Ok(())
    }
}

//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use routewise_core::tenancy::{ActorKind, TenantScope};
use routewise_core::types::{DbId, Timestamp};
use routewise_db::models::customer::CreateCustomer;
use routewise_db::models::job::{CreateJob, Job};
use routewise_db::models::organization::{CreateOrganization, CreateOrganizationUser};
use routewise_db::repositories::{CustomerRepo, JobRepo, OrganizationRepo};
use sqlx::PgPool;

/// A registered organization with its owner.
pub struct Tenant {
    pub org_id: DbId,
    pub owner_id: DbId,
}

impl Tenant {
    pub fn scope(&self) -> TenantScope {
        TenantScope {
            organization_id: self.org_id,
            actor_id: self.owner_id,
            role: "owner".to_string(),
            kind: ActorKind::User,
        }
    }
}

pub async fn register(pool: &PgPool, company: &str, email: &str) -> Tenant {
    let org = CreateOrganization {
        name: company.to_string(),
        phone: None,
        industry: None,
    };
    let user = CreateOrganizationUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        name: "Owner".to_string(),
        role: "owner".to_string(),
        phone: String::new(),
    };
    let (organization, owner) = OrganizationRepo::register(pool, &org, &user).await.unwrap();
    Tenant {
        org_id: organization.id,
        owner_id: owner.id,
    }
}

pub fn new_customer(name: &str) -> CreateCustomer {
    CreateCustomer {
        name: name.to_string(),
        email: None,
        phone: Some("555-0100".to_string()),
        address: Some("1 Main St".to_string()),
        latitude: None,
        longitude: None,
        notes: None,
    }
}

pub fn june_first() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub fn new_job(customer_id: DbId, title: &str) -> CreateJob {
    CreateJob {
        customer_id,
        technician_id: None,
        title: title.to_string(),
        description: None,
        scheduled_at: june_first(),
        duration_minutes: None,
        price: None,
        metadata: None,
    }
}

/// Create a customer and one job for it in the tenant.
pub async fn seed_job(pool: &PgPool, tenant: &Tenant, title: &str) -> Job {
    let customer = CustomerRepo::create(pool, tenant.org_id, tenant.owner_id, &new_customer("Jane Doe"))
        .await
        .unwrap();
    JobRepo::create(pool, tenant.org_id, tenant.owner_id, &new_job(customer.id, title))
        .await
        .unwrap()
}

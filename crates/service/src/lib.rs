//! Service layer for employees and companies.
//! - Repositories own data access; services own business rules.
//! - Lookups return `Option`/`Vec`; only writes against a missing id fail with `NotFound`.
//! - Validation rules live next to the entities in the `models` crate.

pub mod errors;
pub mod pagination;
pub mod employee;
pub mod company;
#[cfg(test)]
pub mod test_support;

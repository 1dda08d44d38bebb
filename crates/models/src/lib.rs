//! SeaORM entities for the employee store, their field validators and the
//! database connection helpers.

pub mod errors;
pub mod db;
pub mod company;
pub mod employee;

#[cfg(test)]
mod tests;

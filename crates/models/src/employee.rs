use std::fmt;

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::{company, errors};

pub const NAME_MAX_LEN: usize = 128;
pub const AGE_MAX: i32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[sea_orm(string_value = "MALE")]
    Male,
    #[sea_orm(string_value = "FEMALE")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub salary: f64,
    pub company_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("employee name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!(
            "employee name longer than {NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_age(age: i32) -> Result<(), errors::ModelError> {
    if !(0..=AGE_MAX).contains(&age) {
        return Err(errors::ModelError::Validation(format!("age must be within 0..={AGE_MAX}")));
    }
    Ok(())
}

pub fn validate_salary(salary: f64) -> Result<(), errors::ModelError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(errors::ModelError::Validation("salary must be a non-negative number".into()));
    }
    Ok(())
}

pub fn validate(name: &str, age: i32, salary: f64) -> Result<(), errors::ModelError> {
    validate_name(name)?;
    validate_age(age)?;
    validate_salary(salary)
}

/// Validate and insert an employee; the store assigns the id.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    age: i32,
    gender: Gender,
    salary: f64,
    company_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    validate(name, age, salary)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        age: Set(age),
        gender: Set(gender),
        salary: Set(salary),
        company_id: Set(company_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_rules() {
        assert!(validate_name("John Smith").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(NAME_MAX_LEN)).is_ok());
        assert!(validate_name(&"x".repeat(NAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn age_and_salary_rules() {
        assert!(validate_age(0).is_ok());
        assert!(validate_age(AGE_MAX).is_ok());
        assert!(validate_age(-1).is_err());
        assert!(validate_age(AGE_MAX + 1).is_err());

        assert!(validate_salary(0.0).is_ok());
        assert!(validate_salary(9_999_999.0).is_ok());
        assert!(validate_salary(-0.5).is_err());
        assert!(validate_salary(f64::NAN).is_err());
        assert!(validate_salary(f64::INFINITY).is_err());
    }

    #[test]
    fn gender_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"FEMALE\"");
        let g: Gender = serde_json::from_str("\"MALE\"").unwrap();
        assert_eq!(g, Gender::Male);
        assert!(serde_json::from_str::<Gender>("\"male\"").is_err());
        assert_eq!(Gender::Female.to_string(), "FEMALE");
    }
}

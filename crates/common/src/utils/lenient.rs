//! Deserializers accepting numbers either as JSON numbers or numeric strings.
//!
//! Clients built against the first version of the API send `"age": "18"`;
//! both forms bind to the same field.

use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    Text(String),
}

impl<T> NumberOrString<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn into_number<E: de::Error>(self) -> Result<T, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<T>()
                .map_err(|e| E::custom(format!("invalid number {s:?}: {e}"))),
        }
    }
}

/// `#[serde(deserialize_with = "common::utils::lenient::number")]`
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    NumberOrString::<T>::deserialize(deserializer)?.into_number()
}

/// Optional variant; `null` maps to `None`. Pair with `#[serde(default)]`.
pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    Option::<NumberOrString<T>>::deserialize(deserializer)?
        .map(NumberOrString::into_number)
        .transpose()
}

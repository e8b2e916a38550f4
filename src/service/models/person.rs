use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Identifier assigned by a store when a person is created.
///
/// The in-memory store hands out small numbers, the relational store UUIDs.
/// Both serialize untagged so the JSON carries a plain number or string.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PersonId {
    Numeric(u32),
    Document(Uuid),
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonId::Numeric(id) => write!(f, "{id}"),
            PersonId::Document(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

/// Request payload for creating or updating a person. Fields are optional so
/// that absent values surface as validation failures instead of JSON errors.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewPerson {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl NewPerson {
    pub fn new(name: &str, number: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            number: Some(number.to_owned()),
        }
    }
}

/// Validated name and number, ready to be handed to a store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PersonDetails {
    pub name: String,
    pub number: String,
}

/// How the in-memory store picks ids for new persons.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum IdPolicy {
    /// Uniform draw from `0..RANDOM_ID_RANGE` without a collision check.
    #[default]
    Random,
    /// Monotonic counter; ids of deleted persons are never handed out again.
    Sequential,
}

impl IdPolicy {
    pub const RANDOM_ID_RANGE: u32 = 65536;

    /// `last_id` is the highest id this store has issued so far.
    pub fn next_id(&self, last_id: &mut u32) -> u32 {
        match self {
            IdPolicy::Random => rand::thread_rng().gen_range(0..Self::RANDOM_ID_RANGE),
            IdPolicy::Sequential => {
                *last_id += 1;
                *last_id
            }
        }
    }

    /// Highest numeric id among `persons`, the starting point for `next_id`.
    pub fn last_id(persons: &[Person]) -> u32 {
        persons
            .iter()
            .filter_map(|person| match person.id {
                PersonId::Numeric(id) => Some(id),
                PersonId::Document(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl FromStr for IdPolicy {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "random" => Ok(IdPolicy::Random),
            "sequential" => Ok(IdPolicy::Sequential),
            other => Err(anyhow::anyhow!("unknown id policy '{other}'")),
        }
    }
}

/// The phonebook a fresh in-memory store starts with.
pub fn seed_persons() -> Vec<Person> {
    [
        (1, "Arto Hellas", "040-123456"),
        (2, "Ada Lovelace", "39-44-5323523"),
        (3, "Dan Abramov", "12-43-234345"),
        (4, "Mary Poppendieck", "39-23-6423122"),
    ]
    .into_iter()
    .map(|(id, name, number)| Person {
        id: PersonId::Numeric(id),
        name: name.to_owned(),
        number: number.to_owned(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_id_serialization() {
        let numeric = serde_json::to_value(PersonId::Numeric(7)).unwrap();
        assert_eq!(numeric, serde_json::json!(7));

        let uuid = Uuid::new_v4();
        let document = serde_json::to_value(PersonId::Document(uuid)).unwrap();
        assert_eq!(document, serde_json::json!(uuid.to_string()));
    }

    #[test]
    fn test_new_person_missing_fields() {
        let new_person: NewPerson = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();

        assert_eq!(new_person.name.as_deref(), Some("Ada"));
        assert!(new_person.number.is_none());
    }

    #[test]
    fn test_sequential_policy() {
        let mut last_id = IdPolicy::last_id(&[]);
        assert_eq!(IdPolicy::Sequential.next_id(&mut last_id), 1);

        let mut last_id = IdPolicy::last_id(&seed_persons());
        assert_eq!(IdPolicy::Sequential.next_id(&mut last_id), 5);
        assert_eq!(IdPolicy::Sequential.next_id(&mut last_id), 6);
    }

    #[test]
    fn test_random_policy_in_range() {
        let mut last_id = 0;
        for _ in 0..100 {
            assert!(IdPolicy::Random.next_id(&mut last_id) < IdPolicy::RANDOM_ID_RANGE);
        }
        assert_eq!(last_id, 0);
    }

    #[test]
    fn test_parse_id_policy() {
        assert_eq!("random".parse::<IdPolicy>().unwrap(), IdPolicy::Random);
        assert_eq!(
            "Sequential".parse::<IdPolicy>().unwrap(),
            IdPolicy::Sequential
        );
        assert!("counter".parse::<IdPolicy>().is_err());
    }
}

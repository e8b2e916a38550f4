use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{PhonebookError, PhonebookResult};
use crate::models::{IdPolicy, Person, PersonDetails, PersonId};
use crate::persistence::PersonPersistence;

#[derive(Debug)]
struct MemoryState {
    persons: Vec<Person>,
    last_id: u32,
}

/// Process-local store. Persons are kept in insertion order and every
/// operation holds the lock for its whole read-modify-write.
#[derive(Debug)]
pub struct PersonMemoryPersistence {
    state: Arc<Mutex<MemoryState>>,
    id_policy: IdPolicy,
}

impl PersonMemoryPersistence {
    pub fn new(id_policy: IdPolicy) -> Self {
        Self::with_persons(id_policy, Vec::new())
    }

    pub fn with_persons(id_policy: IdPolicy, persons: Vec<Person>) -> Self {
        let last_id = IdPolicy::last_id(&persons);

        Self {
            state: Arc::new(Mutex::new(MemoryState { persons, last_id })),
            id_policy,
        }
    }

    fn parse_id(id: &str) -> PhonebookResult<PersonId> {
        id.parse::<u32>()
            .map(PersonId::Numeric)
            .map_err(|_| PhonebookError::InvalidId)
    }
}

impl Default for PersonMemoryPersistence {
    fn default() -> Self {
        Self::new(IdPolicy::default())
    }
}

#[async_trait]
impl PersonPersistence for PersonMemoryPersistence {
    #[tracing::instrument(name = "memory::person::create", skip_all)]
    async fn create(&self, details: &PersonDetails) -> PhonebookResult<Person> {
        let mut locked_state = self.state.lock().await;

        let person = Person {
            id: PersonId::Numeric(self.id_policy.next_id(&mut locked_state.last_id)),
            name: details.name.clone(),
            number: details.number.clone(),
        };

        locked_state.persons.push(person.clone());

        Ok(person)
    }

    #[tracing::instrument(name = "memory::person::update", skip_all)]
    async fn update(&self, id: &str, details: &PersonDetails) -> PhonebookResult<Option<Person>> {
        let person_id = Self::parse_id(id)?;
        let mut locked_state = self.state.lock().await;

        match locked_state
            .persons
            .iter_mut()
            .find(|person| person.id == person_id)
        {
            Some(person) => {
                person.name = details.name.clone();
                person.number = details.number.clone();

                Ok(Some(person.clone()))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "memory::person::delete", skip_all)]
    async fn delete(&self, id: &str) -> PhonebookResult<u64> {
        let person_id = Self::parse_id(id)?;
        let mut locked_state = self.state.lock().await;

        let starting_len = locked_state.persons.len();
        locked_state.persons.retain(|person| person.id != person_id);
        let deleted_count = starting_len - locked_state.persons.len();

        Ok(deleted_count as u64)
    }

    #[tracing::instrument(name = "memory::person::get_by_id", skip_all)]
    async fn get_by_id(&self, id: &str) -> PhonebookResult<Option<Person>> {
        let person_id = Self::parse_id(id)?;
        let locked_state = self.state.lock().await;

        Ok(locked_state
            .persons
            .iter()
            .find(|person| person.id == person_id)
            .cloned())
    }

    #[tracing::instrument(name = "memory::person::find_by_name", skip_all)]
    async fn find_by_name(&self, name: &str) -> PhonebookResult<Option<Person>> {
        let name = name.to_lowercase();
        let locked_state = self.state.lock().await;

        Ok(locked_state
            .persons
            .iter()
            .find(|person| person.name.to_lowercase() == name)
            .cloned())
    }

    #[tracing::instrument(name = "memory::person::list", skip_all)]
    async fn list(&self) -> PhonebookResult<Vec<Person>> {
        let locked_state = self.state.lock().await;

        Ok(locked_state.persons.clone())
    }

    async fn count(&self) -> PhonebookResult<usize> {
        Ok(self.state.lock().await.persons.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_persons;

    fn ada() -> PersonDetails {
        PersonDetails {
            name: "Ada Lovelace".to_owned(),
            number: "39-44-5323523".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let person_persistence = PersonMemoryPersistence::default();

        let created_person = person_persistence.create(&ada()).await.unwrap();
        let id = created_person.id.to_string();

        let fetched_person = person_persistence.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(fetched_person, created_person);

        let deleted_count = person_persistence.delete(&id).await.unwrap();
        assert_eq!(deleted_count, 1);

        let deleted_count = person_persistence.delete(&id).await.unwrap();
        assert_eq!(deleted_count, 0);

        assert!(person_persistence.get_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let person_persistence =
            PersonMemoryPersistence::with_persons(IdPolicy::Sequential, seed_persons());

        let created_person = person_persistence.create(&ada()).await.unwrap();
        assert_eq!(created_person.id, PersonId::Numeric(5));

        let persons = person_persistence.list().await.unwrap();
        let names: Vec<&str> = persons.iter().map(|person| person.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "Arto Hellas",
                "Ada Lovelace",
                "Dan Abramov",
                "Mary Poppendieck",
                "Ada Lovelace"
            ]
        );
        assert_eq!(person_persistence.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_update() {
        let person_persistence =
            PersonMemoryPersistence::with_persons(IdPolicy::Random, seed_persons());

        let details = PersonDetails {
            name: "Arto Hellas".to_owned(),
            number: "040-654321".to_owned(),
        };

        let updated_person = person_persistence
            .update("1", &details)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated_person.id, PersonId::Numeric(1));
        assert_eq!(updated_person.number, "040-654321");

        assert!(person_persistence
            .update("999", &details)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_case() {
        let person_persistence =
            PersonMemoryPersistence::with_persons(IdPolicy::Random, seed_persons());

        let found_person = person_persistence
            .find_by_name("dan ABRAMOV")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found_person.id, PersonId::Numeric(3));

        assert!(person_persistence
            .find_by_name("Grace Hopper")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let person_persistence = PersonMemoryPersistence::default();

        let result = person_persistence.get_by_id("not-a-number").await;
        assert!(matches!(result, Err(PhonebookError::InvalidId)));

        let result = person_persistence.delete("-1").await;
        assert!(matches!(result, Err(PhonebookError::InvalidId)));
    }

    #[tokio::test]
    async fn test_concurrent_creates() {
        let person_persistence = Arc::new(PersonMemoryPersistence::new(IdPolicy::Sequential));

        let mut handles = Vec::new();
        for i in 0..32 {
            let person_persistence = Arc::clone(&person_persistence);
            handles.push(tokio::spawn(async move {
                let details = PersonDetails {
                    name: format!("person {i}"),
                    number: format!("{i}"),
                };
                person_persistence.create(&details).await.unwrap()
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        let persons = person_persistence.list().await.unwrap();
        assert_eq!(persons.len(), 32);

        let mut ids: Vec<String> = persons.iter().map(|person| person.id.to_string()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }
}

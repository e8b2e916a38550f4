use crate::{
    errors::{PhonebookError, PhonebookResult, NAME_MISSING, NAME_NOT_UNIQUE, NUMBER_MISSING},
    models::{NewPerson, Person, PersonDetails, PersonId},
    persistence::PersonPersistence,
};

pub struct PersonService {
    pub persistence: Box<dyn PersonPersistence>,
}

impl PersonService {
    pub async fn create(&self, new_person: NewPerson) -> PhonebookResult<Person> {
        let details = self.validate(new_person, None).await?;

        let person = self.persistence.create(&details).await?;

        tracing::info!("person '{}' created with id {}", person.name, person.id);

        Ok(person)
    }

    pub async fn update(&self, person_id: &str, new_person: NewPerson) -> PhonebookResult<Person> {
        let existing = self.get_by_id(person_id).await?;
        let details = self.validate(new_person, Some(&existing.id)).await?;

        match self.persistence.update(person_id, &details).await? {
            Some(person) => Ok(person),
            None => Err(PhonebookError::NotFound),
        }
    }

    pub async fn get_by_id(&self, person_id: &str) -> PhonebookResult<Person> {
        match self.persistence.get_by_id(person_id).await? {
            Some(person) => Ok(person),
            None => Err(PhonebookError::NotFound),
        }
    }

    /// Removing an id that is not stored is not an error.
    pub async fn delete(&self, person_id: &str) -> PhonebookResult<u64> {
        let deleted_count = self.persistence.delete(person_id).await?;

        if deleted_count > 0 {
            tracing::info!("person {person_id} deleted");
        }

        Ok(deleted_count)
    }

    pub async fn list(&self) -> PhonebookResult<Vec<Person>> {
        self.persistence.list().await
    }

    pub async fn count(&self) -> PhonebookResult<usize> {
        self.persistence.count().await
    }

    /// Checks presence of name and number, then that no other person holds
    /// the same name ignoring case. `current_id` is the person being updated.
    async fn validate(
        &self,
        new_person: NewPerson,
        current_id: Option<&PersonId>,
    ) -> PhonebookResult<PersonDetails> {
        let name = match new_person.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(PhonebookError::ValidationFailed(NAME_MISSING.to_owned())),
        };

        let number = match new_person.number {
            Some(number) if !number.is_empty() => number,
            _ => return Err(PhonebookError::ValidationFailed(NUMBER_MISSING.to_owned())),
        };

        if let Some(existing) = self.persistence.find_by_name(&name).await? {
            if Some(&existing.id) != current_id {
                return Err(PhonebookError::ValidationFailed(NAME_NOT_UNIQUE.to_owned()));
            }
        }

        Ok(PersonDetails { name, number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{seed_persons, IdPolicy};
    use crate::persistence::memory::PersonMemoryPersistence;

    fn seeded_service() -> PersonService {
        PersonService {
            persistence: Box::new(PersonMemoryPersistence::with_persons(
                IdPolicy::Random,
                seed_persons(),
            )),
        }
    }

    fn validation_message(result: PhonebookResult<Person>) -> String {
        match result {
            Err(PhonebookError::ValidationFailed(message)) => message,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let person_service = seeded_service();

        let created_person = person_service
            .create(NewPerson::new("Grace Hopper", "555-0100"))
            .await
            .unwrap();

        let fetched_person = person_service
            .get_by_id(&created_person.id.to_string())
            .await
            .unwrap();
        assert_eq!(fetched_person, created_person);
        assert_eq!(person_service.count().await.unwrap(), 5);

        let deleted_count = person_service
            .delete(&created_person.id.to_string())
            .await
            .unwrap();
        assert_eq!(deleted_count, 1);

        let result = person_service
            .get_by_id(&created_person.id.to_string())
            .await;
        assert!(matches!(result, Err(PhonebookError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_requires_name_and_number() {
        let person_service = seeded_service();

        let result = person_service
            .create(NewPerson {
                name: None,
                number: Some("555-0100".to_owned()),
            })
            .await;
        assert_eq!(validation_message(result), "name missing");

        let result = person_service
            .create(NewPerson {
                name: Some(String::new()),
                number: None,
            })
            .await;
        assert_eq!(validation_message(result), "name missing");

        let result = person_service
            .create(NewPerson {
                name: Some("Grace Hopper".to_owned()),
                number: Some(String::new()),
            })
            .await;
        assert_eq!(validation_message(result), "number missing");

        assert_eq!(person_service.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let person_service = seeded_service();

        let result = person_service
            .create(NewPerson::new("arto hellas", "040-000000"))
            .await;
        assert_eq!(validation_message(result), "name must be unique");

        assert_eq!(person_service.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update() {
        let person_service = seeded_service();

        let updated_person = person_service
            .update("2", NewPerson::new("Ada Lovelace", "39-44-0000000"))
            .await
            .unwrap();
        assert_eq!(updated_person.id, PersonId::Numeric(2));
        assert_eq!(updated_person.number, "39-44-0000000");

        let result = person_service
            .update("2", NewPerson::new("Dan Abramov", "39-44-0000000"))
            .await;
        assert_eq!(validation_message(result), "name must be unique");

        let result = person_service
            .update("999", NewPerson::new("Nobody", "0"))
            .await;
        assert!(matches!(result, Err(PhonebookError::NotFound)));

        let result = person_service
            .update("abc", NewPerson::new("Nobody", "0"))
            .await;
        assert!(matches!(result, Err(PhonebookError::InvalidId)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let person_service = seeded_service();

        assert_eq!(person_service.delete("1").await.unwrap(), 1);
        assert_eq!(person_service.delete("1").await.unwrap(), 0);
        assert_eq!(person_service.count().await.unwrap(), 3);
    }
}

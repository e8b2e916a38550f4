use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{PhonebookError, PhonebookResult};
use crate::models::{Person, PersonDetails, PersonId};
use crate::persistence::PersonPersistence;

#[derive(Debug)]
pub struct PersonRelationalPersistence {
    pub db: Arc<PgPool>,
}

#[derive(Debug, sqlx::FromRow)]
struct PersonRow {
    id: Uuid,
    name: String,
    number: String,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: PersonId::Document(row.id),
            name: row.name,
            number: row.number,
        }
    }
}

impl PersonRelationalPersistence {
    fn parse_id(id: &str) -> PhonebookResult<Uuid> {
        Uuid::parse_str(id).map_err(|_| PhonebookError::InvalidId)
    }
}

#[async_trait]
impl PersonPersistence for PersonRelationalPersistence {
    #[tracing::instrument(name = "relational::person::create", skip_all)]
    async fn create(&self, details: &PersonDetails) -> PhonebookResult<Person> {
        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            INSERT INTO persons
               (id, name, number)
            VALUES
               ($1, $2, $3)
            RETURNING id, name, number
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&details.name)
        .bind(&details.number)
        .fetch_one(&*self.db)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(name = "relational::person::update", skip_all)]
    async fn update(&self, id: &str, details: &PersonDetails) -> PhonebookResult<Option<Person>> {
        let person_id = Self::parse_id(id)?;

        let row = sqlx::query_as::<_, PersonRow>(
            r#"
            UPDATE persons SET
               name = $2,
               number = $3
            WHERE id = $1
            RETURNING id, name, number
            "#,
        )
        .bind(person_id)
        .bind(&details.name)
        .bind(&details.number)
        .fetch_optional(&*self.db)
        .await?;

        Ok(row.map(Person::from))
    }

    #[tracing::instrument(name = "relational::person::delete", skip_all)]
    async fn delete(&self, id: &str) -> PhonebookResult<u64> {
        let person_id = Self::parse_id(id)?;

        let result = sqlx::query(
            // language=PostgreSQL
            r#"
                DELETE FROM persons WHERE id = $1
            "#,
        )
        .bind(person_id)
        .execute(&*self.db)
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "relational::person::get_by_id", skip_all)]
    async fn get_by_id(&self, id: &str) -> PhonebookResult<Option<Person>> {
        let person_id = Self::parse_id(id)?;

        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT id, name, number FROM persons WHERE id = $1",
        )
        .bind(person_id)
        .fetch_optional(&*self.db)
        .await?;

        Ok(row.map(Person::from))
    }

    #[tracing::instrument(name = "relational::person::find_by_name", skip_all)]
    async fn find_by_name(&self, name: &str) -> PhonebookResult<Option<Person>> {
        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT id, name, number FROM persons WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&*self.db)
        .await?;

        Ok(row.map(Person::from))
    }

    #[tracing::instrument(name = "relational::person::list", skip_all)]
    async fn list(&self) -> PhonebookResult<Vec<Person>> {
        let rows = sqlx::query_as::<_, PersonRow>(
            r#"
                SELECT id, name, number FROM persons ORDER BY created_at, id
            "#,
        )
        .fetch_all(&*self.db)
        .await?;

        let persons = rows.into_iter().map(Person::from).collect::<Vec<Person>>();

        Ok(persons)
    }

    #[tracing::instrument(name = "relational::person::count", skip_all)]
    async fn count(&self) -> PhonebookResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
            .fetch_one(&*self.db)
            .await?;

        Ok(count as usize)
    }
}

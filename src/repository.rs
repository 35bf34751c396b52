// src/repository.rs
use crate::error::{RepositoryError, RepositoryResult};
use crate::person::{parse_id, DeletionSummary, NewPerson, Person, PersonSummary};
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

pub const COLLECTION_NAME: &str = "people";
pub const CHAIN_QUERY_FOOD: &str = "burritos";
pub const CHAIN_QUERY_LIMIT: i64 = 2;

/// CRUD operations over the `people` collection.
///
/// Holds only the driver's collection handle, so clones are cheap and share
/// the caller's connection pool. Every driver error is returned unchanged
/// inside [`RepositoryError::Database`].
#[derive(Clone, Debug)]
pub struct PersonRepository {
    collection: Collection<Person>,
}

impl PersonRepository {
    pub fn new(db: &Database) -> Self {
        Self::from_collection(db.collection(COLLECTION_NAME))
    }

    pub fn from_collection(collection: Collection<Person>) -> Self {
        PersonRepository { collection }
    }

    pub fn collection(&self) -> &Collection<Person> {
        &self.collection
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn create_record(
        &self,
        name: &str,
        age: Option<i32>,
        favorite_foods: Vec<String>,
    ) -> RepositoryResult<Person> {
        let new_person = NewPerson::new(name, age, favorite_foods);
        new_person.validate()?;

        let person = new_person.into_person(ObjectId::new());
        self.collection.insert_one(&person).await?;
        debug!(id = %person.id, "person created");
        Ok(person)
    }

    /// Inserts the whole batch as one ordered `insertMany`.
    ///
    /// Every input is validated first, so an invalid entry rejects the batch
    /// before anything is written. A server-side failure stops an ordered
    /// insert at the failing document; earlier documents stay written.
    #[instrument(level = "debug", skip(self, people), fields(count = people.len()))]
    pub async fn create_many_records(&self, people: Vec<NewPerson>) -> RepositoryResult<Vec<Person>> {
        for person in &people {
            person.validate()?;
        }
        if people.is_empty() {
            return Ok(Vec::new());
        }

        let people: Vec<Person> = people
            .into_iter()
            .map(|p| p.into_person(ObjectId::new()))
            .collect();
        let result = self.collection.insert_many(&people).await?;
        debug!(inserted = result.inserted_ids.len(), "people created");
        Ok(people)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_people_by_name(&self, name: &str) -> RepositoryResult<Vec<Person>> {
        let cursor = self.collection.find(name_filter(name)).await?;
        let people: Vec<Person> = cursor.try_collect().await?;
        debug!(found = people.len(), "find by name");
        Ok(people)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_one_person_by_food(&self, food: &str) -> RepositoryResult<Option<Person>> {
        let person = self.collection.find_one(food_filter(food)).await?;
        debug!(found = person.is_some(), "find one by food");
        Ok(person)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn find_person_by_id(&self, id: &str) -> RepositoryResult<Option<Person>> {
        let object_id = parse_id(id)?;
        let person = self.collection.find_one(id_filter(object_id)).await?;
        debug!(found = person.is_some(), "find by id");
        Ok(person)
    }

    /// Appends `food` to the person's favorite foods with a server-side `$push`.
    #[instrument(level = "debug", skip(self))]
    pub async fn find_edit_then_save(&self, id: &str, food: &str) -> RepositoryResult<Person> {
        let object_id = parse_id(id)?;
        let person = self
            .collection
            .find_one_and_update(id_filter(object_id), food_append(food))
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| not_found(id))?;
        debug!(foods = person.favorite_foods.len(), "person saved");
        Ok(person)
    }

    /// Sets `age` on the first person with this name and returns the updated document.
    #[instrument(level = "debug", skip(self))]
    pub async fn find_and_update(&self, name: &str, age: i32) -> RepositoryResult<Option<Person>> {
        let person = self
            .collection
            .find_one_and_update(name_filter(name), age_update(age))
            .return_document(ReturnDocument::After)
            .await?;
        debug!(updated = person.is_some(), "find and update");
        Ok(person)
    }

    /// Deletes the person and returns the document as it was before removal.
    #[instrument(level = "debug", skip(self))]
    pub async fn remove_by_id(&self, id: &str) -> RepositoryResult<Person> {
        let object_id = parse_id(id)?;
        let person = self
            .collection
            .find_one_and_delete(id_filter(object_id))
            .await?
            .ok_or_else(|| not_found(id))?;
        debug!("person removed");
        Ok(person)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn remove_many_people(&self, name: &str) -> RepositoryResult<DeletionSummary> {
        let result = self.collection.delete_many(name_filter(name)).await?;
        debug!(deleted = result.deleted_count, "people removed");
        Ok(DeletionSummary {
            deleted_count: result.deleted_count,
        })
    }

    /// Up to two burrito lovers, sorted by name, without their age.
    #[instrument(level = "debug", skip(self))]
    pub async fn chain_query_helpers(&self) -> RepositoryResult<Vec<PersonSummary>> {
        let people: Vec<PersonSummary> = self.burrito_lovers().await?;
        debug!(found = people.len(), "chained query");
        Ok(people)
    }

    /// The same query as [`chain_query_helpers`](Self::chain_query_helpers),
    /// returning the documents exactly as the server sent them.
    pub async fn chain_query_documents(&self) -> RepositoryResult<Vec<Document>> {
        self.burrito_lovers().await
    }

    async fn burrito_lovers<T>(&self) -> RepositoryResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync + Unpin,
    {
        let cursor = self
            .collection
            .clone_with_type::<T>()
            .find(food_filter(CHAIN_QUERY_FOOD))
            .sort(name_ascending())
            .limit(CHAIN_QUERY_LIMIT)
            .projection(without_age())
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

fn not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound { id: id.to_string() }
}

fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

fn name_filter(name: &str) -> Document {
    doc! { "name": name }
}

// Equality on an array field matches any element.
fn food_filter(food: &str) -> Document {
    doc! { "favoriteFoods": food }
}

fn age_update(age: i32) -> Document {
    doc! { "$set": { "age": age } }
}

fn food_append(food: &str) -> Document {
    doc! { "$push": { "favoriteFoods": food } }
}

fn name_ascending() -> Document {
    doc! { "name": 1 }
}

fn without_age() -> Document {
    doc! { "age": 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_target_stored_field_names() {
        let id = ObjectId::new();
        assert_eq!(id_filter(id), doc! { "_id": id });
        assert_eq!(name_filter("Jane"), doc! { "name": "Jane" });
        assert_eq!(food_filter("pizza"), doc! { "favoriteFoods": "pizza" });
    }

    #[test]
    fn age_update_only_sets_age() {
        let update = age_update(21);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_i32("age").unwrap(), 21);
    }

    #[test]
    fn food_append_pushes_one_food() {
        let update = food_append("kale");
        assert_eq!(update, doc! { "$push": { "favoriteFoods": "kale" } });
        assert!(!update.contains_key("$set"));
    }

    #[test]
    fn chained_query_shape() {
        assert_eq!(CHAIN_QUERY_FOOD, "burritos");
        assert_eq!(CHAIN_QUERY_LIMIT, 2);
        assert_eq!(name_ascending(), doc! { "name": 1 });
        assert_eq!(without_age(), doc! { "age": 0 });
    }

    #[tokio::test]
    async fn repository_uses_people_collection() {
        let client = crate::mongo::connect("mongodb://localhost:27017").await.unwrap();
        let repo = PersonRepository::new(&client.database("person_repo_unit"));
        assert_eq!(repo.collection().name(), "people");
    }

    // Validation failures return before any network call, so no server is needed.
    #[tokio::test]
    async fn invalid_input_fails_before_touching_the_server() {
        let client = crate::mongo::connect("mongodb://localhost:27017").await.unwrap();
        let repo = PersonRepository::new(&client.database("person_repo_unit"));

        let err = repo.create_record("", Some(20), vec![]).await.unwrap_err();
        assert!(err.is_validation());

        let batch = vec![NewPerson::new("Ok", None, vec![]), NewPerson::default()];
        assert!(repo.create_many_records(batch).await.unwrap_err().is_validation());

        assert!(repo.create_many_records(Vec::new()).await.unwrap().is_empty());

        for result in [
            repo.find_person_by_id("xyz").await.map(|_| ()),
            repo.find_edit_then_save("xyz", "kale").await.map(|_| ()),
            repo.remove_by_id("xyz").await.map(|_| ()),
        ] {
            assert!(matches!(result, Err(RepositoryError::InvalidId { .. })));
        }
    }
}

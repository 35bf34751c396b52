// src/person.rs
use crate::error::{RepositoryError, RepositoryResult};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A stored person document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "favoriteFoods", default)]
    pub favorite_foods: Vec<String>,
}

/// Input for creating a person; the id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPerson {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "favoriteFoods", default)]
    pub favorite_foods: Vec<String>,
}

/// A person as returned by projections that leave out `age`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "favoriteFoods", default)]
    pub favorite_foods: Vec<String>,
}

/// Outcome of a bulk removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    pub deleted_count: u64,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, age: Option<i32>, favorite_foods: Vec<String>) -> Self {
        NewPerson {
            name: name.into(),
            age,
            favorite_foods,
        }
    }

    pub fn validate(&self) -> RepositoryResult<()> {
        if self.name.trim().is_empty() {
            return Err(RepositoryError::Validation {
                field: "name",
                reason: "is required".to_string(),
            });
        }
        Ok(())
    }

    pub fn into_person(self, id: ObjectId) -> Person {
        Person {
            id,
            name: self.name,
            age: self.age,
            favorite_foods: self.favorite_foods,
        }
    }
}

pub fn parse_id(id: &str) -> RepositoryResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidId { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, from_document, to_document};

    #[test]
    fn validate_requires_a_name() {
        assert!(NewPerson::default().validate().unwrap_err().is_validation());
        assert!(NewPerson::new("   ", Some(3), vec![]).validate().is_err());
        assert!(NewPerson::new("Jane", None, vec![]).validate().is_ok());
    }

    #[test]
    fn new_person_document_uses_stored_field_names() {
        let doc = to_document(&NewPerson::new("Mary", None, vec!["pizza".into()])).unwrap();
        assert_eq!(doc, doc! { "name": "Mary", "favoriteFoods": ["pizza"] });
        assert!(!doc.contains_key("_id"));
        assert!(!doc.contains_key("age"));
    }

    #[test]
    fn person_defaults_missing_fields() {
        let id = ObjectId::new();
        let person: Person = from_document(doc! { "_id": id, "name": "Bob", "__v": 0 }).unwrap();
        assert_eq!(person.id, id);
        assert_eq!(person.age, None);
        assert!(person.favorite_foods.is_empty());
    }

    #[test]
    fn summary_ignores_age() {
        let id = ObjectId::new();
        let summary: PersonSummary = from_document(doc! {
            "_id": id,
            "name": "Ann",
            "age": 40,
            "favoriteFoods": ["burritos", "tacos"],
        })
        .unwrap();
        assert_eq!(summary.favorite_foods, vec!["burritos", "tacos"]);
        assert!(!to_document(&summary).unwrap().contains_key("age"));
    }

    #[test]
    fn parse_id_rejects_malformed_values() {
        let id = ObjectId::new();
        assert_eq!(parse_id(&id.to_hex()).unwrap(), id);
        let err = parse_id("12345").unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidId { ref id } if id == "12345"));
    }

    #[test]
    fn into_person_keeps_every_field() {
        let id = ObjectId::new();
        let person = NewPerson::new("Kim", Some(31), vec!["kale".into()]).into_person(id);
        assert_eq!(person.id, id);
        assert_eq!(person.age, Some(31));
        assert_eq!(person.favorite_foods, vec!["kale"]);
    }
}

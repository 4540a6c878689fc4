//! In-memory person store

use tokio::sync::RwLock;

use super::Person;

/// Person records seeded from the catalog; lives as long as the process
#[derive(Debug, Default)]
pub struct PeopleStore {
    people: RwLock<Vec<Person>>,
}

impl PeopleStore {
    pub fn new(people: Vec<Person>) -> Self {
        Self {
            people: RwLock::new(people),
        }
    }

    pub async fn list(&self) -> Vec<Person> {
        self.people.read().await.clone()
    }

    /// Insert a person with the next free id (max + 1); `None` once the
    /// largest id is `u32::MAX`
    pub async fn create(&self, name: &str) -> Option<Person> {
        let mut people = self.people.write().await;
        let id = people.iter().map(|p| p.id).max().unwrap_or(0).checked_add(1)?;
        let person = Person {
            id,
            name: name.to_string(),
        };
        people.push(person.clone());
        Some(person)
    }

    /// Rename a person; `None` if the id is unknown
    pub async fn rename(&self, id: u32, name: &str) -> Option<Vec<Person>> {
        let mut people = self.people.write().await;
        let person = people.iter_mut().find(|p| p.id == id)?;
        person.name = name.to_string();
        Some(people.clone())
    }

    /// Remove a person; `None` if the id is unknown
    pub async fn remove(&self, id: u32) -> Option<Vec<Person>> {
        let mut people = self.people.write().await;
        let index = people.iter().position(|p| p.id == id)?;
        people.remove(index);
        Some(people.clone())
    }
}

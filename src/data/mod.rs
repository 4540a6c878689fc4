//! Data source
//!
//! Product and person records loaded once at startup, either from the
//! built-in sample set or from a TOML catalog file.

mod people;

pub use people::PeopleStore;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u32,
    pub name: String,
}

/// Read-only record set, in source order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl Catalog {
    /// Sample data shipped with the binary
    pub fn builtin() -> Self {
        let product = |id, name: &str, slug: &str, price, desc: &str| Product {
            id,
            name: name.to_string(),
            image: format!("/images/{slug}.jpg"),
            price,
            desc: desc.to_string(),
        };
        let person = |id, name: &str| Person {
            id,
            name: name.to_string(),
        };

        Self {
            products: vec![
                product(1, "albany sofa", "albany-sofa", 39.95, "Deep seats and a solid oak frame."),
                product(2, "entertainment center", "entertainment-center", 29.98, "Room for every console and then some."),
                product(3, "albany sectional", "albany-sectional", 10.99, "The sofa's bigger sibling."),
                product(4, "leather sofa", "leather-sofa", 9.99, "Full-grain leather that ages well."),
            ],
            people: vec![
                person(1, "john"),
                person(2, "peter"),
                person(3, "susan"),
                person(4, "anna"),
                person(5, "emma"),
            ],
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Catalog file when configured, built-in data otherwise
    pub fn from_config(catalog_file: Option<&str>) -> Result<Self> {
        match catalog_file {
            Some(path) => Self::load(Path::new(path)),
            None => Ok(Self::builtin()),
        }
    }

    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = Catalog::builtin();
        let product_ids: HashSet<u32> = catalog.products.iter().map(|p| p.id).collect();
        assert_eq!(product_ids.len(), catalog.products.len());
        let person_ids: HashSet<u32> = catalog.people.iter().map(|p| p.id).collect();
        assert_eq!(person_ids.len(), 5);
    }

    #[test]
    fn test_from_toml() {
        let catalog = Catalog::from_toml(
            r#"
[[products]]
id = 10
name = "stool"
image = "/images/stool.jpg"

[[people]]
id = 1
name = "zoe"
"#,
        )
        .unwrap();

        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.products[0].desc, "");
        assert_eq!(catalog.people[0].name, "zoe");
        assert_eq!(catalog.product(10).map(|p| p.name.as_str()), Some("stool"));
        assert!(catalog.product(1).is_none());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(Catalog::from_toml("[[products]]\nid = \"one\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(Catalog::from_config(Some("/definitely/not/here.toml")).is_err());
        assert_eq!(Catalog::from_config(None).unwrap().products.len(), 4);
    }
}

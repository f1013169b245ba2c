//! Shared fixtures: the author domain used across integration suites
//!
//! Mirrors a typical catalog API: an `Author` entity stored with first/last
//! name and date of birth, exposed as an `AuthorDto` with a combined name and
//! a derived age. The sort mapping bridges the two: `Name` expands to the two
//! stored name attributes, and `Age` maps onto `DateOfBirth` with the
//! direction reversed.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use carve::prelude::*;

#[derive(Clone)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub main_category: String,
}

impl_shaped!(Author, "Author", {
    "Id" => id,
    "FirstName" => first_name,
    "LastName" => last_name,
    "DateOfBirth" => date_of_birth,
    "MainCategory" => main_category,
});

#[derive(Clone)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i64,
    pub main_category: String,
}

impl_shaped!(AuthorDto, "AuthorDto", {
    "Id" => id,
    "Name" => name,
    "Age" => age,
    "MainCategory" => main_category,
});

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        let age = Utc::now()
            .date_naive()
            .years_since(author.date_of_birth.date_naive())
            .unwrap_or(0) as i64;
        AuthorDto {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age,
            main_category: author.main_category,
        }
    }
}

pub fn author(first: &str, last: &str, born: &str, category: &str) -> Author {
    Author {
        id: Uuid::new_v4(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: born.parse().expect("fixture date"),
        main_category: category.to_string(),
    }
}

/// The five-author roster used by most assertions
pub fn roster() -> Vec<Author> {
    vec![
        author("Berry", "Griffin", "1980-05-24T00:00:00Z", "Ships"),
        author("Nancy", "Swashbuckler", "1968-12-23T00:00:00Z", "Rum"),
        author("Eli", "Ivory", "1954-03-02T00:00:00Z", "Singing"),
        author("Arnold", "Able", "1994-11-23T00:00:00Z", "Rum"),
        author("Seabury", "Toxic", "1989-01-03T00:00:00Z", "Maps"),
    ]
}

pub fn registry() -> SortMappingRegistry {
    let mut registry = SortMappingRegistry::new();
    registry
        .register_for::<Author, AuthorDto>(
            SortMapping::new()
                .map("Id", &["Id"])
                .map("MainCategory", &["MainCategory"])
                .map_reversed("Age", &["DateOfBirth"])
                .map("Name", &["FirstName", "LastName"]),
        )
        .expect("fixture registry");
    registry
}

pub fn engine() -> ResourceEngine {
    ResourceEngine::new(Arc::new(registry()))
}

pub fn seeded_source() -> InMemorySource<Author> {
    InMemorySource::from_records(roster())
}

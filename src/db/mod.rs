mod sqlite;

pub use sqlite::{count_people, seed};

pub const PEOPLE_TABLE: &str = "people";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: i64,
}

/// Fixture rows, inserted in this order.
pub const SEED_PEOPLE: [(&str, i64); 2] = [("john", 8), ("mary", 54)];

pub fn seed_people() -> Vec<Person> {
    SEED_PEOPLE
        .iter()
        .map(|(name, age)| Person {
            name: name.to_string(),
            age: *age,
        })
        .collect()
}

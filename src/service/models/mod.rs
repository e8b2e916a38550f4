mod person;

pub use person::{seed_persons, IdPolicy, NewPerson, Person, PersonDetails, PersonId};

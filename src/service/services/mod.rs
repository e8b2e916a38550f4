mod person;

pub use person::PersonService;

mod person;

pub use person::PersonMemoryPersistence;

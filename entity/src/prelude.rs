pub use super::archive::Entity as Archive;

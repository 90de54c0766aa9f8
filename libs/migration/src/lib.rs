pub use sea_orm_migration::prelude::*;

mod m20261019_000000_create_users_and_authorities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261019_000000_create_users_and_authorities::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_registered_in_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["m20261019_000000_create_users_and_authorities"]);

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}

//! Sea-ORM entities for the `users` and `authorities` tables

pub mod user {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub username: String,
        /// Argon2 PHC string
        #[sea_orm(column_type = "Text")]
        pub password: String,
        pub enabled: bool,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::authority::Entity")]
        Authority,
    }

    impl Related<super::authority::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Authority.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod authority {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "authorities")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub username: String,
        /// Prefixed role, e.g. `ROLE_ADMIN`
        #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
        pub authority: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::Username",
            to = "super::user::Column::Username",
            on_delete = "Cascade"
        )]
        User,
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::User.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

use std::collections::BTreeSet;

use crate::models::Principal;

impl Principal {
    pub(crate) fn from_rows(user: user::Model, authorities: Vec<authority::Model>) -> Self {
        Self {
            username: user.username,
            password_hash: user.password,
            enabled: user.enabled,
            authorities: authorities
                .into_iter()
                .map(|row| row.authority)
                .collect::<BTreeSet<_>>(),
        }
    }

    pub(crate) fn authority_rows(&self) -> Vec<authority::ActiveModel> {
        use sea_orm::ActiveValue::Set;

        self.authorities
            .iter()
            .map(|authority| authority::ActiveModel {
                username: Set(self.username.clone()),
                authority: Set(authority.clone()),
            })
            .collect()
    }
}

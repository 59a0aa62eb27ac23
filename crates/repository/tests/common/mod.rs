//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use repository::{Criterion, Repository};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, QueryFilter,
    Schema, Select,
};
use serde_json::json;

pub mod member {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "members")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub status: String,
        pub age: i32,
        pub is_active: bool,
        pub deleted_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::post::Entity")]
        Post,
    }

    impl Related<super::post::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Post.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod post {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "posts")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub member_id: i32,
        pub title: String,
        pub published: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::member::Entity",
            from = "Column::MemberId",
            to = "super::member::Column::Id"
        )]
        Member,
    }

    impl Related<super::member::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Member.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Keeps only active members.
#[derive(Default)]
pub struct ActiveOnly;

impl Criterion<member::Entity> for ActiveOnly {
    fn apply(
        &self,
        query: Select<member::Entity>,
        _repository: &Repository<member::Entity>,
    ) -> Select<member::Entity> {
        query.filter(member::Column::IsActive.eq(true))
    }
}

/// Keeps members older than the given age.
pub struct OlderThan(pub i32);

impl Criterion<member::Entity> for OlderThan {
    fn apply(
        &self,
        query: Select<member::Entity>,
        _repository: &Repository<member::Entity>,
    ) -> Select<member::Entity> {
        query.filter(member::Column::Age.gt(self.0))
    }
}

/// Fresh in-memory database with the `members` and `posts` tables.
pub async fn setup_db() -> DatabaseConnection {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("repository=debug")
        .with_test_writer()
        .try_init();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should connect");

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    for statement in [
        schema.create_table_from_entity(member::Entity),
        schema.create_table_from_entity(post::Entity),
    ] {
        db.execute(backend.build(&statement))
            .await
            .expect("test table should be created");
    }

    db
}

/// Insert a member through the repository.
pub async fn insert_member(
    db: &DatabaseConnection,
    name: &str,
    status: &str,
    age: i32,
    is_active: bool,
) -> member::Model {
    Repository::<member::Entity>::new(db.clone())
        .create(json!({
            "name": name,
            "status": status,
            "age": age,
            "is_active": is_active,
        }))
        .await
        .expect("member should be created")
}

/// Five members: ages 20..=60, the first three active.
///
/// | name  | status   | age | active |
/// |-------|----------|-----|--------|
/// | ann   | approved | 20  | yes    |
/// | bob   | approved | 30  | yes    |
/// | cid   | pending  | 40  | yes    |
/// | dee   | pending  | 50  | no     |
/// | eve   | approved | 60  | no     |
pub async fn seed_members(db: &DatabaseConnection) -> Vec<member::Model> {
    let mut members = Vec::new();
    for (name, status, age, active) in [
        ("ann", "approved", 20, true),
        ("bob", "approved", 30, true),
        ("cid", "pending", 40, true),
        ("dee", "pending", 50, false),
        ("eve", "approved", 60, false),
    ] {
        members.push(insert_member(db, name, status, age, active).await);
    }
    members
}

/// Insert a post through the repository.
pub async fn insert_post(
    db: &DatabaseConnection,
    member_id: i32,
    title: &str,
    published: bool,
) -> post::Model {
    Repository::<post::Entity>::new(db.clone())
        .create(json!({
            "member_id": member_id,
            "title": title,
            "published": published,
        }))
        .await
        .expect("post should be created")
}

pub fn names(members: &[member::Model]) -> Vec<&str> {
    members.iter().map(|member| member.name.as_str()).collect()
}

//! Criteria, scope and query-lifecycle tests.

mod common;

use common::{member, names, seed_members, setup_db, ActiveOnly, OlderThan};
use repository::{Clause, Conditions, Criterion, Operator, Repository};
use sea_orm::{ColumnTrait, Order, QueryFilter, Select};

#[tokio::test]
async fn test_active_only_criterion_filters_every_read() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(ActiveOnly);

    assert_eq!(repo.all().await.unwrap().len(), 3);
    assert_eq!(repo.count().await.unwrap(), 3);
    // Criteria persist across terminal operations.
    assert_eq!(repo.all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_criteria_compose_in_push_order() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(ActiveOnly).push_criteria(OlderThan(25));
    let rows = repo.all().await.unwrap();

    assert_eq!(names(&rows), vec!["bob", "cid"]);
    assert_eq!(repo.get_criteria().len(), 2);
    assert!(repo.get_criteria()[0].is::<ActiveOnly>());
    assert!(repo.get_criteria()[1].is::<OlderThan>());
}

#[tokio::test]
async fn test_skip_criteria_keeps_the_list() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(ActiveOnly).skip_criteria(true);
    assert_eq!(repo.all().await.unwrap().len(), 5);
    assert_eq!(repo.get_criteria().len(), 1);

    repo.skip_criteria(false);
    assert_eq!(repo.all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_pop_criteria_removes_by_type() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(OlderThan(10))
        .push_criteria_type::<ActiveOnly>()
        .push_criteria(OlderThan(35));

    // Any instance pops every OlderThan, whatever its threshold.
    repo.pop_criteria(&OlderThan(99));

    assert_eq!(repo.get_criteria().len(), 1);
    assert!(repo.get_criteria()[0].is::<ActiveOnly>());
    assert_eq!(repo.all().await.unwrap().len(), 3);

    repo.pop_criteria_type::<ActiveOnly>();
    assert!(repo.get_criteria().is_empty());
    assert_eq!(repo.all().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_reset_criteria_clears_everything() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(ActiveOnly).push_criteria(OlderThan(30));
    repo.reset_criteria();

    assert!(repo.get_criteria().is_empty());
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_scope_applies_to_exactly_one_operation() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.scope_query(|query| query.filter(member::Column::Status.eq("pending")));
    assert!(repo.has_scope());

    assert_eq!(names(&repo.all().await.unwrap()), vec!["cid", "dee"]);
    assert!(!repo.has_scope());
    assert_eq!(repo.all().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_scope_runs_after_criteria() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(ActiveOnly);
    repo.scope_query(|query| query.filter(member::Column::Status.eq("pending")));

    assert_eq!(names(&repo.all().await.unwrap()), vec!["cid"]);
}

#[tokio::test]
async fn test_reset_scope_discards_it() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.scope_query(|query| query.filter(member::Column::Age.gt(100)));
    repo.reset_scope();

    assert!(!repo.has_scope());
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_apply_active_condition_scopes_the_next_read() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    let inactive = repo.apply_active_condition(false).unwrap().all().await.unwrap();

    assert_eq!(names(&inactive), vec!["dee", "eve"]);
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn test_shaping_does_not_leak_between_operations() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    let first = repo
        .order_by("age", Order::Desc)
        .unwrap()
        .first()
        .await
        .unwrap();
    assert_eq!(first.name, "eve");

    // The descending order was consumed by `first`.
    assert_eq!(repo.first().await.unwrap().name, "ann");
}

#[tokio::test]
async fn test_apply_conditions_and_reset_query() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.apply_conditions(&Conditions::new().eq("status", "approved"))
        .unwrap();
    repo.reset_query();
    assert_eq!(repo.count().await.unwrap(), 5);

    repo.apply_conditions(&Conditions::new().eq("status", "approved"))
        .unwrap();
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_tuple_and_scalar_conditions_are_conjunctive() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    let older: Conditions = [(
        "age",
        Clause::Compare {
            field: "age".to_string(),
            operator: ">".parse::<Operator>().unwrap(),
            value: 25i32.into(),
        },
    )]
    .into_iter()
    .collect();

    repo.apply_conditions(&older)
        .unwrap()
        .apply_conditions(&Conditions::new().eq("status", "approved"))
        .unwrap();
    let rows = repo.all().await.unwrap();

    assert_eq!(names(&rows), vec!["bob", "eve"]);
    assert!(rows.iter().all(|m| m.age > 25 && m.status == "approved"));
}

#[tokio::test]
async fn test_get_by_criteria_uses_only_the_given_criterion() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(ActiveOnly);
    let rows = repo.get_by_criteria(OlderThan(45)).await.unwrap();

    assert_eq!(names(&rows), vec!["dee", "eve"]);
    assert_eq!(repo.get_criteria().len(), 1);
}

/// Criterion that reads back from the repository it is applied through.
struct SameTable;

impl Criterion<member::Entity> for SameTable {
    fn apply(
        &self,
        query: Select<member::Entity>,
        repository: &Repository<member::Entity>,
    ) -> Select<member::Entity> {
        if repository.table_name() == "members" {
            query.filter(member::Column::Name.ne("ann"))
        } else {
            query
        }
    }
}

#[tokio::test]
async fn test_criteria_see_the_repository() {
    let db = setup_db().await;
    seed_members(&db).await;
    let mut repo = Repository::<member::Entity>::new(db);

    repo.push_criteria(SameTable);

    assert_eq!(repo.count().await.unwrap(), 4);
}

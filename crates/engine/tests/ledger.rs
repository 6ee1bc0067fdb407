use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    AllocationPolicy, Engine, EngineError, EqualRounding, ExpenseCmd, Member, MoneyCents, Share,
};
use migration::MigratorTrait;

async fn engine_with_policy(policy: AllocationPolicy) -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .policy(policy)
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    engine_with_policy(AllocationPolicy::default()).await
}

async fn count_rows(db: &DatabaseConnection, table: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM {table}"),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "n").unwrap()
}

async fn group_with_members(engine: &Engine, names: &[&str]) -> (i64, Vec<Member>) {
    let group = engine.create_group("Trip").await.unwrap();
    let mut members = Vec::new();
    for name in names {
        members.push(engine.create_member(group.id, name).await.unwrap());
    }
    (group.id, members)
}

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

#[tokio::test]
async fn groups_are_trimmed_and_listed_newest_first() {
    let (engine, _db) = engine_with_db().await;

    let first = engine.create_group("  Flat  ").await.unwrap();
    let second = engine.create_group("Holiday").await.unwrap();
    assert_eq!(first.name, "Flat");

    let groups = engine.list_groups().await.unwrap();
    let ids: Vec<i64> = groups.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    assert_eq!(engine.group(first.id).await.unwrap().name, "Flat");
}

#[tokio::test]
async fn blank_names_persist_nothing() {
    let (engine, db) = engine_with_db().await;

    let err = engine.create_group("   ").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
    assert_eq!(count_rows(&db, "groups").await, 0);

    let group = engine.create_group("Flat").await.unwrap();
    let err = engine.create_member(group.id, " \t ").await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
    assert_eq!(count_rows(&db, "members").await, 0);
}

#[tokio::test]
async fn members_require_an_existing_group() {
    let (engine, db) = engine_with_db().await;

    let err = engine.create_member(42, "Anna").await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("group 42".to_string()));
    assert_eq!(count_rows(&db, "members").await, 0);

    assert!(matches!(
        engine.list_members(42).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.compute_balances(42).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn members_are_listed_in_insertion_order_per_group() {
    let (engine, _db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno", "Carla"]).await;
    let other = engine.create_group("Other").await.unwrap();
    engine.create_member(other.id, "Dario").await.unwrap();

    let listed = engine.list_members(group_id).await.unwrap();
    let summary = |list: &[Member]| {
        list.iter()
            .map(|m| (m.id, m.group_id, m.name.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(listed.as_slice()), summary(members.as_slice()));
}

#[tokio::test]
async fn equal_split_reproduces_uniform_rounding() {
    let (engine, _db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno", "Carla"]).await;

    let detail = engine
        .create_expense(ExpenseCmd::new(group_id, cents(1000), members[0].id).title("Pizza"))
        .await
        .unwrap();

    let shares: Vec<i64> = detail.splits.iter().map(|s| s.split.share.cents()).collect();
    assert_eq!(shares, vec![333, 333, 333]);
    assert_eq!(detail.allocated(), cents(999));
    assert_eq!(detail.payer_name.as_deref(), Some("Anna"));
    assert_eq!(detail.expense.title, "Pizza");
}

#[tokio::test]
async fn balances_after_equal_split_net_to_zero_within_tolerance() {
    let (engine, _db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno", "Carla"]).await;
    let payer = &members[0];

    let detail = engine
        .create_expense(ExpenseCmd::new(group_id, cents(10000), payer.id))
        .await
        .unwrap();
    let payer_share = detail
        .splits
        .iter()
        .find(|s| s.split.member_id == payer.id)
        .unwrap()
        .split
        .share;

    let balances = engine.compute_balances(group_id).await.unwrap();
    let ids: Vec<i64> = balances.iter().map(|b| b.member.id).collect();
    assert_eq!(ids, members.iter().map(|m| m.id).collect::<Vec<_>>());
    assert_eq!(balances[0].balance, cents(10000) - payer_share);

    let total: MoneyCents = balances.iter().map(|b| b.balance).sum();
    assert!(total.cents().abs() * 2 <= members.len() as i64);
}

#[tokio::test]
async fn distributed_remainder_balances_net_to_exactly_zero() {
    let policy = AllocationPolicy {
        equal_rounding: EqualRounding::DistributeRemainder,
        ..AllocationPolicy::default()
    };
    let (engine, _db) = engine_with_policy(policy).await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno", "Carla"]).await;

    let detail = engine
        .create_expense(ExpenseCmd::new(group_id, cents(10000), members[0].id))
        .await
        .unwrap();
    let shares: Vec<i64> = detail.splits.iter().map(|s| s.split.share.cents()).collect();
    assert_eq!(shares, vec![3334, 3333, 3333]);

    let balances = engine.compute_balances(group_id).await.unwrap();
    let amounts: Vec<i64> = balances.iter().map(|b| b.balance.cents()).collect();
    assert_eq!(amounts, vec![6666, -3333, -3333]);
}

#[tokio::test]
async fn invalid_amounts_persist_nothing() {
    let (engine, db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna"]).await;

    for amount in [0, -500] {
        let err = engine
            .create_expense(ExpenseCmd::new(group_id, cents(amount), members[0].id))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }
    assert_eq!(count_rows(&db, "expenses").await, 0);
    assert_eq!(count_rows(&db, "splits").await, 0);
}

#[tokio::test]
async fn empty_group_rejects_expenses() {
    let (engine, db) = engine_with_db().await;
    let group = engine.create_group("Empty").await.unwrap();

    let err = engine
        .create_expense(ExpenseCmd::new(group.id, cents(1000), 1))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NoMembers(group.id));
    assert_eq!(count_rows(&db, "expenses").await, 0);
    assert_eq!(count_rows(&db, "splits").await, 0);

    assert!(engine.compute_balances(group.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_split_insert_rolls_back_the_expense() {
    let (engine, db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno"]).await;

    db.execute_unprepared("DROP TABLE splits").await.unwrap();

    let err = engine
        .create_expense(ExpenseCmd::new(group_id, cents(1000), members[0].id).title("Dinner"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Database(_)));
    assert_eq!(count_rows(&db, "expenses").await, 0);
}

#[tokio::test]
async fn overflowing_balances_are_an_error() {
    let (engine, _db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna"]).await;

    let big = cents(i64::MAX / 2 + 1);
    for _ in 0..2 {
        engine
            .create_expense(ExpenseCmd::new(group_id, big, members[0].id))
            .await
            .unwrap();
    }

    let err = engine.compute_balances(group_id).await.unwrap_err();
    assert!(matches!(err, EngineError::Inconsistent(_)));
}

#[tokio::test]
async fn payer_must_belong_to_the_group() {
    let (engine, db) = engine_with_db().await;
    let (group_id, _members) = group_with_members(&engine, &["Anna", "Bruno"]).await;
    let (_, strangers) = group_with_members(&engine, &["Zoe"]).await;

    let err = engine
        .create_expense(ExpenseCmd::new(group_id, cents(1000), strangers[0].id))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidPayer(_)));
    assert_eq!(count_rows(&db, "expenses").await, 0);
}

#[tokio::test]
async fn explicit_shares_are_validated_before_writing() {
    let (engine, db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno"]).await;
    let (_, strangers) = group_with_members(&engine, &["Zoe"]).await;

    let mismatch = ExpenseCmd::new(group_id, cents(1000), members[0].id).shares(vec![
        Share::new(members[0].id, cents(400)),
        Share::new(members[1].id, cents(400)),
    ]);
    assert!(matches!(
        engine.create_expense(mismatch).await,
        Err(EngineError::InvalidSplit(_))
    ));

    let outsider = ExpenseCmd::new(group_id, cents(1000), members[0].id).shares(vec![
        Share::new(members[0].id, cents(500)),
        Share::new(strangers[0].id, cents(500)),
    ]);
    assert!(matches!(
        engine.create_expense(outsider).await,
        Err(EngineError::InvalidSplit(_))
    ));

    let empty = ExpenseCmd::new(group_id, cents(1000), members[0].id).shares(vec![]);
    assert!(matches!(
        engine.create_expense(empty).await,
        Err(EngineError::InvalidSplit(_))
    ));

    assert_eq!(count_rows(&db, "expenses").await, 0);
    assert_eq!(count_rows(&db, "splits").await, 0);
}

#[tokio::test]
async fn explicit_shares_drive_balances() {
    let (engine, _db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno", "Carla"]).await;

    engine
        .create_expense(
            ExpenseCmd::new(group_id, cents(9000), members[1].id)
                .title("Groceries")
                .shares(vec![
                    Share::new(members[0].id, cents(6000)),
                    Share::new(members[2].id, cents(3000)),
                ]),
        )
        .await
        .unwrap();

    let balances = engine.compute_balances(group_id).await.unwrap();
    let amounts: Vec<i64> = balances.iter().map(|b| b.balance.cents()).collect();
    assert_eq!(amounts, vec![-6000, 9000, -3000]);
}

#[tokio::test]
async fn expenses_are_listed_newest_first_with_names() {
    let (engine, _db) = engine_with_db().await;
    let (group_id, members) = group_with_members(&engine, &["Anna", "Bruno"]).await;

    let older = engine
        .create_expense(ExpenseCmd::new(group_id, cents(2000), members[0].id).title("Taxi"))
        .await
        .unwrap();
    let newer = engine
        .create_expense(ExpenseCmd::new(group_id, cents(1500), members[1].id).title("Museum"))
        .await
        .unwrap();

    let listed = engine.list_expenses(group_id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|d| d.expense.id).collect();
    assert_eq!(ids, vec![newer.expense.id, older.expense.id]);
    assert_eq!(listed[0].splits, newer.splits);
    assert_eq!(listed[1].expense.amount, cents(2000));
    assert_eq!(listed[0].payer_name.as_deref(), Some("Bruno"));
    let split_names: Vec<Option<&str>> = listed[0]
        .splits
        .iter()
        .map(|s| s.member_name.as_deref())
        .collect();
    assert_eq!(split_names, vec![Some("Anna"), Some("Bruno")]);
}

#[tokio::test]
async fn balances_conserve_money_across_many_expenses() {
    let (engine, _db) = engine_with_policy(AllocationPolicy {
        equal_rounding: EqualRounding::DistributeRemainder,
        ..AllocationPolicy::default()
    })
    .await;
    let (group_id, members) =
        group_with_members(&engine, &["Anna", "Bruno", "Carla", "Dario"]).await;

    for (idx, amount) in [1001, 250, 9999, 3, 4200].into_iter().enumerate() {
        let payer = &members[idx % members.len()];
        engine
            .create_expense(ExpenseCmd::new(group_id, cents(amount), payer.id))
            .await
            .unwrap();
    }

    let balances = engine.compute_balances(group_id).await.unwrap();
    let total: MoneyCents = balances.iter().map(|b| b.balance).sum();
    assert_eq!(total, MoneyCents::ZERO);
}

use oneflow::{CastMode, ColumnValues, Columns, DalError, ErrorKind, SortDirection};
use serde_json::Value;

use crate::common::{Fixture, by_id, ident};

async fn add_vehicle(db: &oneflow::Database, plate: &str, brand: &str, mileage: &str, date: &str) {
    let row = ColumnValues::new(
        vec!["plate", "brand", "mileage", "inspected_on"],
        vec![plate, brand, mileage, date],
    )
    .unwrap();
    db.insert(&ident("vehicles"), &row).await.unwrap();
}

#[tokio::test]
async fn test_vehicle_lifecycle() {
    let fixture = Fixture::new().await;
    let db = fixture.database();
    let vehicles = ident("vehicles");

    add_vehicle(&db, "AB-100", "Seat", "1200", "01/05/2024").await;
    add_vehicle(&db, "AB-200", "Fiat", "800", "20/11/2023").await;
    assert_eq!(fixture.count("vehicles").await, 2);

    let found = db
        .select_one_where(&vehicles, &ident("plate"), "200", &by_id(SortDirection::Asc))
        .await
        .unwrap()
        .expect("AB-200 should match");
    assert_eq!(found["brand"], Value::String("Fiat".to_string()));

    db.update(
        &vehicles,
        &ident("plate"),
        "AB-200",
        &ident("brand"),
        "Lancia",
        &by_id(SortDirection::Desc),
    )
    .await
    .unwrap();

    let all = db
        .select_all(&vehicles, &Columns::parse(&["brand"]).unwrap(), &by_id(SortDirection::Asc))
        .await
        .unwrap();
    let brands: Vec<_> = all.iter().map(|r| r["brand"].clone()).collect();
    assert_eq!(brands, vec![Value::from("Seat"), Value::from("Lancia")]);

    let removed = db
        .delete(&vehicles, &ColumnValues::single("plate", "AB-100").unwrap())
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(fixture.count("vehicles").await, 1);
}

#[tokio::test]
async fn test_numeric_and_date_ordering() {
    let fixture = Fixture::new().await;
    let db = fixture.database();
    let vehicles = ident("vehicles");

    add_vehicle(&db, "P1", "A", "90", "15/01/2024").await;
    add_vehicle(&db, "P2", "B", "1000", "30/06/2022").await;
    add_vehicle(&db, "P3", "C", "250", "01/03/2023").await;

    let numeric = oneflow::Ordering::new(ident("mileage"), SortDirection::Asc)
        .with_cast(CastMode::Numeric);
    let rows = db
        .select_all(&vehicles, &Columns::All, &numeric)
        .await
        .unwrap();
    let plates: Vec<_> = rows.iter().map(|r| r["plate"].clone()).collect();
    assert_eq!(plates, vec![Value::from("P1"), Value::from("P3"), Value::from("P2")]);

    let by_date = oneflow::Ordering::new(ident("inspected_on"), SortDirection::Desc)
        .with_cast(CastMode::Date);
    let rows = db
        .select_all(&vehicles, &Columns::All, &by_date)
        .await
        .unwrap();
    let plates: Vec<_> = rows.iter().map(|r| r["plate"].clone()).collect();
    assert_eq!(plates, vec![Value::from("P1"), Value::from("P3"), Value::from("P2")]);
}

#[tokio::test]
async fn test_empty_table_is_not_an_error() {
    let fixture = Fixture::new().await;
    let rows = fixture
        .database()
        .select_all(&ident("drivers"), &Columns::All, &by_id(SortDirection::Asc))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_unknown_table_is_a_query_failure() {
    let fixture = Fixture::new().await;
    let err = fixture
        .database()
        .select_all(&ident("trailers"), &Columns::All, &by_id(SortDirection::Asc))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::QueryFailed);
    assert!(!err.public_message().contains("trailers"));
}

#[tokio::test]
async fn test_update_without_match_reports_not_found() {
    let fixture = Fixture::new().await;
    let err = fixture
        .database()
        .update(
            &ident("vehicles"),
            &ident("plate"),
            "ZZ-999",
            &ident("brand"),
            "Nobody",
            &by_id(SortDirection::Desc),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DalError::NotFound));
}

#[tokio::test]
async fn test_values_cannot_alter_statements() {
    let fixture = Fixture::new().await;
    let db = fixture.database();
    let hostile = "x'); DROP TABLE vehicles; --";

    add_vehicle(&db, hostile, "Evil", "1", "01/01/2024").await;
    assert_eq!(fixture.count("vehicles").await, 1);

    let exists = db
        .exists(&ident("vehicles"), &ident("plate"), hostile, &by_id(SortDirection::Asc))
        .await
        .unwrap();
    assert!(exists);
}

#[test]
fn test_hostile_identifiers_are_rejected() {
    for name in ["vehicles; DROP TABLE x", "a`b", "", "plate name", "drivers--"] {
        assert!(oneflow::Identifier::parse(name).is_err(), "{name:?} accepted");
    }
}

// Property-based tests for the station name mapping and the schema
// catalog that guards column identifiers.

use proptest::prelude::*;

use horarios_api::config::Settings;
use horarios_api::db::schema::station_to_column;
use horarios_api::db::{DbPool, StationCatalog, TableVariant};

fn test_catalog() -> StationCatalog {
    let settings = Settings::default();
    StationCatalog::new(DbPool::connect_lazy(&settings.database))
}

// For any station display name, the column form has no spaces, keeps the
// length, and round-trips back to the name when the input itself carries
// no underscores.
#[test]
fn property_station_mapping_replaces_every_space() {
    proptest!(|(name in "[A-Za-z ]{1,30}")| {
        let column = station_to_column(&name);

        prop_assert!(!column.contains(' '));
        prop_assert_eq!(column.chars().count(), name.chars().count());
        prop_assert_eq!(column.replace('_', " "), name);
    });
}

// Names without spaces pass through untouched.
#[test]
fn property_spaceless_names_are_unchanged() {
    proptest!(|(name in "[A-Za-z_]{1,30}")| {
        prop_assert_eq!(station_to_column(&name), name);
    });
}

// For any column set and any probe name, the catalog resolves the probe
// exactly when its column form matches a known column, ignoring case.
#[test]
fn property_catalog_accepts_exactly_the_known_columns() {
    let rt = tokio::runtime::Runtime::new().unwrap();

    proptest!(|(
        columns in prop::collection::hash_set("[A-Za-z][A-Za-z0-9_]{0,20}", 1..8),
        probe in "[A-Za-z][A-Za-z0-9 _]{0,20}",
    )| {
        let known = columns.clone();
        let expected = known
            .iter()
            .any(|c| c.to_lowercase() == station_to_column(&probe).to_lowercase());

        let resolved = rt.block_on(async {
            let catalog = test_catalog();
            catalog
                .set_columns(TableVariant::OutboundWeekday, known.clone())
                .await;
            catalog
                .resolve(TableVariant::OutboundWeekday, &probe)
                .await
        });

        prop_assert_eq!(resolved.is_ok(), expected);
    });
}

// Resolving any case-scrambled, space-separated spelling of a known
// column yields that column's canonical identifier.
#[test]
fn property_catalog_restores_canonical_casing() {
    let rt = tokio::runtime::Runtime::new().unwrap();

    proptest!(|(
        columns in prop::collection::hash_set("[A-Za-z][A-Za-z0-9_]{0,20}", 1..8),
        pick in 0..8usize,
    )| {
        let columns: Vec<String> = columns.into_iter().collect();
        let canonical = columns[pick % columns.len()].clone();
        let display = canonical.to_uppercase().replace('_', " ");

        let resolved = rt.block_on(async {
            let catalog = test_catalog();
            catalog
                .set_columns(TableVariant::OutboundWeekday, columns.clone())
                .await;
            catalog
                .resolve(TableVariant::OutboundWeekday, &display)
                .await
        });

        let column = resolved.unwrap();
        prop_assert_eq!(
            column.as_str().to_lowercase(),
            canonical.to_lowercase()
        );
    });
}

// A column loaded for one table says nothing about the others: each
// variant keeps its own allow-list.
#[test]
fn property_catalog_scopes_columns_per_table() {
    let rt = tokio::runtime::Runtime::new().unwrap();

    proptest!(|(column in "[A-Za-z][A-Za-z0-9_]{0,20}")| {
        let (own, other) = rt.block_on(async {
            let catalog = test_catalog();
            catalog
                .set_columns(TableVariant::OutboundSaturday, [column.clone()])
                .await;
            catalog
                .set_columns(TableVariant::ReturnSaturday, Vec::<String>::new())
                .await;

            (
                catalog
                    .resolve(TableVariant::OutboundSaturday, &column)
                    .await,
                catalog.resolve(TableVariant::ReturnSaturday, &column).await,
            )
        });

        prop_assert!(own.is_ok());
        prop_assert!(other.is_err());
    });
}

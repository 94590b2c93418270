use assert_matches::assert_matches;

use geodata_fetch::domain::{AdminLevel, StateFips};
use geodata_fetch::error::GeodataError;
use geodata_fetch::query::build_query;

#[test]
fn block_group_query() {
    let codes = ["B01001_001E", "B01001_002E", "NAME"];
    let query = build_query(
        AdminLevel::BlockGroup,
        &[StateFips::new(12), StateFips::new(13)],
        &codes,
    )
    .unwrap();
    assert_eq!(query.get_clause, "B01001_001E,B01001_002E,NAME");
    assert_eq!(query.for_clause, "block_group:*");
    assert_eq!(query.in_clause, "state:12,13&in=county:*&in=tract:*");
    assert!(query.in_clause.ends_with("&in=county:*&in=tract:*"));
}

#[test]
fn tract_and_place_have_state_scope_only() {
    for level in [AdminLevel::Tract, AdminLevel::Place, AdminLevel::County] {
        let query = build_query(level, &[StateFips::new(6)], &["NAME"]).unwrap();
        assert_eq!(query.in_clause, "state:06");
        assert_eq!(query.for_clause, format!("{level}:*"));
    }
}

#[test]
fn empty_state_list_is_rejected() {
    let err = build_query(AdminLevel::County, &[], &["NAME"]).unwrap_err();
    assert_matches!(err, GeodataError::EmptyStateList);
    assert!(err.is_configuration());
}

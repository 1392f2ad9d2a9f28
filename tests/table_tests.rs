//! Integration tests for applying associations to tables.

use entity_match::{associate, remove_dupes, replace_entities, Table, TableErrorKind};

fn cell(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn kills_table() -> Table {
    Table::from_rows(
        ["round", "attacker", "victim"],
        vec![
            vec![cell("1"), cell("Alexnder"), cell("Bob")],
            vec![cell("1"), cell("Alex"), cell("")],
            vec![cell("2"), None, cell("Alexnder")],
            vec![cell("2"), cell("stranger"), cell("Alex")],
        ],
    )
    .unwrap()
}

#[test]
fn test_replace_entities_in_place() {
    let assoc = associate(
        &[Some("Alex"), Some("Alexnder"), Some("")],
        &["Alexander", "Robert"],
        "levenshtein",
    )
    .unwrap();
    let mut table = kills_table();

    let replaced = replace_entities(&mut table, "attacker", &assoc).unwrap();

    // Alexnder and Alex; the missing cell stays missing and "stranger" is not a key
    assert_eq!(replaced, 2);
    assert_eq!(
        table.column_values("attacker").unwrap(),
        vec![Some("Robert"), Some("Alexander"), None, Some("stranger")]
    );
    // other columns untouched
    assert_eq!(
        table.column_values("victim").unwrap(),
        vec![Some("Bob"), Some(""), Some("Alexnder"), Some("Alex")]
    );
}

#[test]
fn test_replace_empty_string_becomes_missing() {
    let assoc = associate(&[Some("")], &["Alexander"], "jaro").unwrap();
    let mut table = kills_table();
    replace_entities(&mut table, "victim", &assoc).unwrap();
    assert_eq!(table.column_values("victim").unwrap()[1], None);
}

#[test]
fn test_replace_counts_only_changed_cells() {
    let assoc = associate(&[Some("Alexander"), Some("")], &["Alexander"], "lcss").unwrap();
    let mut table = Table::from_rows(
        ["attacker"],
        vec![vec![cell("Alexander")], vec![None], vec![cell("")]],
    )
    .unwrap();

    let replaced = replace_entities(&mut table, "attacker", &assoc).unwrap();

    // identity match and missing-to-missing are no-ops; only "" changes
    assert_eq!(replaced, 1);
    assert_eq!(
        table.column_values("attacker").unwrap(),
        vec![Some("Alexander"), None, None]
    );
}

#[test]
fn test_replace_unknown_column() {
    let assoc = associate(&[Some("Alex")], &["Alexander"], "lcss").unwrap();
    let mut table = kills_table();
    let before = table.clone();

    let err = replace_entities(&mut table, "PlayerName", &assoc).unwrap_err();

    assert_eq!(
        err.table_kind(),
        Some(&TableErrorKind::ColumnNotFound("PlayerName".to_string()))
    );
    assert_eq!(table, before);
}

#[test]
fn test_remove_dupes_first_per_group() {
    let table = kills_table();
    let deduped = remove_dupes(&table, &["round"]).unwrap();

    assert_eq!(deduped.columns(), ["round", "attacker", "victim"]);
    assert_eq!(
        deduped.rows(),
        [
            vec![cell("1"), cell("Alexnder"), cell("Bob")],
            vec![cell("2"), None, cell("Alexnder")],
        ]
    );
}

#[test]
fn test_remove_dupes_sorted_keys_first() {
    let table = Table::from_rows(
        ["tick", "player"],
        vec![
            vec![cell("30"), cell("zeus")],
            vec![cell("10"), cell("amy")],
            vec![cell("20"), cell("zeus")],
            vec![cell("40"), None],
        ],
    )
    .unwrap();

    let deduped = remove_dupes(&table, &["player"]).unwrap();

    assert_eq!(deduped.columns(), ["player", "tick"]);
    assert_eq!(
        deduped.rows(),
        [
            vec![cell("amy"), cell("10")],
            vec![cell("zeus"), cell("30")],
        ]
    );
}

#[test]
fn test_remove_dupes_unknown_column() {
    let err = remove_dupes(&kills_table(), &["round", "map"]).unwrap_err();
    assert_eq!(
        err.table_kind(),
        Some(&TableErrorKind::ColumnNotFound("map".to_string()))
    );
}

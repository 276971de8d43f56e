use super::*;
use crate::{error::ErrorClass, test_support::capture_logs};
use proptest::prelude::*;

fn ids_of(table: &Table) -> Vec<u64> {
    table.select_all().map(|r| r.id().get()).collect()
}

fn names_of(table: &Table) -> Vec<String> {
    table.select_all().map(|r| r.name().to_string()).collect()
}

#[test]
fn new_table_is_empty() {
    let table = Table::new();

    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert_eq!(table.name(), "Employee");
    assert_eq!(table.next_identity(), RecordId::new(1));
    assert_eq!(table.select_all().count(), 0);
}

#[test]
fn insert_then_select_roundtrip() {
    let mut table = Table::new();
    let id = table.insert("Sagar", "Pune", 11_000).id();

    let record = table.select_by_identity(id).unwrap();
    assert_eq!(record.id(), id);
    assert_eq!(record.name(), "Sagar");
    assert_eq!(record.address(), "Pune");
    assert_eq!(record.salary(), 11_000);
}

#[test]
fn insert_appends_in_order() {
    let mut table = Table::new();
    table.insert("A", "x", 1);
    table.insert("B", "y", 2);
    table.insert("C", "z", 3);

    assert_eq!(ids_of(&table), [1, 2, 3]);
    assert_eq!(names_of(&table), ["A", "B", "C"]);
    assert_eq!(table.next_identity(), RecordId::new(4));
}

#[test]
fn insert_allows_duplicate_fields() {
    let mut table = Table::new();
    let a = table.insert("Sagar", "Pune", 11_000).id();
    let b = table.insert("Sagar", "Pune", 11_000).id();

    assert_ne!(a, b);
    assert_eq!(table.len(), 2);
}

#[test]
fn select_all_reflects_current_state() {
    let mut table = Table::new();
    table.insert("A", "x", 1);
    assert_eq!(table.select_all().len(), 1);

    table.insert("B", "y", 2);
    assert_eq!(table.select_all().len(), 2);
}

#[test]
fn select_by_identity_miss_is_none() {
    let mut table = Table::new();
    table.insert("A", "x", 1);

    assert!(table.select_by_identity(RecordId::new(2)).is_none());
    assert!(table.select_by_identity(RecordId::new(0)).is_none());
}

#[test]
fn select_by_name_returns_all_matches_in_order() {
    let mut table = Table::new();
    table.insert("A", "first", 1);
    table.insert("B", "x", 2);
    table.insert("A", "second", 3);

    let rows = table.select_by_name("A");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.ids(), [RecordId::new(1), RecordId::new(3)]);
    assert_eq!(rows.first().unwrap().address(), "first");

    let addresses: Vec<&str> = rows.into_iter().map(Record::address).collect();
    assert_eq!(addresses, ["first", "second"]);
}

#[test]
fn select_by_name_is_exact_and_case_sensitive() {
    let mut table = Table::new();
    table.insert("Sagar", "Pune", 1);

    assert!(table.select_by_name("sagar").is_empty());
    assert!(table.select_by_name("Sag").is_empty());
    assert!(table.select_by_name("Sagar ").is_empty());
    assert_eq!(table.select_by_name("Sagar").len(), 1);
}

#[test]
fn select_by_name_miss_is_empty() {
    let table = Table::new();
    let rows = table.select_by_name("nobody");

    assert!(rows.is_empty());
    assert!(rows.first().is_none());
    assert!(rows.to_records().is_empty());
}

#[test]
fn delete_by_identity_removes_exactly_one() {
    let mut table = Table::new();
    table.insert("A", "x", 1);
    let target = table.insert("B", "y", 2).id();
    table.insert("C", "z", 3);

    let removed = table.delete_by_identity(target).unwrap();

    assert_eq!(removed.name(), "B");
    assert_eq!(table.count(), 2);
    assert!(table.select_by_identity(target).is_none());
    assert_eq!(ids_of(&table), [1, 3]);
    assert_eq!(names_of(&table), ["A", "C"]);
}

#[test]
fn delete_by_identity_miss_is_noop() {
    let mut table = Table::new();
    table.insert("A", "x", 1);

    let err = table.delete_by_identity(RecordId::new(9)).unwrap_err();

    assert_eq!(err.class(), ErrorClass::NotFound);
    assert_eq!(
        err,
        TableError::NotFound {
            table: "Employee".to_string(),
            key: LookupKey::Identity(RecordId::new(9)),
        }
    );
    assert_eq!(table.len(), 1);
    assert_eq!(ids_of(&table), [1]);
}

#[test]
fn delete_by_identity_twice_reports_not_found() {
    let mut table = Table::new();
    let id = table.insert("A", "x", 1).id();

    table.delete_by_identity(id).unwrap();
    assert!(table.delete_by_identity(id).unwrap_err().is_not_found());
}

#[test]
fn delete_by_name_removes_first_match_only() {
    let mut table = Table::new();
    table.insert("A", "first", 1);
    table.insert("A", "second", 2);
    table.insert("B", "x", 3);

    assert_eq!(table.select_by_name("A").len(), 2);

    let removed = table.delete_by_name("A").unwrap();

    assert_eq!(removed.address(), "first");
    let remaining = table.select_by_name("A");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.ids(), [RecordId::new(2)]);
    assert_eq!(table.select_by_name("B").ids(), [RecordId::new(3)]);
    assert_eq!(ids_of(&table), [2, 3]);
}

#[test]
fn delete_by_name_miss_is_noop() {
    let mut table = Table::new();
    table.insert("A", "x", 1);

    let err = table.delete_by_name("a").unwrap_err();

    assert_eq!(
        err,
        TableError::NotFound {
            table: "Employee".to_string(),
            key: LookupKey::Name("a".to_string()),
        }
    );
    assert_eq!(names_of(&table), ["A"]);
}

#[test]
fn identities_are_not_reused_after_delete() {
    let mut table = Table::new();
    table.insert("A", "x", 1);
    let last = table.insert("B", "y", 2).id();

    table.delete_by_identity(last).unwrap();
    let next = table.insert("C", "z", 3).id();

    assert_eq!(next, RecordId::new(3));
    assert_eq!(ids_of(&table), [1, 3]);
}

#[test]
fn tables_do_not_share_identity_counters() {
    let mut a = Table::new();
    let mut b = Table::new();

    a.insert("A", "x", 1);
    a.insert("A", "x", 1);

    assert_eq!(b.insert("B", "y", 2).id(), RecordId::new(1));
}

#[test]
fn render_lists_header_and_rows() {
    let mut table = Table::new();
    table.insert("Sagar", "Pune", 11_000);
    table.insert("Amit", "Mumbai", 12_000);

    let rendered = table.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], RULE);
    assert_eq!(lines[1], HEADER);
    assert_eq!(lines[3], "1\tSagar\tPune\t11000");
    assert_eq!(lines[4], "2\tAmit\tMumbai\t12000");
    assert_eq!(lines[5], RULE);
}

#[test]
fn close_releases_rows() {
    let mut table = Table::new();
    table.insert("A", "x", 1);
    table.insert("B", "y", 2);

    assert_eq!(table.close(), 2);
}

#[test]
fn config_names_the_table() {
    let config = EngineConfig::default().with_table("Staff").with_debug(true);
    let mut table = Table::try_with_config(config).unwrap();
    table.insert("A", "x", 1);

    let err = table.delete_by_name("Z").unwrap_err();
    assert_eq!(err.to_string(), "Staff: no record with name 'Z'");
}

#[test]
fn invalid_config_is_rejected() {
    let config = EngineConfig::default().with_table("");

    assert!(matches!(
        Table::try_with_config(config),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn try_with_config_rejects_invalid_table_names() {
    for table in ["", "Employé"] {
        let config = EngineConfig::default().with_table(table);
        assert!(Table::try_with_config(config).is_err());
    }
}

#[test]
fn reset_metrics_zeroes_table_counters() {
    let mut table = Table::new();
    table.insert("A", "x", 1);
    let _ = table.delete_by_name("nobody");
    let _ = table.sum();
    assert_eq!(table.metrics().unwrap().inserts, 1);

    table.reset_metrics();
    assert_eq!(table.metrics().unwrap(), MetricsSnapshot::default());

    table.insert("B", "y", 2);
    assert_eq!(table.metrics().unwrap().inserts, 1);
}

#[test]
fn reset_metrics_is_noop_when_disabled() {
    let table = Table::with_config(EngineConfig::default().with_metrics(false));
    table.reset_metrics();

    assert!(table.metrics().is_none());
}

#[test]
fn mutations_are_counted_in_metrics() {
    let mut table = Table::new();
    let id = table.insert("A", "x", 1).id();
    table.insert("B", "y", 2);
    table.insert("C", "z", 3);

    let _ = table.select_by_identity(RecordId::new(2));
    let _ = table.select_by_name("C");
    table.delete_by_identity(id).unwrap();
    let _ = table.delete_by_name("nobody");

    let metrics = table.metrics().unwrap();
    assert_eq!(metrics.inserts, 3);
    assert_eq!(metrics.scans, 2);
    assert_eq!(metrics.rows_scanned, 2 + 3);
    assert_eq!(metrics.deletes, 1);
    assert_eq!(metrics.delete_misses, 1);
}

///
/// Operation
/// Random workload step for the identity property test.
///

#[derive(Clone, Debug)]
enum Operation {
    Insert(String),
    DeleteId(u64),
    DeleteName(String),
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![Just("A".to_string()), Just("B".to_string()), Just("C".to_string())]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => arb_name().prop_map(Operation::Insert),
        1 => (1u64..40).prop_map(Operation::DeleteId),
        1 => arb_name().prop_map(Operation::DeleteName),
    ]
}

proptest! {
    #[test]
    fn identities_stay_unique_and_ordered(ops in prop::collection::vec(arb_operation(), 0..60)) {
        let mut table = Table::new();
        let mut issued: Vec<RecordId> = Vec::new();

        for op in ops {
            match op {
                Operation::Insert(name) => {
                    let id = table.insert(name, "addr", 1).id();
                    if let Some(last) = issued.last() {
                        prop_assert!(id > *last);
                    }
                    issued.push(id);
                }
                Operation::DeleteId(id) => {
                    let before = table.len();
                    let existed = table.select_by_identity(RecordId::new(id)).is_some();
                    let result = table.delete_by_identity(RecordId::new(id));

                    prop_assert_eq!(result.is_ok(), existed);
                    prop_assert_eq!(table.len(), if existed { before - 1 } else { before });
                }
                Operation::DeleteName(name) => {
                    let before = table.select_by_name(&name).ids();
                    let result = table.delete_by_name(&name);
                    let after = table.select_by_name(&name).ids();

                    match result {
                        Ok(removed) => {
                            prop_assert_eq!(removed.id(), before[0]);
                            prop_assert_eq!(&after[..], &before[1..]);
                        }
                        Err(err) => {
                            prop_assert!(err.is_not_found());
                            prop_assert!(before.is_empty());
                        }
                    }
                }
            }

            // survivors remain in insertion order
            let ids: Vec<RecordId> = table.select_all().map(Record::id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn not_found_delete_logs_a_warning() {
    let mut table = Table::new();
    table.insert("A", "x", 1);

    let (result, logs) = capture_logs(|| table.delete_by_name("nobody"));

    assert!(result.unwrap_err().is_not_found());
    assert!(logs.contains("WARN"));
    assert!(logs.contains("unable to delete: record not present"));
    assert!(logs.contains("not_found: Employee: no record with name 'nobody'"));
}

#[test]
fn debug_flag_logs_each_mutation() {
    let config = EngineConfig::default().with_debug(true);

    let ((), logs) = capture_logs(|| {
        let mut table = Table::try_with_config(config).unwrap();
        let id = table.insert("Sagar", "Pune", 11_000).id();
        table.delete_by_identity(id).unwrap();
        table.close();
    });

    assert!(logs.contains("table engine started"));
    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("insert 1\tSagar\tPune\t11000"));
    assert!(logs.contains("delete 1\tSagar\tPune\t11000"));
    assert!(logs.contains("deallocating all table resources"));
}

#[test]
fn debug_events_are_silent_by_default() {
    let ((), logs) = capture_logs(|| {
        let mut table = Table::new();
        table.insert("Sagar", "Pune", 11_000);
    });

    assert!(!logs.contains("DEBUG"));
    assert!(!logs.contains("insert 1"));
}

//! End-to-end alignment tests through the `Aligner` facade

use interlace::partition::TruncateSuffix;
use interlace::record::records_from_str;
use interlace::{Aligner, AlignedRow, Error, FillPolicy, Key, Record, SeriesSet, SparseGaps};
use serde_json::{json, Value};

fn rec(ts: i64, v: impl Into<Value>) -> Record {
    Record::new().with("ts", ts).with("value", v)
}

fn row(pairs: &[(&str, Value)]) -> AlignedRow {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

fn two_series() -> SeriesSet {
    [
        ("A", vec![rec(1, "x"), rec(3, "y")]),
        ("B", vec![rec(2, "m")]),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Dense mode
// =============================================================================

#[test]
fn test_dense_reference_example() {
    let table = Aligner::new(two_series())
        .generate_and_fill("ts", "value")
        .unwrap();

    let expected = json!({
        "1": {"A": "x", "B": 0},
        "2": {"A": "x", "B": "m"},
        "3": {"A": "y", "B": "m"},
    });
    assert_eq!(table.to_json().unwrap(), expected);
}

#[test]
fn test_dense_covers_keys_nobody_observed() {
    let set: SeriesSet = [
        ("cpu", vec![rec(100, 0.5), rec(104, 0.9)]),
        ("mem", vec![rec(101, 512), rec(102, 640)]),
    ]
    .into_iter()
    .collect();
    let table = Aligner::new(set).generate_and_fill("ts", "value").unwrap();

    assert_eq!(table.len(), 5);
    assert_eq!(table.get(&Key::Int(100)).unwrap(), &row(&[("cpu", json!(0.5)), ("mem", json!(0))]));
    assert_eq!(table.get(&Key::Int(103)).unwrap(), &row(&[("cpu", json!(0.5)), ("mem", json!(640))]));
    assert_eq!(table.get(&Key::Int(104)).unwrap(), &row(&[("cpu", json!(0.9)), ("mem", json!(640))]));
}

#[test]
fn test_dense_custom_fill() {
    let aligner = Aligner::builder(two_series())
        .fill(FillPolicy::Value(json!("-")))
        .build()
        .unwrap();
    let table = aligner.generate_and_fill("ts", "value").unwrap();
    assert_eq!(table.get(&Key::Int(1)).unwrap()["B"], json!("-"));
}

#[test]
fn test_dense_single_point() {
    let set: SeriesSet = [("only", vec![rec(7, true)])].into_iter().collect();
    let table = Aligner::new(set).generate_and_fill("ts", "value").unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&Key::Int(7)).unwrap()["only"], json!(true));
}

#[test]
fn test_dense_negative_keys() {
    let set: SeriesSet = [("a", vec![rec(-2, 1), rec(1, 2)])].into_iter().collect();
    let table = Aligner::new(set).generate_and_fill("ts", "value").unwrap();
    assert_eq!(
        table.keys().cloned().collect::<Vec<_>>(),
        vec![Key::Int(-2), Key::Int(-1), Key::Int(0), Key::Int(1)]
    );
    assert_eq!(table.get(&Key::Int(0)).unwrap()["a"], json!(1));
}

// =============================================================================
// Sparse mode
// =============================================================================

#[test]
fn test_sparse_reference_example() {
    let table = Aligner::new(two_series()).generate("ts", "value").unwrap();

    assert_eq!(
        table.keys().cloned().collect::<Vec<_>>(),
        vec![Key::Int(1), Key::Int(2), Key::Int(3)]
    );
    assert_eq!(table.get(&Key::Int(1)).unwrap(), &row(&[("A", json!("x"))]));
    assert_eq!(table.get(&Key::Int(2)).unwrap(), &row(&[("A", json!("x")), ("B", json!("m"))]));
    assert_eq!(table.get(&Key::Int(3)).unwrap(), &row(&[("A", json!("y")), ("B", json!("m"))]));
}

#[test]
fn test_sparse_first_row_never_back_filled() {
    let set: SeriesSet = [
        ("A", vec![rec(1, 1), rec(2, 2)]),
        ("B", vec![rec(2, 20)]),
    ]
    .into_iter()
    .collect();
    let table = Aligner::new(set).generate("ts", "value").unwrap();

    assert!(table.get(&Key::Int(1)).unwrap().get("B").is_none());
    assert_eq!(table.series_values("B"), vec![(&Key::Int(2), &json!(20))]);
}

#[test]
fn test_sparse_with_timestamp_strings() {
    let set: SeriesSet = [
        (
            "door",
            vec![
                Record::new().with("at", "2024-01-01 08:00:00").with("state", "open"),
                Record::new().with("at", "2024-01-02 18:30:00").with("state", "closed"),
            ],
        ),
        (
            "light",
            vec![
                Record::new().with("at", "2024-01-01 08:00:00").with("state", "off"),
                Record::new().with("at", "2024-01-01 20:15:00").with("state", "on"),
            ],
        ),
    ]
    .into_iter()
    .collect();
    let table = Aligner::new(set).generate("at", "state").unwrap();

    assert_eq!(table.len(), 3);
    let evening = table.get(&Key::from("2024-01-01 20:15:00")).unwrap();
    assert_eq!(evening["door"], json!("open"));
    assert_eq!(evening["light"], json!("on"));

    let days = table.day_break(&TruncateSuffix::TIME_OF_DAY).unwrap();
    assert_eq!(days["2024-01-01"].len(), 2);
    assert_eq!(days["2024-01-02"].len(), 1);
}

#[test]
fn test_sparse_omit_policy_through_builder() {
    let set: SeriesSet = [
        ("A", vec![rec(1, 1), rec(2, 2), rec(3, 3)]),
        ("B", vec![rec(3, 30)]),
    ]
    .into_iter()
    .collect();

    assert!(matches!(
        Aligner::new(set.clone()).generate("ts", "value"),
        Err(Error::UnseededSeries { .. })
    ));

    let table = Aligner::builder(set)
        .sparse_gaps(SparseGaps::Omit)
        .build()
        .unwrap()
        .generate("ts", "value")
        .unwrap();
    assert_eq!(table.get(&Key::Int(2)).unwrap(), &row(&[("A", json!(2))]));
    assert_eq!(table.get(&Key::Int(3)).unwrap()["B"], json!(30));
}

// =============================================================================
// Reuse and input handling
// =============================================================================

#[test]
fn test_aligner_is_reusable_across_modes() {
    let aligner = Aligner::new(two_series());

    let dense_first = aligner.generate_and_fill("ts", "value").unwrap();
    let sparse = aligner.generate("ts", "value").unwrap();
    let dense_again = aligner.generate_and_fill("ts", "value").unwrap();

    assert_eq!(dense_first, dense_again);
    assert_eq!(sparse.len(), 3);
    assert_eq!(aligner.series(), &two_series());
}

#[test]
fn test_series_parsed_from_json() {
    let a = records_from_str(r#"[{"ts": 1, "value": 10}, {"ts": 4, "value": 40}]"#).unwrap();
    let b = records_from_str(r#"[{"ts": 2, "value": "b"}]"#).unwrap();
    let set: SeriesSet = [("a", a), ("b", b)].into_iter().collect();

    let table = Aligner::new(set).generate_and_fill("ts", "value").unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.get(&Key::Int(3)).unwrap(), &row(&[("a", json!(10)), ("b", json!("b"))]));
}

#[test]
fn test_reregistering_replaces_series() {
    let mut set = two_series();
    set.insert("B", vec![rec(1, "n")]);

    let table = Aligner::new(set).generate("ts", "value").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(&Key::Int(3)).unwrap()["B"], json!("n"));
}

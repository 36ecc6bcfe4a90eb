use std::fs::File;
use std::io::Write;

use rstest::rstest;
use tempfile::tempdir;
use trail_config::{load_events, load_events_csv};

#[rstest]
fn csv_with_positions_only_derives_deltas() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "t,x,y").unwrap();
    writeln!(f, "0,10,10").unwrap();
    writeln!(f, "8,14,13").unwrap();
    writeln!(f, "16,20,15").unwrap();

    let rows = load_events_csv(&path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].dx, Some(0.0));
    assert_eq!(rows[1].dx, Some(4.0));
    assert_eq!(rows[1].dy, Some(3.0));
    assert_eq!(rows[2].t, 16);
}

#[rstest]
fn csv_with_explicit_deltas_keeps_them() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "t,x,y,dx,dy").unwrap();
    writeln!(f, "0,10,10,1,1").unwrap();
    writeln!(f, "8,14,13,2,2").unwrap();

    let rows = load_events_csv(&path).unwrap();
    assert_eq!(rows[0].dx, Some(1.0));
    assert_eq!(rows[1].dy, Some(2.0));
}

#[rstest]
fn csv_rejects_unexpected_headers() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "time,x,y").unwrap();
    writeln!(f, "0,1,1").unwrap();

    let err = load_events_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("events CSV must have headers"));
}

#[rstest]
fn csv_reports_bad_row_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "t,x,y").unwrap();
    writeln!(f, "0,1,1").unwrap();
    writeln!(f, "oops,1,1").unwrap();

    let err = load_events_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("invalid CSV row 3"));
}

#[rstest]
#[case("events.jsonl")]
#[case("events.ndjson")]
fn jsonl_is_picked_by_extension(#[case] name: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(
        &path,
        "{\"t\":0,\"x\":0,\"y\":0}\n{\"t\":10,\"x\":10,\"y\":0,\"dx\":10,\"dy\":0}\n",
    )
    .unwrap();
    let rows = load_events(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].x, 10.0);
}

#[rstest]
fn jsonl_reports_bad_line_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    std::fs::write(&path, "{\"t\":0,\"x\":0,\"y\":0}\n{\"t\":\"x\"}\n").unwrap();
    let err = load_events(&path).unwrap_err();
    assert!(format!("{err}").contains("invalid JSONL line 2"));
}

#[rstest]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("events.txt");
    std::fs::write(&path, "").unwrap();
    let err = load_events(&path).unwrap_err();
    assert!(format!("{err}").contains("unsupported events file"));
}

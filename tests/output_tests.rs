use ad_performance_aggregator::aggregator::{InMemoryStore, MetricsStore};
use ad_performance_aggregator::output::{
    render_csv, validate_path, FileReportWriter, ReportFormat, ReportKind, ReportWriter,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

fn sample_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.add("camp1", 1000, 100, Decimal::from(500), 10);
    store.add("camp2", 2000, 50, Decimal::from(200), 20);
    store.add("camp3", 500, 5, Decimal::from(80), 0);
    store
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_write_reports_csv() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FileReportWriter::new(dir.path(), 10);

    let paths = writer.write_reports(&sample_store()).unwrap();

    assert_eq!(paths.ctr, dir.path().join("top10_ctr.csv"));
    assert_eq!(paths.cpa, dir.path().join("top10_cpa.csv"));

    assert_eq!(
        read_lines(&paths.ctr),
        vec![
            "campaign_id,total_impressions,total_clicks,total_spend,total_conversions,ctr,cpa",
            "camp1,1000,100,500.00,10,0.100000,50.00",
            "camp2,2000,50,200.00,20,0.025000,10.00",
            "camp3,500,5,80.00,0,0.010000,",
        ]
    );

    assert_eq!(
        read_lines(&paths.cpa),
        vec![
            "campaign_id,total_impressions,total_clicks,total_spend,total_conversions,ctr,cpa",
            "camp2,2000,50,200.00,20,0.025000,10.00",
            "camp1,1000,100,500.00,10,0.100000,50.00",
        ]
    );
}

#[test]
fn test_write_reports_respects_top_k() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FileReportWriter::new(dir.path(), 1);

    let paths = writer.write_reports(&sample_store()).unwrap();

    assert_eq!(paths.ctr, dir.path().join("top1_ctr.csv"));
    assert_eq!(paths.ctr_rows, 1);
    assert_eq!(read_lines(&paths.ctr).len(), 2);
    assert_eq!(read_lines(&paths.cpa)[1], "camp2,2000,50,200.00,20,0.025000,10.00");
}

#[test]
fn test_write_reports_json() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FileReportWriter::new(dir.path(), 10).with_format(ReportFormat::Json);

    let paths = writer.write_reports(&sample_store()).unwrap();
    assert_eq!(paths.ctr, dir.path().join("top10_ctr.json"));

    let ctr: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.ctr).unwrap()).unwrap();
    assert_eq!(ctr.as_array().unwrap().len(), 3);
    assert_eq!(ctr[0]["campaign_id"], "camp1");
    assert!(ctr[2]["cpa"].is_null());

    let cpa: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths.cpa).unwrap()).unwrap();
    assert_eq!(cpa[0]["cpa"], 10.0);
}

#[test]
fn test_write_reports_creates_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("nested/reports");
    let writer = FileReportWriter::new(&nested, 10);

    writer.write_reports(&sample_store()).unwrap();

    assert!(nested.join(ReportKind::Ctr.file_name(10, ReportFormat::Csv)).exists());
    assert!(nested.join(ReportKind::Cpa.file_name(10, ReportFormat::Csv)).exists());
}

#[test]
fn test_write_reports_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FileReportWriter::new(dir.path(), 10);

    let paths = writer.write_reports(&InMemoryStore::new()).unwrap();

    assert_eq!(paths.ctr_rows, 0);
    assert_eq!(read_lines(&paths.cpa).len(), 1);
}

#[test]
fn test_output_dir_that_is_a_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let writer = FileReportWriter::new(file.path(), 10);

    assert!(writer.write_reports(&sample_store()).is_err());
}

#[test]
fn test_extra_artifacts_land_with_reports() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FileReportWriter::new(dir.path(), 10);
    let summary = dir.path().join("summary.json");

    writer
        .write_reports_with(&sample_store(), vec![(summary.clone(), b"{}\n".to_vec())])
        .unwrap();

    assert_eq!(fs::read_to_string(&summary).unwrap(), "{}\n");
    assert!(dir.path().join("top10_ctr.csv").exists());
}

#[test]
fn test_blocked_extra_artifact_keeps_previous_reports() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FileReportWriter::new(dir.path(), 10);
    fs::write(dir.path().join("top10_ctr.csv"), "OLD").unwrap();
    let blocked = dir.path().join("summary.json");
    fs::create_dir(&blocked).unwrap();

    let result = writer.write_reports_with(&sample_store(), vec![(blocked, b"{}".to_vec())]);

    assert!(result.is_err());
    assert_eq!(fs::read_to_string(dir.path().join("top10_ctr.csv")).unwrap(), "OLD");
    assert!(!dir.path().join("top10_cpa.csv").exists());
}

#[test]
fn test_render_csv_empty() {
    let store = InMemoryStore::new();
    let bytes = render_csv(&store.top_k_by_cpa(10)).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "campaign_id,total_impressions,total_clicks,total_spend,total_conversions,ctr,cpa\n"
    );
}

#[test]
fn test_validate_output_path() {
    let dir = tempfile::tempdir().unwrap();
    assert!(validate_path(Path::new("")).is_err());
    assert!(validate_path(dir.path()).is_err());
    assert!(validate_path(&dir.path().join("report.csv")).is_ok());
}

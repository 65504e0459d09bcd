//! End-to-end tests of the `vdj-import` binary.

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

fn vdj_import() -> Command {
    Command::cargo_bin("vdj-import").unwrap()
}

fn write_table(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn write_gz_table(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn test_headers_prints_sorted_json_array() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "clones.csv", "v_call,junction,duplicate_count\nIGHV1,TGT,3\n");

    vdj_import()
        .args(["headers", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("[\"duplicate_count\",\"junction\",\"v_call\"]\n");
}

#[test]
fn test_headers_unsorted_tsv_gz() {
    let dir = TempDir::new().unwrap();
    let path = write_gz_table(&dir, "clones.tsv.gz", "readCount\tnSeqCDR3\taaSeqCDR3\n10\tTGT\tC\n");

    vdj_import()
        .args(["--format", "tsv", "headers", "--unsorted", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("readCount\tnSeqCDR3\taaSeqCDR3\n");
}

#[test]
fn test_headers_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "clones.txt", "a,b\n");

    vdj_import()
        .args(["headers", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported dataset"));
}

#[test]
fn test_validate_valid_airr_single_cell() {
    let dir = TempDir::new().unwrap();
    let path = write_table(
        &dir,
        "airr.tsv",
        "sequence_id\tDuplicate_Count\tJunction\tV_Call\tJ_Call\tCell_ID\n",
    );

    vdj_import()
        .args(["validate", path.to_str().unwrap(), "--input-format", "airr-sc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: VALID"))
        .stdout(predicate::str::contains("v-gene"));
}

#[test]
fn test_validate_missing_columns_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "mixcr.tsv", "readCount\tnSeqCDR3\taaSeqCDR3\ttagValueUMI\n");

    vdj_import()
        .args(["validate", path.to_str().unwrap(), "-t", "mixcr-sc"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Status: INVALID"))
        .stdout(predicate::str::contains("tagValueCELL*"));
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_table(
        &dir,
        "immunoseq.tsv",
        "rearrangement\tamino_acid\tv_gene\td_gene\tj_gene\tv-index\n",
    );

    let output = vdj_import()
        .args([
            "--format",
            "json",
            "validate",
            path.to_str().unwrap(),
            "--input-format",
            "immunoSeq",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["state"], "invalid");
    assert_eq!(json["argsValid"], true);
    assert_eq!(json["result"]["missingColumns"], serde_json::json!(["read-count|umi-count"]));
    assert_eq!(json["columns"]["v-gene"], "v_gene");
    assert_eq!(json["headerCount"], 6);
}

#[test]
fn test_validate_without_format_reports_problem() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "clones.csv", "a,b,c\n");

    let output = vdj_import()
        .args(["--format", "json", "validate", path.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["argsValid"], false);
    assert_eq!(json["problems"][0]["problem"], "missing_format");
    assert!(json["result"].is_null());
}

#[test]
fn test_validate_custom_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "custom.csv", "aaSeq,bestV,bestJ,umis\n");
    let path = path.to_str().unwrap();

    vdj_import()
        .args([
            "validate", path, "-t", "custom", "--map", "cdr3-aa=aaSeq", "--map", "v-gene=bestV",
            "--map", "j-gene=bestJ",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Custom mapping is incomplete: read-count"));

    vdj_import()
        .args([
            "validate",
            path,
            "-t",
            "custom",
            "--primary-count",
            "umi",
            "--map",
            "cdr3-aa=aaSeq",
            "--map",
            "v-gene=bestV",
            "--map",
            "j-gene=bestJ",
            "--map",
            "umi-count=umis",
        ])
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_bad_mapping_entry() {
    vdj_import()
        .args(["validate", "clones.csv", "--map", "not-a-field=x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-field"));
}

#[test]
fn test_validate_args_file() {
    let dir = TempDir::new().unwrap();
    let path = write_table(&dir, "cellranger.csv", "barcode,chain,v_gene,j_gene,cdr3,cdr3_nt,reads,umis\n");
    let args_path = dir.path().join("args.json");
    std::fs::write(&args_path, r#"{"format": "cellranger", "chains": ["TRA", "TRB"]}"#).unwrap();

    vdj_import()
        .args([
            "validate",
            path.to_str().unwrap(),
            "--args",
            args_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chains: TRA, TRB"));
}

#[test]
fn test_formats_lists_every_format() {
    let output = vdj_import()
        .args(["--format", "json", "formats"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let formats = json["formats"].as_array().unwrap();
    assert_eq!(formats.len(), 8);
    assert_eq!(formats[0]["format"], "immunoSeq");
    assert_eq!(formats[7]["format"], "custom");
}

#[test]
fn test_formats_single_tsv() {
    vdj_import()
        .args(["--format", "tsv", "formats", "-t", "airr-sc"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "airr-sc\tNormalized\tduplicate_count,junction,v_call,j_call,cell_id",
        ));
}

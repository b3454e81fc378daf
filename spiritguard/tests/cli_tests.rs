use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const TWO_DISTRICTS: &str = "\
Sl No,District,sale_2015-16,sale_2016-17
1,Mysore,100,150
2,Hassan,200,100
";

const THREE_YEARS: &str = "\
District,2018,2019,2020
Bengaluru Urban,1000,1100,5000
Mysore,400,420,410
Hassan,300,310,305
Tumkur,250,260,90
";

/// Throwaway project directory for one CLI run.
struct SpiritGuardTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl SpiritGuardTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().join("project");
        std::fs::create_dir_all(&root)?;
        Ok(Self { _tmp: tmp, root })
    }

    fn with_file(self, relative: &str, content: &[u8]) -> Result<Self> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(self)
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn spiritguard(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("spiritguard"));
        cmd.current_dir(&self.root)
            .env_remove("SPIRITGUARD_PROJECT_DIR")
            .env_remove("SPIRITGUARD_DATA_FILE")
            .env_remove("SPIRITGUARD_DEFAULT_STATE")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn stdout_of(cmd: &mut Command) -> Result<String> {
    let output = cmd.output()?;
    anyhow::ensure!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn test_trends_json_from_discovered_csv() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?.with_file("sales.csv", TWO_DISTRICTS.as_bytes())?;

    let stdout = stdout_of(env.spiritguard().args(["trends", "--format", "json"]))?;

    insta::assert_snapshot!(stdout.trim_end(), @r#"
    [
      {
        "district": "Hassan",
        "year": 2015,
        "sale_in_liters_sum": 200.0,
        "yoy_change_percent": null
      },
      {
        "district": "Hassan",
        "year": 2016,
        "sale_in_liters_sum": 100.0,
        "yoy_change_percent": -50.0
      },
      {
        "district": "Mysore",
        "year": 2015,
        "sale_in_liters_sum": 100.0,
        "yoy_change_percent": null
      },
      {
        "district": "Mysore",
        "year": 2016,
        "sale_in_liters_sum": 150.0,
        "yoy_change_percent": 50.0
      }
    ]
    "#);
    Ok(())
}

#[test]
fn test_trends_district_filter_is_case_insensitive() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?.with_file("sales.csv", TWO_DISTRICTS.as_bytes())?;

    let stdout = stdout_of(
        env.spiritguard()
            .args(["trends", "--district", "mysore", "--format", "json"]),
    )?;
    let rows: serde_json::Value = serde_json::from_str(&stdout)?;
    let rows = rows.as_array().context("expected an array")?;
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["district"] == "Mysore"));
    Ok(())
}

#[test]
fn test_overview_reads_cp1252_file_from_data_dir() -> Result<()> {
    // 0x96 is an en dash in CP-1252 and invalid as UTF-8
    let mut bytes = b"District,sale_2019-20\n".to_vec();
    bytes.extend_from_slice(b"Chikkamagaluru \x96 Rural,1500\n");
    let env = SpiritGuardTestEnv::new()?.with_file("data/karnataka.csv", &bytes)?;

    let stdout = stdout_of(env.spiritguard().args(["overview", "--format", "json"]))?;
    let report: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(report["mode"], "long");
    assert_eq!(report["encoding"], "cp1252");
    assert_eq!(report["overview"]["records"], 1);
    assert_eq!(report["overview"]["total_sales"], 1500.0);
    Ok(())
}

#[test]
fn test_missing_data_file_gives_empty_overview() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;

    env.spiritguard()
        .args(["overview", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"empty\""))
        .stdout(predicate::str::contains("\"records\": 0"));
    Ok(())
}

#[test]
fn test_anomalies_without_data_fails() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;

    env.spiritguard()
        .arg("anomalies")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data available"));
    Ok(())
}

#[test]
fn test_anomalies_scan_reports_every_district_year() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?.with_file("sales.csv", THREE_YEARS.as_bytes())?;

    let stdout = stdout_of(
        env.spiritguard()
            .args(["anomalies", "--top", "3", "--format", "json"]),
    )?;
    let scan: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(scan["total"], 12);
    assert_eq!(scan["rows"].as_array().map(Vec::len), Some(12));
    assert!(scan["top"].as_array().map_or(0, Vec::len) <= 3);
    // 1/12 sits inside the [0.01, 0.1] clamp
    let contamination = scan["contamination"].as_f64().context("contamination")?;
    assert!((contamination - 1.0 / 12.0).abs() < 1e-9);
    // Bengaluru Urban 2020 (+354%) and Tumkur 2020 (-65%) cross the YoY swing
    assert_eq!(scan["yoy_swings"], 2);
    Ok(())
}

#[test]
fn test_explicit_data_file_flag_wins() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?
        .with_file("sales.csv", TWO_DISTRICTS.as_bytes())?
        .with_file("other/wide.csv", THREE_YEARS.as_bytes())?;

    let stdout = stdout_of(
        env.spiritguard()
            .args(["states", "--format", "json", "--data-file"])
            .arg(env.path("other/wide.csv")),
    )?;
    let report: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(report["states"][0]["state"], "Karnataka");
    assert_eq!(report["states"][0]["max_sales"], 5000.0);
    assert_eq!(report["national"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn test_config_file_sets_default_state() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?
        .with_file("sales.csv", TWO_DISTRICTS.as_bytes())?
        .with_file("spiritguard.yaml", b"name: goa_excise\ndata:\n  default_state: Goa\n")?;

    env.spiritguard()
        .args(["states", "--format", "json", "--project-dir"])
        .arg(env.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"Goa\""));
    Ok(())
}

#[test]
fn test_missing_explicit_config_fails() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;

    env.spiritguard()
        .args(["overview", "--config", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
    Ok(())
}

#[test]
fn test_fleet_snapshot_is_reproducible() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;
    let args = ["fleet", "--at", "10:30:00", "--format", "json"];

    let first = stdout_of(env.spiritguard().args(args))?;
    let second = stdout_of(env.spiritguard().args(args))?;
    assert_eq!(first, second);

    let snapshot: serde_json::Value = serde_json::from_str(&first)?;
    assert_eq!(snapshot["summary"]["vehicles"], 15);
    assert_eq!(snapshot["positions"][0]["truck_id"], "TRK-KA-0001");
    Ok(())
}

#[test]
fn test_production_factory_filter() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;

    let stdout = stdout_of(env.spiritguard().args([
        "production",
        "--factory",
        "Factory_HUB_001",
        "--today",
        "2024-06-30",
        "--format",
        "json",
    ]))?;
    let audit: serde_json::Value = serde_json::from_str(&stdout)?;
    let records = audit["records"].as_array().context("records")?;
    assert_eq!(records.len(), 30);
    assert!(records.iter().all(|r| r["factory_id"] == "Factory_HUB_001"));

    env.spiritguard()
        .args(["production", "--factory", "Factory_XYZ_999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown factory"));
    Ok(())
}

#[test]
fn test_listed_batch_verifies() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;

    let listing = stdout_of(env.spiritguard().args([
        "batches",
        "--limit",
        "1",
        "--today",
        "2024-06-01",
        "--format",
        "json",
    ]))?;
    let listing: serde_json::Value = serde_json::from_str(&listing)?;
    assert_eq!(listing["stats"]["total"], 50);
    let batch_id = listing["batches"][0]["batch_id"]
        .as_str()
        .context("batch_id")?
        .to_string();

    let stdout = stdout_of(env.spiritguard().args([
        "verify",
        batch_id.as_str(),
        "--today",
        "2024-06-01",
        "--format",
        "json",
    ]))?;
    let result: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(result["batch_id"], batch_id.as_str());
    assert_ne!(result["status"], "NOT_FOUND");
    Ok(())
}

#[test]
fn test_verify_unknown_batch_is_not_found() -> Result<()> {
    let env = SpiritGuardTestEnv::new()?;

    env.spiritguard()
        .args(["verify", "BATCH-2024-FAKE-000001", "--today", "2024-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT_FOUND"))
        .stdout(predicate::str::contains("POSSIBLE COUNTERFEIT"));
    Ok(())
}

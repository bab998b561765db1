//! CLI 集成测试
//!
//! 使用 assert_cmd 进行命令行集成测试

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = r#"
[[entry]]
name = "ENVZ_IT_PORT"
type = "integer"
source = "process"
default = 3000

[[entry]]
name = "ENVZ_IT_NAME"
non_empty = true

[[entry]]
name = "ENVZ_IT_MODE"
type = "enum"
values = ["development", "production"]
default = "development"
"#;

/// 创建临时测试环境，写入声明文件
fn create_test_env() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("envz.toml");
    fs::write(&schema, SCHEMA).unwrap();
    (dir, schema)
}

fn write_manifest(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("envz.injected.json");
    fs::write(&path, content).unwrap();
    path
}

/// 构造隔离了 envz 相关环境变量的命令
fn envz(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("envz").unwrap();
    cmd.current_dir(dir)
        .env_remove("ENVZ_SCHEMA")
        .env_remove("ENVZ_INJECTED")
        .env_remove("ENVZ_LOG")
        .env_remove("ENVZ_IT_PORT")
        .env_remove("ENVZ_IT_NAME")
        .env_remove("ENVZ_IT_MODE")
        .env("NO_COLOR", "1");
    cmd
}

mod basic_commands {
    use super::*;

    #[test]
    fn test_help_command() {
        let (dir, _) = create_test_env();
        envz(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("check"))
            .stdout(predicate::str::contains("inject"))
            .stdout(predicate::str::contains("explain"));
    }

    #[test]
    fn test_missing_schema_file() {
        let (dir, _) = create_test_env();
        envz(dir.path())
            .args(["--schema", "absent.toml", "check"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("envz::config"));
    }
}

mod check_command {
    use super::*;

    #[test]
    fn test_check_success_prints_dotenv() {
        let (dir, schema) = create_test_env();
        let manifest = write_manifest(dir.path(), r#"{"z.serverOnly": {"ENVZ_IT_NAME": "svc-a"}}"#);

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("check")
            .arg("--injected")
            .arg(&manifest)
            .env("ENVZ_IT_PORT", "8080")
            .assert()
            .success()
            .stdout(predicate::str::contains("ENVZ_IT_NAME=svc-a"))
            .stdout(predicate::str::contains("ENVZ_IT_PORT=8080"))
            .stdout(predicate::str::contains("ENVZ_IT_MODE=development"));
    }

    #[test]
    fn test_check_reads_manifest_from_env() {
        let (dir, schema) = create_test_env();
        let manifest = write_manifest(dir.path(), r#"{"z.serverOnly": {"ENVZ_IT_NAME": "svc-b"}}"#);

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .args(["--format", "json", "check"])
            .env("ENVZ_INJECTED", &manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""ENVZ_IT_NAME": "svc-b""#))
            .stdout(predicate::str::contains(r#""ENVZ_IT_PORT": 3000"#));
    }

    #[test]
    fn test_check_failure_names_key() {
        let (dir, schema) = create_test_env();
        let manifest = write_manifest(dir.path(), r#"{"z.serverOnly": {"ENVZ_IT_NAME": ""}}"#);

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("check")
            .arg("--injected")
            .arg(&manifest)
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("ENVZ_IT_NAME"));
    }

    #[test]
    fn test_check_without_injection_fails() {
        let (dir, schema) = create_test_env();

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("check")
            .env("ENVZ_IT_NAME", "svc-a")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("envz::missing_injection"));
    }

    #[test]
    fn test_check_collect_all_reports_every_failure() {
        let (dir, schema) = create_test_env();
        let manifest = write_manifest(
            dir.path(),
            r#"{"z.serverOnly": {"ENVZ_IT_MODE": "staging"}}"#,
        );

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("check")
            .arg("--injected")
            .arg(&manifest)
            .arg("--collect-all")
            .env("ENVZ_IT_PORT", "not-a-port")
            .assert()
            .failure()
            .stderr(predicate::str::contains("ENVZ_IT_PORT"))
            .stderr(predicate::str::contains("ENVZ_IT_NAME"))
            .stderr(predicate::str::contains("ENVZ_IT_MODE"));
    }
}

mod inject_command {
    use super::*;

    #[test]
    fn test_inject_then_check() {
        let (dir, schema) = create_test_env();
        let manifest = dir.path().join("dist").join("envz.json");

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("inject")
            .arg("--output")
            .arg(&manifest)
            .env("ENVZ_IT_NAME", "captured")
            .assert()
            .success();

        let content = fs::read_to_string(&manifest).unwrap();
        assert!(content.contains("z.serverOnly"));
        assert!(content.contains("captured"));

        // 运行期不再需要 ENVZ_IT_NAME 存在于进程环境中
        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("check")
            .arg("--injected")
            .arg(&manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains("ENVZ_IT_NAME=captured"));
    }
}

mod inject_dotenv {
    use super::*;

    #[test]
    fn test_inject_captures_value_only_in_dotenv() {
        let (dir, schema) = create_test_env();
        fs::write(dir.path().join(".env"), "ENVZ_IT_NAME=from-file\n").unwrap();
        fs::write(dir.path().join(".env.staging"), "ENVZ_IT_MODE=production\n").unwrap();

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .args(["inject", "--output", "out.json", "--mode", "staging"])
            .assert()
            .success();

        let manifest = dir.path().join("out.json");
        let content = fs::read_to_string(&manifest).unwrap();
        assert!(content.contains("from-file"));

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("check")
            .arg("--injected")
            .arg(&manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains("ENVZ_IT_NAME=from-file"))
            .stdout(predicate::str::contains("ENVZ_IT_MODE=production"));
    }

    #[test]
    fn test_inject_rejects_local_mode() {
        let (dir, schema) = create_test_env();

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .args(["inject", "--mode", "local"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("envz::config"));
    }
}

mod explain_command {
    use super::*;

    #[test]
    fn test_explain_json_reports_origins() {
        let (dir, schema) = create_test_env();
        let manifest = write_manifest(dir.path(), r#"{"z.serverOnly": {"ENVZ_IT_NAME": "secret"}}"#);

        let output = envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .args(["-f", "json", "explain"])
            .arg("--injected")
            .arg(&manifest)
            .output()
            .unwrap();

        assert!(output.status.success());
        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["injection"], true);
        let entries = report["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0]["key"], "ENVZ_IT_PORT");
        assert!(entries[0]["origin"].is_null());
        assert_eq!(entries[1]["origin"], "injected");
        assert_eq!(entries[1]["valid"], true);
        // 不输出值
        assert!(!String::from_utf8_lossy(&output.stdout).contains("secret"));
    }

    #[test]
    fn test_explain_without_injection_warns() {
        let (dir, schema) = create_test_env();

        envz(dir.path())
            .arg("--schema")
            .arg(&schema)
            .arg("explain")
            .assert()
            .success()
            .stdout(predicate::str::contains("注入存储不存在"))
            .stdout(predicate::str::contains("ENVZ_IT_NAME"));
    }
}

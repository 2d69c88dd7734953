#![allow(deprecated)] // TODO: cargo_bin → cargo_bin_cmd! へ移行

use assert_cmd::Command;
use predicates::prelude::*;

const SECRET_KEYS: [&str; 5] = [
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
    "POSTGRES_DB",
    "N8N_ENCRYPTION_KEY",
    "N8N_USER_MANAGEMENT_JWT_SECRET",
];

/// CLIヘルプが正しく表示されることを確認
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ローカルAIスタック"))
        .stdout(predicate::str::contains("up"))
        .stdout(predicate::str::contains("down"))
        .stdout(predicate::str::contains("ps"))
        .stdout(predicate::str::contains("render"));
}

/// バージョン表示が正しく動作することを確認
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("minato"));
}

/// upコマンドのヘルプが正しく表示されることを確認
#[test]
fn test_up_help() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("up")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[PROFILE]"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--no-wait"))
        .stdout(predicate::str::contains("--shortcut"));
}

/// downコマンドのヘルプが正しく表示されることを確認
#[test]
fn test_down_help() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("down")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("[PROFILE]"))
        .stdout(predicate::str::contains("--volumes"));
}

/// 不正なコマンドでエラーになることを確認
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

/// 不正なプロファイル名でエラーになることを確認
#[test]
fn test_render_unknown_profile() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("prod")
        .assert()
        .failure()
        .stderr(predicate::str::contains("prod"));
}

/// renderがチャット構成のマニフェストを標準出力に書くことを確認
#[test]
fn test_render_chat() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("chat")
        .assert()
        .success()
        .stdout(predicate::str::contains("ollama/ollama"))
        .stdout(predicate::str::contains("container_name: ollama"))
        .stdout(predicate::str::contains("open-webui"));
}

/// プロファイル省略時はchatが選択されることを確認
#[test]
fn test_render_default_profile() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("container_name: ollama"));
}

/// シークレット未設定のautomationはコンテナ操作前に失敗することを確認
#[test]
fn test_render_automation_without_secrets() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    for key in SECRET_KEYS {
        cmd.env_remove(key);
    }
    cmd.arg("render")
        .arg("automation")
        .assert()
        .failure()
        .stderr(predicate::str::contains("POSTGRES"));
}

/// シークレットが揃っていればautomationのマニフェストが生成されることを確認
#[test]
fn test_render_automation_with_secrets() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.env("POSTGRES_USER", "n8n")
        .env("POSTGRES_PASSWORD", "secret")
        .env("POSTGRES_DB", "n8n")
        .env("N8N_ENCRYPTION_KEY", "enc-key")
        .env("N8N_USER_MANAGEMENT_JWT_SECRET", "jwt-secret")
        .arg("render")
        .arg("automation")
        .assert()
        .success()
        .stdout(predicate::str::contains("container_name: n8n"))
        .stdout(predicate::str::contains("container_name: postgres"))
        .stdout(predicate::str::contains("service_healthy"))
        .stdout(predicate::str::contains("pg_isready"));
}

/// ポートのカスタマイズがマニフェストに反映されることを確認
#[test]
fn test_render_custom_ports() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("chat")
        .arg("--webui-port")
        .arg("8000")
        .assert()
        .success()
        .stdout(predicate::str::contains("8000:8080"));
}

/// 無効なポート（0）はエラーになることを確認
#[test]
fn test_render_invalid_port() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("chat")
        .arg("--ollama-port")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("無効なポート"));
}

/// -p/--profile フラグも引き続き使えることを確認（後方互換）
#[test]
fn test_render_profile_flag() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("-p")
        .arg("chat")
        .assert()
        .success()
        .stdout(predicate::str::contains("container_name: ollama"));
}

/// 位置引数と-pフラグの同時指定はエラーになることを確認
#[test]
fn test_render_conflict_positional_and_flag() {
    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("chat")
        .arg("-p")
        .arg("automation")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

/// --outputでファイルに書き出せることを確認
#[test]
fn test_render_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.compose.yaml");

    let mut cmd = Command::cargo_bin("minato").unwrap();
    cmd.arg("render")
        .arg("chat")
        .arg("-o")
        .arg(&path)
        .assert()
        .success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("container_name: ollama"));
}

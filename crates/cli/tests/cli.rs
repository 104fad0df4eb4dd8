use assert_cmd::Command;

fn libris(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    cmd.env("LIBRIS_CONFIG_DIR", config_dir)
        .env("LIBRIS_ENV", "local")
        .env_remove("LIBRIS_SERVER__PORT");
    cmd
}

#[test]
fn config_prints_resolved_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("base.toml"),
        "[server]\nport = 9300\n\n[catalog]\nid_strategy = \"random\"\n",
    )
    .unwrap();

    let output = libris(dir.path()).arg("config").output().unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["environment"], "local");
    assert_eq!(settings["server"]["port"], 9300);
    assert_eq!(settings["catalog"]["id_strategy"], "random");
}

#[test]
fn invalid_environment_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = libris(dir.path())
        .env("LIBRIS_ENV", "qa")
        .arg("config")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported environment 'qa'"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    libris(dir.path()).arg("frobnicate").assert().failure();
}

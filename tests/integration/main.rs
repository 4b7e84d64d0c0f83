//! Integration tests for rack

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// rack pointed at a config file inside `dir`
    fn rack(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("rack");
        cmd.env_remove("RUST_LOG")
            .env_remove("CACHE_TTL")
            .env_remove("API_PORT")
            .arg("--config")
            .arg(dir.path().join("config.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("barbell plate calculator"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("rack"));
    }

    #[test]
    fn calc_default_plates() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["calc", "225", "--format", "plain"])
            .assert()
            .success()
            .stdout("225\n");
    }

    #[test]
    fn calc_json_output() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["calc", "315", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""hundreds": 1"#))
            .stdout(predicate::str::contains(r#""thirtyFives": 1"#))
            .stdout(predicate::str::contains(r#""achievedWeight": 315"#));
    }

    #[test]
    fn calc_with_limited_plates_falls_short() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["calc", "500", "--plates", "45=1", "--format", "plain"])
            .assert()
            .success()
            .stdout("135\n");
    }

    #[test]
    fn calc_table_lists_plates() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["calc", "100", "--plates", "25=1,1.25=10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("TwentyFives"))
            .stdout(predicate::str::contains("OneDotTwoFives"))
            .stdout(predicate::str::contains("You got this!"));
    }

    #[test]
    fn calc_rejects_weight_below_bar() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["calc", "40"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "desired weight must be greater than bar weight",
            ));
    }

    #[test]
    fn calc_rejects_unknown_plate() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["calc", "200", "--plates", "50=2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown plate"));
    }

    #[test]
    fn calc_uses_configured_bar() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[defaults]\nbar_weight = 35\n",
        )
        .unwrap();

        rack(&dir)
            .args(["calc", "45", "--format", "plain"])
            .assert()
            .success()
            .stdout("45\n");
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("expiry = \"timer\""));
    }

    #[test]
    fn config_init_writes_file_once() {
        let dir = TempDir::new().unwrap();
        rack(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));
        assert!(dir.path().join("config.toml").exists());

        rack(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn invalid_config_fails_with_hint() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[cache]\nexpiry = 3\n").unwrap();

        rack(&dir)
            .args(["calc", "225"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"))
            .stderr(predicate::str::contains("config init --force"));
    }

    #[test]
    fn negative_default_bar_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[defaults]\nbar_weight = -45\n").unwrap();

        rack(&dir)
            .args(["calc", "225"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("bar_weight cannot be negative"));
    }

    #[test]
    fn forced_init_repairs_invalid_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[cache]\nexpiry = 3\n").unwrap();

        rack(&dir)
            .args(["config", "init", "--force"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        rack(&dir)
            .args(["calc", "225", "--format", "plain"])
            .assert()
            .success()
            .stdout("225\n");
    }
}

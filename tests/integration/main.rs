//! Integration tests for packstage

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use packstage::cache::CacheKey;
    use predicates::prelude::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Command isolated from the user's config and cache
    fn packstage(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("packstage");
        cmd.env("PACKSTAGE_CONFIG", temp.path().join("config.toml"))
            .env("PACKSTAGE_CACHE_DIR", temp.path().join("cache"))
            .env_remove("PACKSTAGE_ORDER");
        cmd
    }

    fn buildpack_dir(root: &Path, id: &str) -> PathBuf {
        let dir = root.join(id);
        fs::create_dir_all(dir.join("bin")).unwrap();
        fs::write(
            dir.join("buildpack.toml"),
            format!("api = \"0.2\"\n\n[buildpack]\nid = \"{id}\"\nversion = \"0.0.1\"\n"),
        )
        .unwrap();
        fs::write(dir.join("bin").join("detect"), "#!/bin/sh\n").unwrap();
        fs::write(dir.join("bin").join("build"), "#!/bin/sh\n").unwrap();
        dir
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("buildpack"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("packstage"));
    }

    #[test]
    fn fetch_local_directory_writes_order() {
        let temp = TempDir::new().unwrap();
        let bp = buildpack_dir(temp.path(), "org.example.node");
        let order = temp.path().join("out").join("order.toml");

        packstage(&temp)
            .args(["fetch", "--order"])
            .arg(&order)
            .arg(&bp)
            .assert()
            .success();

        let content = fs::read_to_string(&order).unwrap();
        assert!(content.contains("[[order]]"));
        assert!(content.contains("id = \"org.example.node\""));
        assert!(content.contains("version = \"0.0.1\""));

        let entry = CacheKey::of(&bp.to_string_lossy()).entry_path(&temp.path().join("cache"));
        assert!(entry.join("bin").join("detect").is_file());
    }

    #[test]
    fn fetch_json_reports_reuse_on_second_run() {
        let temp = TempDir::new().unwrap();
        let bp = buildpack_dir(temp.path(), "org.example.go");
        let order = temp.path().join("order.toml");

        packstage(&temp)
            .args(["fetch", "--format", "json", "--order"])
            .arg(&order)
            .arg(&bp)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"fetched\""));

        packstage(&temp)
            .args(["fetch", "--format", "json", "--order"])
            .arg(&order)
            .arg(&bp)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"reused\""));
    }

    #[test]
    fn fetch_nothing_independent_writes_empty_order() {
        let temp = TempDir::new().unwrap();
        let order = temp.path().join("order.toml");

        packstage(&temp)
            .args(["fetch", "--auto-detect", "--order"])
            .arg(&order)
            .assert()
            .success();

        let content = fs::read_to_string(&order).unwrap();
        assert_eq!(content.trim(), "order = []");
    }

    #[test]
    fn fetch_fails_on_inconsistent_entry() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        let key = CacheKey::of("file:/buildpack1");
        fs::write(key.entry_path(&cache), "not a directory").unwrap();
        let order = temp.path().join("order.toml");

        packstage(&temp)
            .args(["fetch", "--order"])
            .arg(&order)
            .arg("file:/buildpack1")
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not a directory"))
            .stderr(predicate::str::contains(key.as_str()));

        assert!(!order.exists());
    }

    #[test]
    fn fetch_missing_local_path_fails() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .args(["fetch", "--order"])
            .arg(temp.path().join("order.toml"))
            .arg(temp.path().join("does-not-exist"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn translate_passes_uncached_through() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .args(["translate", "https://example.com/bp.tgz", "bar"])
            .assert()
            .success()
            .stdout("https://example.com/bp.tgz\nbar\n");
    }

    #[test]
    fn translate_after_fetch_points_at_archive() {
        let temp = TempDir::new().unwrap();
        let bp = buildpack_dir(temp.path(), "org.example.ruby");
        let reference = bp.to_string_lossy().into_owned();

        packstage(&temp)
            .args(["fetch", "--order"])
            .arg(temp.path().join("order.toml"))
            .arg(&reference)
            .assert()
            .success();

        let key = CacheKey::of(&reference);
        packstage(&temp)
            .args(["translate", &reference, "other"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("file://"))
            .stdout(predicate::str::contains(format!("{}.tgz", key)))
            .stdout(predicate::str::ends_with("other\n"));

        assert!(key.archive_path(&temp.path().join("cache")).is_file());
    }

    #[test]
    fn archive_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let bp = buildpack_dir(temp.path(), "org.example.java");
        let first = temp.path().join("first.tgz");
        let second = temp.path().join("second.tgz");

        for out in [&first, &second] {
            packstage(&temp)
                .arg("archive")
                .arg(&bp)
                .arg("--output")
                .arg(out)
                .assert()
                .success();
        }

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn archive_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .arg("archive")
            .arg(temp.path().join("missing"))
            .arg("-o")
            .arg(temp.path().join("out.tgz"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn cache_key_prints_key() {
        let temp = TempDir::new().unwrap();
        let key = CacheKey::of("file:/buildpack1");
        packstage(&temp)
            .args(["cache", "key", "file:/buildpack1"])
            .assert()
            .success()
            .stdout(predicate::str::contains(key.as_str()))
            .stdout(predicate::str::contains("Not cached"));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached buildpacks"));
    }

    #[test]
    fn cache_list_plain_after_fetch() {
        let temp = TempDir::new().unwrap();
        let bp = buildpack_dir(temp.path(), "org.example.php");
        let reference = bp.to_string_lossy().into_owned();

        packstage(&temp)
            .args(["fetch", "--order"])
            .arg(temp.path().join("order.toml"))
            .arg(&reference)
            .assert()
            .success();

        packstage(&temp)
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout(format!("{}\n", CacheKey::of(&reference)));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        packstage(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("[order]"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        packstage(&temp).args(["config", "init"]).assert().success();
        assert!(temp.path().join("config.toml").is_file());

        packstage(&temp)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--force"));
    }

    #[test]
    fn invalid_config_reports_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[cache\n").unwrap();
        packstage(&temp)
            .args(["cache", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("config.toml"));
    }
}

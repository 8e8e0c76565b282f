//! Integration tests for cachebust

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's global config
    fn cachebust(project: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("cachebust");
        cmd.current_dir(project)
            .env("CACHEBUST_CONFIG", project.join("no-global-config.toml"));
        cmd
    }

    /// public/css/app.css, public/js/app.js and public/index.html
    fn site(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("public/css")).unwrap();
        fs::create_dir_all(root.join("public/js")).unwrap();
        fs::write(root.join("public/css/app.css"), "body{}").unwrap();
        fs::write(root.join("public/js/app.js"), "console.log(1)").unwrap();
        fs::write(
            root.join("public/index.html"),
            concat!(
                r#"<link rel="stylesheet" href="css/app.css">"#,
                "\n",
                r#"<script src="js/app.js"></script>"#,
                "\n"
            ),
        )
        .unwrap();
        fs::write(root.join(".cachebust.toml"), config).unwrap();
        temp
    }

    const SITE_CONFIG: &str = r#"
# Busted copies land next to the originals; keep them out of the next run
assets = ["css/*.css", "js/*.js", "!**/*.????????.*"]

[options]
base_dir = "public"
length = 8
json_output = true

[files]
cwd = "public"
src = ["*.html"]
"#;

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        cachebust(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("content-hash fingerprinting"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        cachebust(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("cachebust"));
    }

    #[test]
    fn run_busts_assets_and_rewrites_html() {
        let temp = site(SITE_CONFIG);
        let public = temp.path().join("public");

        cachebust(temp.path())
            .args(["run", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("css/app.css -> css/app.aa676972.css"))
            .stdout(predicate::str::contains("js/app.js -> js/app.6114f5ad.js"));

        let html = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(html.contains(r#"href="css/app.aa676972.css""#));
        assert!(html.contains(r#"src="js/app.6114f5ad.js""#));

        assert!(public.join("css/app.aa676972.css").is_file());
        assert!(public.join("css/app.css").is_file());

        let map: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(public.join("cachebust.json")).unwrap())
                .unwrap();
        assert_eq!(map["css/app.css"], "css/app.aa676972.css");
        assert_eq!(map["js/app.js"], "js/app.6114f5ad.js");
    }

    #[test]
    fn second_run_leaves_html_unchanged() {
        let temp = site(SITE_CONFIG);
        let index = temp.path().join("public/index.html");

        cachebust(temp.path()).arg("run").assert().success();
        let once = fs::read_to_string(&index).unwrap();
        cachebust(temp.path()).arg("run").assert().success();

        assert_eq!(fs::read_to_string(&index).unwrap(), once);
    }

    #[test]
    fn run_from_subdirectory_uses_project_root() {
        let temp = site(SITE_CONFIG);

        cachebust(&temp.path().join("public/css"))
            .arg("run")
            .assert()
            .success();

        let html = fs::read_to_string(temp.path().join("public/index.html")).unwrap();
        assert!(html.contains("css/app.aa676972.css"));
    }

    #[test]
    fn query_string_mode_keeps_files_in_place() {
        let temp = site(SITE_CONFIG);
        let public = temp.path().join("public");

        cachebust(temp.path())
            .args(["run", "--query-string", "--length", "32"])
            .assert()
            .success();

        let html = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(html.contains(r#"href="css/app.css?aa676972bbd2b68e94ef8e91e81d20be""#));
        assert!(!public.join("css/app.aa676972.css").exists());
    }

    #[test]
    fn dry_run_changes_nothing() {
        let temp = site(SITE_CONFIG);
        let public = temp.path().join("public");
        let before = fs::read_to_string(public.join("index.html")).unwrap();

        cachebust(temp.path())
            .args(["run", "--dry-run", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("css/app.aa676972.css"));

        assert_eq!(fs::read_to_string(public.join("index.html")).unwrap(), before);
        assert!(!public.join("css/app.aa676972.css").exists());
        assert!(!public.join("cachebust.json").exists());
    }

    #[test]
    fn changed_asset_cleans_up_previous_copy() {
        let temp = site(&SITE_CONFIG.replace(
            "json_output = true",
            "json_output = true\ndelete_old_hash_files = true",
        ));
        let public = temp.path().join("public");

        cachebust(temp.path()).arg("run").assert().success();
        assert!(public.join("js/app.6114f5ad.js").is_file());

        fs::write(public.join("js/app.js"), "x").unwrap();
        cachebust(temp.path())
            .args(["run", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("js/app.6114f5ad.js"));

        assert!(!public.join("js/app.6114f5ad.js").exists());
        assert!(public.join("js/app.9dd4e461.js").is_file());
        let html = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(html.contains(r#"src="js/app.9dd4e461.js""#));
    }

    #[test]
    fn unsupported_algorithm_fails_with_hint() {
        let temp = site(SITE_CONFIG);

        cachebust(temp.path())
            .args(["run", "--algorithm", "md4"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unsupported digest algorithm"))
            .stderr(predicate::str::contains("Hint:"));

        assert!(!temp.path().join("public/cachebust.json").exists());
    }

    #[test]
    fn run_without_assets_fails() {
        let temp = TempDir::new().unwrap();

        cachebust(temp.path())
            .args(["run", "--no-local"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No asset patterns configured"));
    }

    #[test]
    fn map_prints_persisted_map() {
        let temp = site(SITE_CONFIG);
        cachebust(temp.path()).arg("run").assert().success();

        cachebust(temp.path())
            .args(["map", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("js/app.js -> js/app.6114f5ad.js"));
    }

    #[test]
    fn map_missing_reports_error() {
        let temp = site(SITE_CONFIG);

        cachebust(temp.path())
            .arg("map")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Previous asset map not found"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        cachebust(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no-global-config.toml"));
    }

    #[test]
    fn config_show_merges_local() {
        let temp = site(SITE_CONFIG);
        cachebust(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[options]"))
            .stdout(predicate::str::contains("base_dir = \"public\""))
            .stdout(predicate::str::contains("algorithm = \"md5\""));
    }

    #[test]
    fn init_writes_template() {
        let temp = TempDir::new().unwrap();
        cachebust(temp.path()).arg("init").assert().success();
        assert!(temp.path().join(".cachebust.toml").is_file());

        cachebust(temp.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }
}

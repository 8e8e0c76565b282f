//! Init command - create project-local .cachebust.toml

use crate::cli::args::InitArgs;
use crate::config::LOCAL_CONFIG_NAME;
use crate::error::{CachebustError, CachebustResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tokio::fs;

/// Template for project-local config
const INIT_TEMPLATE: &str = r#"# Cachebust project configuration
# Settings here override your global config (~/.config/cachebust/config.toml)

# Assets to fingerprint, relative to options.base_dir. Prefix with ! to exclude.
assets = ["css/**/*.css", "js/**/*.js"]

[options]
# algorithm = "md5"              # md5, sha1, sha256, sha512, blake3
# base_dir = "./"
# length = 16
# separator = "."
# query_string = false           # append ?digest instead of renaming
# create_copies = true
# delete_originals = false
# delete_old_hash_files = false  # needs json_output to remember the last run
# json_output = false
# json_output_filename = "cachebust.json"
# output_dir = ""
# clear_output_dir = false
# hash = "v1"                    # fixed value instead of computed digests

[files]
# Files whose references to the assets get rewritten
# cwd = "."
src = ["**/*.html"]
"#;

/// Execute the init command
pub async fn execute(args: InitArgs) -> CachebustResult<()> {
    let ctx = UiContext::detect();

    let target_dir = match args.path {
        Some(ref p) => p.clone(),
        None => std::env::current_dir()
            .map_err(|e| CachebustError::io("getting current directory", e))?,
    };

    let config_path = target_dir.join(LOCAL_CONFIG_NAME);

    if config_path.exists() && !args.force {
        return Err(CachebustError::User(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        )));
    }

    ensure_dir(&target_dir).await?;

    fs::write(&config_path, INIT_TEMPLATE)
        .await
        .map_err(|e| CachebustError::io(format!("writing {}", config_path.display()), e))?;

    ui::step_ok_detail(
        &ctx,
        "Created project config",
        &config_path.display().to_string(),
    );

    Ok(())
}

async fn ensure_dir(dir: &Path) -> CachebustResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| CachebustError::io(format!("creating directory {}", dir.display()), e))?;
    }
    Ok(())
}

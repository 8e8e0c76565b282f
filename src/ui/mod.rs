//! UI module for consistent CLI output
//!
//! Uses `cliclack` for spinners and styled log lines with automatic
//! fallback to plain output in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use cachebust::ui::{self, TaskSpinner, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Fingerprinting assets...");
//! // ... do work ...
//! spinner.stop("Fingerprinted 12 assets");
//!
//! ui::step_ok(&ctx, "Removed 3 stale files");
//! ui::step_warn_hint(&ctx, "Stale file cleanup skipped", "no previous map");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{intro, remark, step_info, step_ok, step_ok_detail, step_warn_hint};
pub use progress::TaskSpinner;
pub use theme::{init_theme, CachebustTheme};

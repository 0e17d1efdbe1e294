pub const APP_NAME: &str = "gobuild";

/// Environment variable naming the toolchain root on build agents.
pub const TCROOT_ENV: &str = "TCROOT";

/// Used for windows make paths when `TCROOT` is unset.
pub const WINDOWS_TCROOT_FALLBACK: &str = "C:/TCROOT-not-set";

/// Used for agent `PATH` entries when `TCROOT` is unset.
pub const TCROOT_DEFAULT: &str = "/build/toolchain";

pub const DEFAULT_MAKE_VERSION: &str = "3.81";

/// Name of the file under the publish directory holding the product version.
pub const VERSION_FILE: &str = "VERSION";

pub const PUBLISH_DIR: &str = "publish";

//! Names and fixed locations shared by the library and the CLI.

pub const APP_NAME: &str = "anvil";

/// User configuration source expected in the project root.
pub const BUILD_SCRIPT: &str = "build.cpp";

/// Build description handed to the external executor.
pub const BUILD_FILE: &str = "build.ninja";

/// Per-project cache directory holding the configuration executable.
pub const CACHE_DIR: &str = ".anvil";

/// Ninja `builddir`; object files live under `<BUILD_DIR>/<target>/`.
pub const BUILD_DIR: &str = ".anvil_build";

/// Directory linked binaries are written to.
pub const BIN_DIR: &str = "bin";

/// Environment variable selecting the toolchain for `build.cpp` itself.
pub const SCRIPT_COMPILER_ENV: &str = "ANVIL_SCRIPT_COMPILER";

/// Language standard the configuration source is compiled with.
pub const SCRIPT_STANDARD: &str = "c++20";

/// Version advertised over the build server protocol.
pub const BSP_VERSION: &str = "2.1.0";

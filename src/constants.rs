pub const APP_NAME: &str = "nvim-launcher";
pub const CONFIG_FILE_NAME: &str = "launcher.toml";

#[cfg(windows)]
pub const DEFAULT_TARGET: &str = "neovide.exe";
#[cfg(not(windows))]
pub const DEFAULT_TARGET: &str = "neovide";

pub const DEFAULT_FONTS_DIR: &str = "fonts";

pub const DEFAULT_FONTS: [&str; 5] = [
    "FiraCodeNerdFontMono-Medium.ttf",
    "FiraCodeNerdFontMono-Bold.ttf",
    "FiraCodeNerdFontMono-Light.ttf",
    "FiraCodeNerdFontMono-SemiBold.ttf",
    "FiraCodeNerdFontMono-Regular.ttf",
];

/// Install-relative directories appended to `PATH`.
pub const DEFAULT_SEARCH_PATH: [&str; 2] = ["git/bin", "nvim/bin"];

/// Variables pointed at install-relative directories.
pub const DEFAULT_ENV_DIRS: [(&str, &str); 4] = [
    ("XDG_CONFIG_HOME", "config"),
    ("XDG_DATA_HOME", "data"),
    ("XDG_STATE_HOME", "data"),
    ("XDG_CACHE_HOME", "cache"),
];

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

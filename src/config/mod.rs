//! Configuration: `AppConfig` with per-subsystem sub-structs, platform
//! directories via [`AppPaths`], and TOML persistence through
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, AudioConfig, HotkeyConfig, InjectConfig, InjectMethod, RecordingConfig, SttConfig,
};

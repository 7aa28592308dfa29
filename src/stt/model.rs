//! Model registry and GGML path resolution.
//!
//! [`WHISPER_MODELS`] lists the standard whisper.cpp GGML conversions by id.
//! [`ModelPaths`] turns a configured model string into an on-disk path under
//! the models directory, accepting a registry id, a bare file stem, or an
//! explicit `.bin` file name.

use std::path::PathBuf;

use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// ModelSize
// ---------------------------------------------------------------------------

/// Capacity tier of a Whisper GGML model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelSize {
    /// ~75 MB — fastest, lowest accuracy.
    Tiny,
    /// ~142 MB.
    Base,
    /// ~466 MB.
    Small,
    /// ~1.5 GB.
    Medium,
    /// ~3 GB — highest accuracy, slowest.
    Large,
}

// ---------------------------------------------------------------------------
// ModelInfo
// ---------------------------------------------------------------------------

/// Static metadata for one GGML model file.
#[derive(Debug)]
pub struct ModelInfo {
    /// Identifier used in `SttConfig::model` (e.g. `"large-v3-turbo"`).
    pub id: &'static str,
    /// File name under the models directory.
    pub file_name: &'static str,
    /// Capacity tier.
    pub size: ModelSize,
}

/// Standard multilingual whisper.cpp models
/// (<https://huggingface.co/ggerganov/whisper.cpp>).
///
/// `large-v3-turbo` is the default — near-large accuracy at several times
/// the decode speed, which is what dictation latency wants.
pub const WHISPER_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "tiny",
        file_name: "ggml-tiny.bin",
        size: ModelSize::Tiny,
    },
    ModelInfo {
        id: "base",
        file_name: "ggml-base.bin",
        size: ModelSize::Base,
    },
    ModelInfo {
        id: "small",
        file_name: "ggml-small.bin",
        size: ModelSize::Small,
    },
    ModelInfo {
        id: "medium",
        file_name: "ggml-medium.bin",
        size: ModelSize::Medium,
    },
    ModelInfo {
        id: "large-v3",
        file_name: "ggml-large-v3.bin",
        size: ModelSize::Large,
    },
    ModelInfo {
        id: "large-v3-turbo",
        file_name: "ggml-large-v3-turbo.bin",
        size: ModelSize::Large,
    },
];

/// Look up a registry entry by id.
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    WHISPER_MODELS.iter().find(|m| m.id == id)
}

// ---------------------------------------------------------------------------
// ModelPaths
// ---------------------------------------------------------------------------

/// Resolves configured model strings to files under the models directory.
///
/// ```rust,no_run
/// use dictate::config::AppPaths;
/// use dictate::stt::ModelPaths;
///
/// let paths = ModelPaths::from_app_paths(&AppPaths::new());
/// let model_file = paths.resolve("large-v3-turbo");
/// ```
#[derive(Debug, Clone)]
pub struct ModelPaths {
    /// Directory containing GGML `.bin` files.
    pub models_dir: PathBuf,
}

impl ModelPaths {
    /// Build from the application's [`AppPaths`].
    pub fn from_app_paths(app_paths: &AppPaths) -> Self {
        Self {
            models_dir: app_paths.models_dir.clone(),
        }
    }

    /// Construct directly from a models directory (useful in tests).
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    /// Resolve a configured model string to a path under the models
    /// directory.
    ///
    /// Registry ids map to their known file names; a string already ending
    /// in `.bin` is used as a file name verbatim; anything else is treated
    /// as a GGML file stem (`"foo"` → `ggml-foo.bin`).
    pub fn resolve(&self, model: &str) -> PathBuf {
        let file_name = match find_model(model) {
            Some(info) => info.file_name.to_string(),
            None if model.ends_with(".bin") => model.to_string(),
            None => format!("ggml-{model}.bin"),
        };
        self.models_dir.join(file_name)
    }

    /// `true` when the resolved file exists on disk.
    pub fn is_available(&self, model: &str) -> bool {
        self.resolve(model).exists()
    }

    /// Registry models currently present on disk.
    pub fn list_local_models(&self) -> Vec<&'static ModelInfo> {
        WHISPER_MODELS
            .iter()
            .filter(|m| self.is_available(m.id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ids_are_unique() {
        for (i, a) in WHISPER_MODELS.iter().enumerate() {
            for b in &WHISPER_MODELS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.file_name, b.file_name);
            }
        }
    }

    #[test]
    fn find_model_known_id() {
        let m = find_model("large-v3-turbo").expect("registry entry");
        assert_eq!(m.file_name, "ggml-large-v3-turbo.bin");
        assert_eq!(m.size, ModelSize::Large);
    }

    #[test]
    fn find_model_unknown_id() {
        assert!(find_model("does-not-exist").is_none());
    }

    #[test]
    fn resolve_registry_id() {
        let mp = ModelPaths::new("/models");
        let p = mp.resolve("base");
        assert!(p.to_str().unwrap().ends_with("ggml-base.bin"));
    }

    #[test]
    fn resolve_explicit_bin_file() {
        let mp = ModelPaths::new("/models");
        let p = mp.resolve("ggml-custom-ft.bin");
        assert!(p.to_str().unwrap().ends_with("ggml-custom-ft.bin"));
    }

    #[test]
    fn resolve_bare_stem_gets_ggml_prefix() {
        let mp = ModelPaths::new("/models");
        let p = mp.resolve("distil-small.en");
        assert!(p.to_str().unwrap().ends_with("ggml-distil-small.en.bin"));
    }

    #[test]
    fn unavailable_on_nonexistent_dir() {
        let mp = ModelPaths::new("/nonexistent/path");
        assert!(!mp.is_available("base"));
        assert!(mp.list_local_models().is_empty());
    }
}

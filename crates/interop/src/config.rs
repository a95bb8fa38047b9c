use std::env;
use std::path::{Path, PathBuf};

use crate::error::Z3Error;

/// Environment variable that overrides automatic library discovery.
pub const LIBRARY_PATH_ENV: &str = "Z3_LIBRARY_PATH";

/// Where and how `Z3Library::load_auto` looks for the native library.
///
/// Candidates are tried in order. Bare file names (no directory component) are
/// handed to the OS loader, which applies its own search rules; anything with a
/// directory component is only tried if the file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySearch {
    /// Honour `Z3_LIBRARY_PATH` before anything else.
    pub use_env_override: bool,
    /// Platform candidates, in order.
    pub candidates: Vec<PathBuf>,
}

impl LibrarySearch {
    /// Search order for the platform this crate was compiled for.
    pub fn platform_default() -> Self {
        let mut candidates = Vec::new();
        for base in runtime_roots() {
            for name in library_file_names() {
                candidates.push(base.join(runtime_subfolder()).join(name));
            }
        }
        candidates.extend(platform_paths());
        Self {
            use_env_override: true,
            candidates,
        }
    }

    /// An empty search (no override, no candidates).
    pub fn empty() -> Self {
        Self {
            use_env_override: false,
            candidates: Vec::new(),
        }
    }

    /// Append an extra candidate.
    pub fn with_candidate(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.push(path.into());
        self
    }

    /// Ignore `Z3_LIBRARY_PATH`.
    pub fn without_env_override(mut self) -> Self {
        self.use_env_override = false;
        self
    }

    /// Full candidate list, with the environment override first when set.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut all = Vec::with_capacity(self.candidates.len() + 1);
        if self.use_env_override
            && let Some(path) = env::var_os(LIBRARY_PATH_ENV)
            && !path.is_empty()
        {
            all.push(PathBuf::from(path));
        }
        all.extend(self.candidates.iter().cloned());
        all
    }
}

impl Default for LibrarySearch {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Returns `true` when the OS loader should resolve `path` on its own.
pub(crate) fn is_bare_name(path: &Path) -> bool {
    path.parent().is_none_or(|parent| parent.as_os_str().is_empty())
}

/// Validate an explicit path the way `Z3Library::load` requires.
pub(crate) fn validate_explicit(path: &Path) -> Result<(), Z3Error> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(Z3Error::InvalidPath);
    }
    if !path.is_file() {
        return Err(Z3Error::NotFound(path.to_path_buf()));
    }
    Ok(())
}

/// `runtimes/<os>-<arch>/native`, the layout native packages ship with.
fn runtime_subfolder() -> PathBuf {
    let os = match env::consts::OS {
        "windows" => "win",
        "macos" => "osx",
        other => other,
    };
    let arch = match env::consts::ARCH {
        "x86_64" => "x64",
        "x86" => "x86",
        "aarch64" => "arm64",
        other => other,
    };
    Path::new("runtimes")
        .join(format!("{os}-{arch}"))
        .join("native")
}

fn runtime_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(exe) = env::current_exe()
        && let Some(dir) = exe.parent()
    {
        roots.push(dir.to_path_buf());
    }
    if let Ok(cwd) = env::current_dir()
        && !roots.contains(&cwd)
    {
        roots.push(cwd);
    }
    roots
}

fn library_file_names() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["libz3.dll", "z3.dll"]
    } else if cfg!(target_os = "macos") {
        &["libz3.dylib", "z3.dylib"]
    } else {
        &["libz3.so", "z3.so"]
    }
}

fn platform_paths() -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        let mut paths = vec![PathBuf::from("libz3.dll"), PathBuf::from("z3.dll")];
        for var in ["ProgramFiles", "ProgramFiles(x86)"] {
            if let Some(root) = env::var_os(var) {
                let bin = PathBuf::from(root).join("Z3").join("bin");
                paths.push(bin.join("libz3.dll"));
                paths.push(bin.join("z3.dll"));
            }
        }
        paths
    } else if cfg!(target_os = "macos") {
        [
            "libz3.dylib",
            "z3.dylib",
            "/opt/homebrew/opt/z3/lib/libz3.dylib",
            "/usr/local/opt/z3/lib/libz3.dylib",
            "/opt/homebrew/lib/libz3.dylib",
            "/usr/local/lib/libz3.dylib",
            "/usr/lib/libz3.dylib",
            "/System/Library/Frameworks/libz3.dylib",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    } else if cfg!(target_os = "linux") {
        [
            "libz3.so",
            "z3.so",
            "/usr/lib/x86_64-linux-gnu/libz3.so",
            "/usr/lib/libz3.so",
            "/usr/lib64/libz3.so",
            "/usr/local/lib/libz3.so",
            "/opt/z3/lib/libz3.so",
            "/snap/z3/current/lib/libz3.so",
            // Runtime-only packages ship the versioned soname without the dev symlink.
            "libz3.so.4",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    } else {
        [
            "libz3.so",
            "libz3.dylib",
            "libz3.dll",
            "z3.so",
            "z3.dylib",
            "z3.dll",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    }
}

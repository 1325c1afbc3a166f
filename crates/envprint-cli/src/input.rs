//! Resolution of `--profile` arguments and text inputs.

use std::io::Read;
use std::path::Path;

use envprint_core::profile::{builtin_profile, builtin_profile_names, load_profile};
use envprint_core::{HostProfile, ProfileError};

/// Resolves a profile argument.
///
/// Built-in profile names win; anything else is treated as a path to a
/// `.json`, `.yaml` or `.yml` profile file.
pub fn resolve_profile(arg: &str) -> Result<HostProfile, ProfileError> {
    if builtin_profile_names().any(|name| name == arg) {
        return builtin_profile(arg);
    }
    let path = Path::new(arg);
    if path.extension().is_none() && !path.exists() {
        return Err(ProfileError::UnknownBuiltin(arg.to_string()));
    }
    load_profile(path)
}

/// Reads text from a file, or from stdin when `input` is `None` or `-`.
///
/// The text is returned exactly as read, with no trimming.
pub fn read_text(input: Option<&str>) -> std::io::Result<String> {
    match input {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

//! Map provider access token.

use std::path::Path;

use gtviz_common::{GtvizError, Result};
use secrecy::SecretString;
use tracing::debug;

/// Read the plain-text token file. Surrounding whitespace is ignored.
pub fn load_token(path: &Path) -> Result<SecretString> {
    let raw = std::fs::read_to_string(path).map_err(|e| GtvizError::from_io(path, e))?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(GtvizError::Config(format!(
            "map token file {} is empty",
            path.display()
        )));
    }
    debug!("Loaded map token ({} chars) from {}", token.len(), path.display());
    Ok(SecretString::from(token.to_string()))
}

//! User directory seed files.
//!
//! A seed file is a JSON array of user documents:
//!
//! ```json
//! [{"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "displayName": "Professora Ana"}]
//! ```
//!
//! Every entry is validated like any other user document.

use std::path::{Path, PathBuf};

use crate::domain::User;

/// Errors raised while loading a user seed file.
#[derive(Debug, thiserror::Error)]
pub enum UserSeedError {
    #[error("failed to read user seed file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid user seed file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read the users listed in the seed file at `path`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use registros::outbound::seed::load_user_seed;
///
/// let users = load_user_seed(Path::new("/etc/registros/users.json"))?;
/// # let _ = users;
/// # Ok::<(), registros::outbound::seed::UserSeedError>(())
/// ```
pub fn load_user_seed(path: &Path) -> Result<Vec<User>, UserSeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| UserSeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| UserSeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

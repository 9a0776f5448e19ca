// Reader for the recruits list used by `add_recruits`.
//
// The file holds one name per line with no header. Validation of the
// contents (header detection, blank names) is left to the leaderboard service.

use std::io::ErrorKind;
use std::path::Path;

/// Read the member names from `path`.
///
/// Returns `Ok(None)` when the file doesn't exist so the command can say so.
/// A trailing newline doesn't produce an extra empty name.
pub async fn read_member_names(path: impl AsRef<Path>) -> std::io::Result<Option<Vec<String>>> {
    match tokio::fs::read_to_string(path.as_ref()).await {
        Ok(content) => Ok(Some(content.lines().map(str::to_string).collect())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

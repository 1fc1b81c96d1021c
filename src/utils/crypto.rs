use ring::digest::{Context, SHA256};

use crate::core::Hash;
use crate::error::{AssemblyError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as whole seconds since the Unix epoch
pub fn current_timestamp() -> Result<u32> {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AssemblyError::Clock(format!("System time error: {e}")))?
        .as_secs();

    u32::try_from(seconds)
        .map_err(|_| AssemblyError::Clock(format!("Timestamp {seconds} does not fit in 32 bits")))
}

pub fn sha256_digest(data: &[u8]) -> Hash {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(digest.as_ref());
    hash
}

/// SHA-256 applied twice; the second pass runs over the raw first digest.
pub fn double_sha256(data: &[u8]) -> Hash {
    sha256_digest(&sha256_digest(data))
}

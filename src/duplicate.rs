use crate::error::Result;
use crate::models::SignupRecord;
use crate::store::WaitlistStore;

/// Look up `email` (already normalized) among the stored rows. Returns the
/// creation time of the original row when one exists.
///
/// Linear scan over the email column; storage is small and grows by hand,
/// so no index is kept.
pub fn find_existing(store: &dyn WaitlistStore, email: &str) -> Result<Option<i64>> {
    let emails = store.email_column()?;

    let Some(index) = emails.iter().position(|stored| stored == email) else {
        return Ok(None);
    };

    Ok(store
        .row_at(index as u64)?
        .map(|row: SignupRecord| row.created_at))
}

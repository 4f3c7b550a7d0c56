//! Walking the ar members of a binary package.

use crate::control::CONTROL_MEMBER_PREFIX;
use crate::Result;
use std::io::Read;

/// Find the control member of a `.deb` and hand it to `f`.
///
/// Members are read in order and the first one whose name starts with
/// `control.tar` is passed to `f` along with its name. Members before it are
/// skipped by reading through them, so `reader` does not need to be seekable.
/// Returns `Ok(None)` if the archive ends without such a member; anything
/// after the control member is left unread.
pub fn with_control_member<R, T, F>(reader: R, f: F) -> Result<Option<T>>
where
    R: Read,
    F: FnOnce(&str, &mut dyn Read) -> Result<T>,
{
    let mut archive = ar::Archive::new(reader);
    while let Some(entry) = archive.next_entry() {
        let mut entry = entry?;
        let name = String::from_utf8_lossy(entry.header().identifier()).into_owned();
        if name.starts_with(CONTROL_MEMBER_PREFIX) {
            return f(&name, &mut entry).map(Some);
        }
    }
    Ok(None)
}

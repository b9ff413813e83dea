mod classification;
mod entry;
mod raw;

pub use self::classification::Classification;
pub use self::entry::Entry;
pub use self::raw::{RawContent, RawEntry, RawTag};

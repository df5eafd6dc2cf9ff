pub use self::collection::{Collection, RecordUpdate};
pub use self::record::{POTENTIAL_MAX, RawRecord, Record};

mod collection;
mod record;

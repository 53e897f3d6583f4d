pub mod phone;
pub mod record;
pub mod source;
pub mod table;

pub use phone::{subscriber_suffix, SUBSCRIBER_SUFFIX_LEN};
pub use record::{LookupKey, NormalizedRecord, NormalizedTable};
pub use source::{SourceRole, SourceSchema};
pub use table::RawTable;

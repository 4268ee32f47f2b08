pub mod enumeration;
pub mod loaders;
pub mod options;
pub mod outcome;
pub mod record;
pub mod request;

pub use enumeration::{DispositionRecord, EnumField, EnumerationSet, ReviewStatusEntry};
pub use loaders::{load_records_file, parse_records, read_records_from_stdin};
pub use options::{EditMode, EditOptions};
pub use outcome::{RecordWarning, UpdateOutcome, UpdateResult};
pub use record::InputRecord;
pub use request::{EditField, EditFields, TargetIds, UpdateRequest};

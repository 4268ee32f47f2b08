pub mod dispatcher;
pub mod enum_resolver;
pub mod record_classifier;
pub mod request_builder;
pub mod result_aggregator;

pub use dispatcher::Dispatcher;
pub use enum_resolver::EnumResolver;
pub use record_classifier::has_override_fields;
pub use request_builder::{BuildOutput, RequestBuilder};
pub use result_aggregator::{aggregate, EditOutcome};

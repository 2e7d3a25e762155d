pub mod creative;

pub use creative::{clean_modifications, CreativePayload, CreativeRequest, ModificationValue};

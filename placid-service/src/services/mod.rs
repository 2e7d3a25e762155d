pub mod placid;

pub use placid::{Operation, PlacidClient, PlacidError};

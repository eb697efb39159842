mod loader;

pub use loader::{ContextSnapshot, GeofencingContextLoader};

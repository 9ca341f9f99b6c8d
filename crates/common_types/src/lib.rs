//! Types shared between the store and the GraphQL API.

mod native_id;

pub use native_id::{InvalidNativeId, NativeId};

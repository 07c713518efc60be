// Host reflection boundary
//
// The engine's live object graph is consumed through the read-only
// `ReflectionProvider` interface and copied into inert descriptors by the
// adapter. Nothing past this module touches host data.

pub mod adapter;
pub mod host;

pub use adapter::describe;
pub use host::{DumpProvider, HostMember, HostRecord, MemoryProvider, ReflectionProvider};

pub mod key;
pub mod storage;

pub use storage::TtlCache;

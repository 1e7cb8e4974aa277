pub mod mocks;

pub use mocks::refusing_sink;

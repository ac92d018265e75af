mod context;

pub mod check;
pub mod config;
pub mod convert;

pub use context::HandlerContext;

pub mod fx;

pub use fx::Fx;

//! Parameter flattening.
//!
//! - [`ParamLocation`] - where a parameter goes in the HTTP request
//! - [`Parameter`] - one flat, wire-ready `{name, value, location}` entry
//! - [`ParameterBuilder`] - turns typed arguments into [`Parameter`] entries

mod location;
pub use self::location::{InvalidLocation, ParamLocation};

mod param;
pub use self::param::Parameter;

mod builder;
pub use self::builder::{Argument, ParameterBuilder};

pub mod bitstring;
pub mod emit;
pub mod error;
pub mod gen;
pub mod params;
pub mod rules;
pub mod symbols;

pub use error::Error;
pub use gen::generate;
pub use rules::{Field, Instruction, Section};

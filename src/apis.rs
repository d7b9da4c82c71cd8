

pub mod public;

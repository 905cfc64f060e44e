pub mod mnemonic;
pub mod model;
pub mod op;
pub mod word;

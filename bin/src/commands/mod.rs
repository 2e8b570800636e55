pub mod highlight;
pub mod tokens;

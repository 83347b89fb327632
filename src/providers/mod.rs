pub mod fixer;

pub use fixer::FixerSource;

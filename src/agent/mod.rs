pub mod searchargs;

pub use searchargs::SearchArgs;

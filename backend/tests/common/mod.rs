mod test_setup;

pub use test_setup::*;

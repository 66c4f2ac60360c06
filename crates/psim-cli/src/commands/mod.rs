pub mod build;
pub mod flux;
pub mod inspect;

mod clone;
mod credentials;
mod detect;
mod generate;
mod layout;

pub use clone::clone_and_deploy;
pub use detect::detect;
pub use generate::generate;

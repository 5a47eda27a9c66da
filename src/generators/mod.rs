pub mod charset;
pub mod password;

pub use password::{generate_secure_password, GeneratorError, PasswordGenerator, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH};

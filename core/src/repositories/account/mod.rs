//! Account directory module.

mod r#trait;
pub use r#trait::AccountDirectory;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockAccountDirectory;

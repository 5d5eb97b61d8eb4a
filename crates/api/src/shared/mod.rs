pub mod auth;
#[cfg(test)]
pub mod test_context;
pub mod usecase;

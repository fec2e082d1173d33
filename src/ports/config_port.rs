//! Configuration access port trait.
//!
//! Missing or unparsable values read as the supplied default.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    /// Window lengths and counts; negative values read as the default.
    fn get_usize(&self, section: &str, key: &str, default: usize) -> usize;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}

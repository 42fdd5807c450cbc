pub mod driver;
pub mod stealth;

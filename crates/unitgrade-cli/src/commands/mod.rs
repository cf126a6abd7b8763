pub mod convert;
pub mod grade;
pub mod init;
pub mod key;
pub mod units;

pub mod init;

pub use init::init_logging;

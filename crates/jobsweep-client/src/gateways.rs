pub mod local;
pub mod qsub;
pub mod s3;
pub mod tar;

pub use local::LocalFsGateway;
pub use qsub::QsubScheduler;
pub use s3::S3CliStore;
pub use tar::TarArchiver;

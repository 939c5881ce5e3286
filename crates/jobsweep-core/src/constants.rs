/// Terminal lines emitted by the external execution engine. A log that
/// ends in one of these (or contains `PERMANENT_FAIL` anywhere) means
/// the engine has stopped.
pub mod markers {
    pub const CWLTOOL_FINAL: &str = "Final process status is success";
    pub const TOIL_FINAL: &str = "Joining real-time logging server thread.";
    pub const CANCELLED: &str = "KeyboardInterrupt";
    pub const PERMANENT_FAIL: &str = "permanentFail";
}

pub mod files {
    pub const DESCRIPTOR_EXT: &str = "json";
    pub const LOG_SUFFIX: &str = "_LOG.txt";
    pub const WRAPPER_SUFFIX: &str = ".sh";
    pub const ARCHIVE_SUFFIX: &str = ".tar.gz";
    pub const STATUS_LOG: &str = "status.txt";
}

pub mod dirs {
    pub const RESULTS: &str = "results";
}

pub mod pipelines {
    pub const DROPSEQTOOLS: &str = "dropseqtools";
    pub const CELLRANGER: &str = "cellranger";
}

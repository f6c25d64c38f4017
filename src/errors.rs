/// The error type shared by the reading, assembly and serialization modules, file-level problems
/// propagate through this type up to the caller while row-level defects are absorbed and counted
/// by the reader
use thiserror::Error;

#[derive(Debug,Error)]
pub enum AssayDbError
{
    #[error("failed to access the file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse the raw table: {0}")]
    Csv(#[from] csv::Error),

    #[error("the raw table does not carry the two expected header rows")]
    MissingHeader,

    #[error("the raw table is missing the column {0}.{1}")]
    MissingColumn(String,String),

    #[error("failed to serialize the dataset: {0}")]
    Serialization(#[from] bincode::Error),
}

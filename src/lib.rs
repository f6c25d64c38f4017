/// A collection of modules used for consolidating raw peptide-MHC binding assays into one
/// summarized dataset per assay type
///
///
pub mod aggregation;
pub mod assay_reader;
pub mod dataset_builder;
pub mod errors;
pub mod functions;
pub mod records;

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use pmhc_assay_db::functions::{create_assay_database,write_database_to_disk};

/// Turn a raw snapshot of peptide-MHC binding assays into one summarized dataset per assay type,
/// the resulting collection of tables is serialized into a single binary artifact
#[derive(Parser,Debug)]
#[command(name="create_assay_db",about="Group a raw snapshot of peptide-MHC binding assays into one summarized dataset per assay type")]
struct Opt
{
    /// CSV file with the raw binding data
    #[arg(long="input-csv",default_value="mhc_ligand_full.csv")]
    input_csv:PathBuf,

    /// Directory to write the serialized dataset to, created if absent
    #[arg(long="output-dir",default_value="data")]
    output_dir:PathBuf,

    /// Name of the serialized dataset file inside the output directory
    #[arg(long="output-filename",default_value="iedb_human_class1_assay_datasets.bin")]
    output_filename:String,

    /// Accepted allele-name prefix, may be given several times, measurements failing every prefix are dropped
    #[arg(long="allele-prefix",
        default_values_t=["HLA-A".to_string(),"HLA-B".to_string(),"HLA-C".to_string(),"H-2".to_string()])]
    allele_prefixes:Vec<String>,
}

fn main()->anyhow::Result<()>
{
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV,"info")).init();
    let opt=Opt::parse();

    // build the database
    //-------------------
    let database=create_assay_database(&opt.input_csv,&opt.allele_prefixes)
        .with_context(||format!("failed to build the assay database from {}",opt.input_csv.display()))?;

    // write the results
    //------------------
    std::fs::create_dir_all(&opt.output_dir)
        .with_context(||format!("failed to create the output directory {}",opt.output_dir.display()))?;
    let path2res=opt.output_dir.join(&opt.output_filename);
    write_database_to_disk(&database,&path2res)
        .with_context(||format!("failed to write the dataset to {}",path2res.display()))?;
    log::info!("wrote {} assay datasets to {}",database.len(),path2res.display());
    Ok(())
}

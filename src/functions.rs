/// The current module contain the top level functions that are used for creating the assay database
/// and for writing and reloading the serialized artifact
extern crate bincode;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::path::Path;
use bincode::{serialize_into,deserialize_from};
use crate::assay_reader::AssayTable;
use crate::dataset_builder::build_assay_datasets;
use crate::errors::AssayDbError;
use crate::records::AssayDataset;

/// ### Summary
/// run the full pipeline over a raw binding table, i.e. load the table, retain the accepted alleles,
/// partition the measurements by assay type and peptide-MHC identity and collapse every partition
/// into one summarized record
/// ### Parameters
/// path2file: the path to the raw table
/// allele_prefixes: the accepted allele-name prefixes, measurements failing every prefix are dropped
/// ### Returns
/// the assembled dataset, one summarized table per assay type
pub fn create_assay_database(path2file:&Path,
    allele_prefixes:&[String])->Result<AssayDataset,AssayDbError>
{
    let table=AssayTable::read_table(path2file)?;
    let filtered=table.filter_by_allele(allele_prefixes);
    Ok(build_assay_datasets(&filtered))
}

/// ### Summary
/// takes an assembled dataset and write it to the disk using serde, this enable the dataset to be
/// reloaded relatively fast for subsequent usages
/// ### Parameters
/// database: the assembled dataset
/// path2res: the path to write the results, i.e. the serialized dataset
pub fn write_database_to_disk(database:&AssayDataset,path2res:&Path)->Result<(),AssayDbError>
{
    // create a file to hold the results
    let mut f=BufWriter::new(File::create(path2res)?);
    // serialize the results into the generated writer buffer
    serialize_into(&mut f,database)?;
    Ok(())
}

/// ### Summary
/// reload a dataset that has been written with write_database_to_disk
/// ### Parameters
/// path2res: the path where the serialized dataset can be found
pub fn read_database_from_disk(path2res:&Path)->Result<AssayDataset,AssayDbError>
{
    // open the file
    //--------------
    let file_reader=BufReader::new(File::open(path2res)?);
    // load the serialized file
    let res:AssayDataset=deserialize_from(file_reader)?;
    Ok(res)
}

#[cfg(test)]
mod testingFunctions
{
    use super::*;

    const RAW_TABLE:&str="\
MHC,MHC,Epitope,Epitope,Assay,Assay,Assay,Assay
Allele Name,MHC allele class,Description,Starting Position,Assay Group,Method/Technique,Quantitative measurement,Qualitative Measure
HLA-A*02:01,I,SIINFEKL,1,Dissociation constant KD,Fluorescence,500,Positive
HLA-A*02:01,I,SIINFEKL,1,Dissociation constant KD,Fluorescence,50,Positive-High
HLA-B*07:02,I,GILGFVFTL,1,Dissociation constant KD,Fluorescence,20000,Negative
BoLA-1*02301,I,AAAAAAAAA,1,Dissociation constant KD,Fluorescence,100,Positive
";

    #[test]
    fn test_create_write_and_reload_the_database()
    {
        let dir=tempfile::tempdir().unwrap();
        let path2file=dir.path().join("mhc_ligand_full.csv");
        std::fs::write(&path2file,RAW_TABLE).unwrap();
        let prefixes=vec!["HLA-A".to_string(),"HLA-B".to_string(),"HLA-C".to_string(),"H-2".to_string()];

        // build the database from the raw table, the BoLA entry is filtered out
        let database=create_assay_database(&path2file,&prefixes).unwrap();
        assert_eq!(database.len(),1);
        let records=&database[&("Dissociation constant KD".to_string(),"Fluorescence".to_string())];
        assert_eq!(records.len(),2);

        // write the database to the disk and reload it
        let path2res=dir.path().join("iedb_human_class1_assay_datasets.bin");
        write_database_to_disk(&database,&path2res).unwrap();
        let reloaded=read_database_from_disk(&path2res).unwrap();
        assert_eq!(database,reloaded);
    }

    #[test]
    fn test_creating_the_database_twice_yields_the_same_dataset()
    {
        let dir=tempfile::tempdir().unwrap();
        let path2file=dir.path().join("mhc_ligand_full.csv");
        std::fs::write(&path2file,RAW_TABLE).unwrap();
        let prefixes=vec!["HLA-A".to_string(),"HLA-B".to_string()];
        assert_eq!(create_assay_database(&path2file,&prefixes).unwrap(),
            create_assay_database(&path2file,&prefixes).unwrap());
    }

    #[test]
    fn test_create_assay_database_from_a_missing_file()
    {
        let res=create_assay_database(Path::new("/does/not/exist.csv"),&["HLA-A".to_string()]);
        assert!(res.is_err());
    }
}

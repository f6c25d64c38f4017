/// The module contain the functions used for assembling the per-assay summarized datasets out of a
/// filtered assay table
///
use std::collections::HashMap;
use rayon::prelude::*;
use crate::aggregation::summarize_pmhc_partition;
use crate::assay_reader::AssayTable;
use crate::records::{AssayDataset,PmhcKey,RawMeasurement};

/// ### Summary
/// partition the measurements of one assay type by peptide-MHC identity
/// ### Parameters
/// measurements: every measurement recorded with one assay type
/// ### Returns
/// a hashmap linking each (allele, peptide) pair to the measurements recorded for that pair, both
/// key components are matched verbatim
fn group_by_pmhc<'a>(measurements:&[&'a RawMeasurement])->HashMap<PmhcKey,Vec<&'a RawMeasurement>>
{
    let mut partitions:HashMap<PmhcKey,Vec<&'a RawMeasurement>>=HashMap::new();
    for measurement in measurements.iter()
    {
        partitions
            .entry((measurement.get_allele().clone(),measurement.get_peptide().clone()))
            .or_insert_with(Vec::new)
            .push(measurement)
    }
    partitions
}

/// ### Summary
/// assemble the final dataset, i.e. one summarized table per assay type
/// ### Parameters
/// table: the filtered assay table
/// ### Returns
/// a hashmap linking each (assay group, assay method) key to its summarized records, the records of
/// every table are sorted by allele name and peptide so repeated runs over the same input produce
/// identical artifacts
/// ### Notes
/// 1. the assay types are independent of each other, hence rayon is used to summarize them in parallel
/// 2. the discovered assay types are logged by descending size, the ordering is a diagnostic aid only
/// and has no effect on the content of the records
pub fn build_assay_datasets(table:&AssayTable)->AssayDataset
{
    let groups=table.group_by_assay();

    // report the discovered assay types by descending size
    //-----------------------------------------------------
    let mut group_sizes=groups
        .iter()
        .map(|(key,measurements)|(key.clone(),measurements.len()))
        .collect::<Vec<_>>();
    group_sizes.sort_by(|first,second|second.1.cmp(&first.1));
    for ((assay_group,assay_method),size) in group_sizes
    {
        log::info!("{} ({}): {}",assay_group,assay_method,size);
    }

    // summarize every peptide-MHC partition of every assay type
    //----------------------------------------------------------
    groups
        .into_par_iter()
        .map(|((assay_group,assay_method),measurements)|
            {
                let mut records=group_by_pmhc(&measurements)
                    .into_iter()
                    .map(|((allele,peptide),partition)|summarize_pmhc_partition(&allele,&peptide,&partition))
                    .collect::<Vec<_>>();
                records.sort_by(|first,second|
                    (first.get_mhc(),first.get_peptide()).cmp(&(second.get_mhc(),second.get_peptide())));
                log::debug!("# distinct pMHC entries in {} ({}): {}",assay_group,assay_method,records.len());
                ((assay_group,assay_method),records)
            })
        .collect::<HashMap<_,_>>()
}

#[cfg(test)]
mod testingDatasetBuilder
{
    use super::*;
    use std::collections::HashSet;

    fn example_measurements()->Vec<RawMeasurement>
    {
        vec![
            RawMeasurement::new("HLA-A*02:01".to_string(),"SIINFEKL".to_string(),
                "Dissociation constant KD".to_string(),"Fluorescence".to_string(),
                Some(500.0),Some("Positive".to_string())),
            RawMeasurement::new("HLA-A*02:01".to_string(),"SIINFEKL".to_string(),
                "Dissociation constant KD".to_string(),"Fluorescence".to_string(),
                Some(50.0),Some("Positive-High".to_string())),
            RawMeasurement::new("HLA-B*07:02".to_string(),"GILGFVFTL".to_string(),
                "Dissociation constant KD".to_string(),"Fluorescence".to_string(),
                Some(20000.0),Some("Negative".to_string())),
        ]
    }

    #[test]
    fn test_build_assay_datasets()
    {
        let table=AssayTable::from_measurements(example_measurements());
        let datasets=build_assay_datasets(&table);
        assert_eq!(datasets.len(),1);
        let records=&datasets[&("Dissociation constant KD".to_string(),"Fluorescence".to_string())];
        assert_eq!(records.len(),2);
        // the records of a table are sorted by allele name and peptide
        assert_eq!(records[0].get_mhc(),"HLA-A*02:01");
        assert_eq!(records[0].get_peptide(),"SIINFEKL");
        assert_eq!(records[0].get_count(),2);
        // sqrt(500*50)
        assert!((records[0].get_value().unwrap()-158.11388300841898).abs()<1e-6);
        assert_eq!(records[0].get_percent_positive(),Some(1.0));
        assert_eq!(records[1].get_mhc(),"HLA-B*07:02");
        assert_eq!(records[1].get_peptide(),"GILGFVFTL");
        assert_eq!(records[1].get_count(),1);
        assert_eq!(records[1].get_value(),Some(20000.0));
        assert_eq!(records[1].get_percent_positive(),Some(0.0));
    }

    #[test]
    fn test_measurements_of_different_assay_types_are_not_mixed()
    {
        let mut measurements=example_measurements();
        measurements.push(RawMeasurement::new("HLA-A*02:01".to_string(),"SIINFEKL".to_string(),
            "half life".to_string(),"purified MHC".to_string(),
            Some(3600.0),None));
        let table=AssayTable::from_measurements(measurements);
        let datasets=build_assay_datasets(&table);
        assert_eq!(datasets.len(),2);
        let half_life=&datasets[&("half life".to_string(),"purified MHC".to_string())];
        assert_eq!(half_life.len(),1);
        assert_eq!(half_life[0].get_value(),Some(3600.0));
        assert_eq!(half_life[0].get_count(),1);
    }

    #[test]
    fn test_pmhc_identity_is_unique_within_a_table()
    {
        let table=AssayTable::from_measurements(example_measurements());
        let datasets=build_assay_datasets(&table);
        for records in datasets.values()
        {
            let identities=records
                .iter()
                .map(|record|(record.get_mhc().clone(),record.get_peptide().clone()))
                .collect::<HashSet<_>>();
            assert_eq!(identities.len(),records.len());
        }
    }

    #[test]
    fn test_count_only_reflects_quantitative_measurements()
    {
        let measurements=vec![
            RawMeasurement::new("H-2-Kb".to_string(),"SIINFEKL".to_string(),
                "qualitative binding".to_string(),"cellular MHC".to_string(),
                None,Some("Positive".to_string())),
            RawMeasurement::new("H-2-Kb".to_string(),"SIINFEKL".to_string(),
                "qualitative binding".to_string(),"cellular MHC".to_string(),
                None,Some("Negative".to_string())),
            RawMeasurement::new("H-2-Kb".to_string(),"RGYVYQGL".to_string(),
                "qualitative binding".to_string(),"cellular MHC".to_string(),
                Some(25.0),None),
        ];
        let table=AssayTable::from_measurements(measurements);
        let datasets=build_assay_datasets(&table);
        let records=&datasets[&("qualitative binding".to_string(),"cellular MHC".to_string())];
        assert_eq!(records.len(),2);
        // the qualitative-only partition carries no combined value
        assert_eq!(records[0].get_peptide(),"RGYVYQGL");
        assert_eq!(records[0].get_count(),1);
        assert_eq!(records[0].get_percent_positive(),None);
        assert_eq!(records[1].get_peptide(),"SIINFEKL");
        assert_eq!(records[1].get_count(),0);
        assert_eq!(records[1].get_value(),None);
        assert_eq!(records[1].get_percent_positive(),Some(0.5));
    }

    #[test]
    fn test_building_twice_yields_the_same_dataset()
    {
        let table=AssayTable::from_measurements(example_measurements());
        assert_eq!(build_assay_datasets(&table),build_assay_datasets(&table));
    }
}

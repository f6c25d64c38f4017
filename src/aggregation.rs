/// The module contain pure functions used for collapsing one peptide-MHC partition into a single
/// summarized record
///
use crate::records::{RawMeasurement,SummaryRecord};

/// ### Summary
/// combine a collection of strictly positive measurements by taking the median in logarithmic space
/// ### Parameters
/// values: the quantitative values of one partition, every value must be finite and strictly positive
/// ### Returns
/// None when the input is empty, otherwise exp(median(ln(value))), in the two datapoint case the
/// values 10 and 1000 combine to 100 rather than 505, binding measurements span orders of magnitude
/// and a linear mean would be dominated by the largest value
/// ### Notes
/// the logarithm is monotone, hence for an odd number of values the median of the logs is the log of
/// the middle value and that value is returned without a round trip through exp, this keeps the
/// single measurement case exact, for an even number of values the two central logs are averaged
pub fn log_space_median(values:&[f64])->Option<f64>
{
    if values.is_empty()
    {
        return None
    }
    debug_assert!(values.iter().all(|value|value.is_finite() && *value>0.0));
    // sort a copy of the values, the ordering of the values equals the ordering of their logs
    let mut sorted=values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle=sorted.len()/2;
    if sorted.len()%2==1
    {
        Some(sorted[middle])
    }
    else
    {
        Some(((sorted[middle-1].ln()+sorted[middle].ln())/2.0).exp())
    }
}

/// ### Summary
/// compute the fraction of qualitative labels reporting a positive outcome
/// ### Parameters
/// labels: the qualitative outcomes recorded for one partition, e.g. Positive, Positive-High or Negative
/// ### Returns
/// None when no label is present, otherwise the fraction of labels starting with Positive, a number in [0,1]
pub fn percent_positive(labels:&[&str])->Option<f64>
{
    if labels.is_empty()
    {
        return None
    }
    let num_positive=labels.iter().filter(|label|label.starts_with("Positive")).count();
    Some(num_positive as f64/labels.len() as f64)
}

/// ### Summary
/// reduce one peptide-MHC partition, i.e. every measurement recorded for the same allele and peptide
/// under one assay type, into a single summarized record
/// ### Parameters
/// allele: the allele name shared by the partition
/// peptide: the peptide sequence shared by the partition
/// partition: the measurements of the partition, the partition may hold only quantitative, only
/// qualitative or mixed measurements
/// ### Returns
/// a record carrying the combined quantitative value, the fraction of positive qualitative outcomes
/// and the number of quantitative measurements that contributed to the combined value
pub fn summarize_pmhc_partition(allele:&str, peptide:&str,
    partition:&[&RawMeasurement])->SummaryRecord
{
    let quantitative=partition
        .iter()
        .filter_map(|measurement|measurement.get_quantitative())
        .collect::<Vec<_>>();
    let labels=partition
        .iter()
        .filter_map(|measurement|measurement.get_qualitative().map(|label|label.as_str()))
        .collect::<Vec<_>>();
    SummaryRecord::new(allele.to_string(), peptide.to_string(),
        log_space_median(&quantitative), percent_positive(&labels), quantitative.len())
}

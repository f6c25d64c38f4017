/// ## summary
/// Typed representations for the raw assay measurements and the summarized datasets
///
use std::collections::HashMap;
use serde::{Serialize,Deserialize};

/// The identity of one output table, i.e. the (assay group, assay method/technique) pair taken
/// verbatim from the raw table
pub type GroupKey=(String,String);

/// The identity of one summarized row within an output table, i.e. the (allele name, peptide sequence) pair
pub type PmhcKey=(String,String);

/// The assembled dataset, linking every assay type to its summarized table
pub type AssayDataset=HashMap<GroupKey,Vec<SummaryRecord>>;

/// A schematic representation for one row of the raw binding table, the row is composite of the following structure:
/// 1. allele which is the MHC allele name, e.g. HLA-A*02:01
/// 2. peptide which is the amino-acid sequence of the measured epitope
/// 3. assay_group which is the category of the assay, e.g. dissociation constant KD
/// 4. assay_method which is the technique used to measure the binding, e.g. fluorescence anisotropy
/// 5. quantitative which is the measured affinity/stability value, if the assay reported one
/// 6. qualitative which is the categorical outcome of the assay, e.g. Positive-High, if the assay reported one
/// ### Notes
/// quantitative values, when present, are finite and strictly positive, the reader rejects every row
/// violating this before the measurement is constructed
#[derive(Debug,Clone)]
pub struct RawMeasurement
{
    allele:String,
    peptide:String,
    assay_group:String,
    assay_method:String,
    quantitative:Option<f64>,
    qualitative:Option<String>
}

impl RawMeasurement
{
    pub fn new(allele:String, peptide:String,
        assay_group:String, assay_method:String,
        quantitative:Option<f64>, qualitative:Option<String>)->Self
    {
        RawMeasurement
        {
            allele,
            peptide,
            assay_group,
            assay_method,
            quantitative,
            qualitative
        }
    }
    #[inline]
    pub fn get_allele(&self)->&String
    {
        &self.allele
    }

    #[inline]
    pub fn get_peptide(&self)->&String
    {
        &self.peptide
    }

    #[inline]
    pub fn get_assay_group(&self)->&String
    {
        &self.assay_group
    }

    #[inline]
    pub fn get_assay_method(&self)->&String
    {
        &self.assay_method
    }

    #[inline]
    pub fn get_quantitative(&self)->Option<f64>
    {
        self.quantitative
    }

    #[inline]
    pub fn get_qualitative(&self)->Option<&String>
    {
        self.qualitative.as_ref()
    }
}

/// One summarized row of an output table, collapsing every raw measurement of the same peptide-MHC
/// pair under one assay type, the row is composite of the following structure:
/// 1. mhc which is the allele name shared by the collapsed measurements
/// 2. peptide which is the peptide sequence shared by the collapsed measurements
/// 3. value which is the combined quantitative value, i.e. the median of the measurements in logarithmic
/// space, absent when no measurement in the partition carried a quantitative value
/// 4. percent_positive which is the fraction of qualitative labels starting with Positive, absent when
/// no measurement in the partition carried a qualitative label
/// 5. count which is the number of quantitative measurements that contributed to the combined value
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SummaryRecord
{
    mhc:String,
    peptide:String,
    value:Option<f64>,
    percent_positive:Option<f64>,
    count:usize
}

impl SummaryRecord
{
    pub fn new(mhc:String, peptide:String,
        value:Option<f64>, percent_positive:Option<f64>,
        count:usize)->Self
    {
        SummaryRecord
        {
            mhc,
            peptide,
            value,
            percent_positive,
            count
        }
    }
    #[inline]
    pub fn get_mhc(&self)->&String
    {
        &self.mhc
    }

    #[inline]
    pub fn get_peptide(&self)->&String
    {
        &self.peptide
    }

    #[inline]
    pub fn get_value(&self)->Option<f64>
    {
        self.value
    }

    #[inline]
    pub fn get_percent_positive(&self)->Option<f64>
    {
        self.percent_positive
    }

    #[inline]
    pub fn get_count(&self)->usize
    {
        self.count
    }
}

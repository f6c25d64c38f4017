/// A representation for the raw binding-assay table used for reading and filtering peptide-MHC
/// measurements
///
use std::collections::HashMap;
use std::path::Path;
use csv;
use crate::errors::AssayDbError;
use crate::records::{GroupKey,RawMeasurement};

/// The positions of the six consumed columns inside the raw table, resolved once from the two
/// header rows, column j is addressed by the pair (first header row[j], second header row[j])
#[derive(Debug,Clone)]
struct ColumnMap
{
    allele:usize,
    peptide:usize,
    assay_group:usize,
    assay_method:usize,
    quantitative:usize,
    qualitative:usize
}

impl ColumnMap
{
    /// ### Summary
    /// resolve the consumed columns from the two header records
    /// ### Parameters
    /// top: the first header row, holding the column categories, e.g. MHC or Assay
    /// sub: the second header row, holding the column names inside each category
    /// ### Returns
    /// the resolved column map, or an error naming the first consumed column that is absent
    fn from_header_rows(top:&csv::ByteRecord, sub:&csv::ByteRecord)->Result<Self,AssayDbError>
    {
        Ok(ColumnMap
        {
            allele:ColumnMap::find_column(top,sub,"MHC","Allele Name")?,
            peptide:ColumnMap::find_column(top,sub,"Epitope","Description")?,
            assay_group:ColumnMap::find_column(top,sub,"Assay","Assay Group")?,
            assay_method:ColumnMap::find_column(top,sub,"Assay","Method/Technique")?,
            quantitative:ColumnMap::find_column(top,sub,"Assay","Quantitative measurement")?,
            qualitative:ColumnMap::find_column(top,sub,"Assay","Qualitative Measure")?
        })
    }

    /// ### Summary
    /// locate one column by its (category, name) pair
    fn find_column(top:&csv::ByteRecord, sub:&csv::ByteRecord,
        category:&str, name:&str)->Result<usize,AssayDbError>
    {
        for index in 0..top.len().min(sub.len())
        {
            if String::from_utf8_lossy(&top[index]).trim()==category
                && String::from_utf8_lossy(&sub[index]).trim()==name
            {
                return Ok(index)
            }
        }
        Err(AssayDbError::MissingColumn(category.to_string(),name.to_string()))
    }

    /// the index of the right-most consumed column, rows shorter than this cannot be loaded
    #[inline]
    fn max_index(&self)->usize
    {
        self.allele
            .max(self.peptide)
            .max(self.assay_group)
            .max(self.assay_method)
            .max(self.quantitative)
            .max(self.qualitative)
    }
}

/// ### Summary
/// decode one optional field of a record, empty cells load as None
/// ### Notes
/// the IEDB snapshots are latin-1 encoded, the bytes are converted lossily instead of failing the row
fn decode_optional(field:&[u8])->Option<String>
{
    let decoded=String::from_utf8_lossy(field);
    let trimmed=decoded.trim();
    if trimmed.is_empty()
    {
        None
    }
    else
    {
        Some(trimmed.to_string())
    }
}

/// ### Summary
/// parse one data record into a typed measurement
/// ### Returns
/// None when the record cannot be loaded, i.e. when the record is too short to cover every consumed
/// column or when the quantitative field is neither empty nor a finite, strictly positive number,
/// non-positive values would poison the log-space combination downstream and are rejected here
fn parse_measurement(row:&csv::ByteRecord, columns:&ColumnMap)->Option<RawMeasurement>
{
    if row.len()<=columns.max_index()
    {
        return None
    }
    let quantitative=match decode_optional(&row[columns.quantitative])
    {
        Some(field)=>match field.parse::<f64>()
        {
            Ok(value) if value.is_finite() && value>0.0=>Some(value),
            _=>return None
        },
        None=>None
    };
    let qualitative=decode_optional(&row[columns.qualitative]);
    Some(RawMeasurement::new(
        String::from_utf8_lossy(&row[columns.allele]).into_owned(),
        String::from_utf8_lossy(&row[columns.peptide]).into_owned(),
        String::from_utf8_lossy(&row[columns.assay_group]).into_owned(),
        String::from_utf8_lossy(&row[columns.assay_method]).into_owned(),
        quantitative,
        qualitative))
}

/// A typed, row-oriented representation of the raw binding table together with the number of rows
/// that failed to load
#[derive(Debug,Clone)]
pub struct AssayTable
{
    measurements:Vec<RawMeasurement>,
    num_skipped:usize
}

impl AssayTable
{
    /// ### summary
    /// Create a table with a predefined capacity
    /// ### parameters
    /// num_rows: the number of rows in the table, if a None is used, a predefined value of 1,250,000 is used
    fn with_capacity(num_rows:Option<usize>)->Self
    {
        let num_rows=match num_rows
        {
            Some(num_rows)=>num_rows,
            None=>1_250_000, // the row count of the snapshot the tool was developed against
        };
        AssayTable
        {
            measurements:Vec::with_capacity(num_rows),
            num_skipped:0
        }
    }

    /// ### Summary
    /// wrap an already loaded collection of measurements into a table
    pub fn from_measurements(measurements:Vec<RawMeasurement>)->Self
    {
        AssayTable
        {
            measurements,
            num_skipped:0
        }
    }

    /// ### summary
    /// push a data row into the table, rows that cannot be loaded are counted instead of aborting the run
    fn push(&mut self, row:&csv::ByteRecord, columns:&ColumnMap)->()
    {
        match parse_measurement(row,columns)
        {
            Some(measurement)=>self.measurements.push(measurement),
            None=>
            {
                log::debug!("skipping a malformed row at line: {:?}",row.position().map(|position|position.line()));
                self.num_skipped+=1
            }
        }
    }

    /// ### Summary
    /// reads a raw binding table from a user provided file and return an AssayTable instance
    /// ### Parameters
    /// path2file: the path to the file where the table can be found
    /// ### Notes
    /// the table carries a two-level header, hence the reader is created without a header row and the
    /// first two records are consumed as the two header levels, the reader is flexible because the
    /// raw snapshots contain rows with a wrong number of fields, such rows are skipped and counted
    pub fn read_table(path2file:&Path)->Result<Self,AssayDbError>
    {
        // Create a reader
        let mut reader=csv::ReaderBuilder::new().has_headers(false).flexible(true).from_path(path2file)?;
        let mut records=reader.byte_records();

        // resolve the consumed columns from the two header rows
        //------------------------------------------------------
        let top=match records.next()
        {
            Some(record)=>record?,
            None=>return Err(AssayDbError::MissingHeader)
        };
        let sub=match records.next()
        {
            Some(record)=>record?,
            None=>return Err(AssayDbError::MissingHeader)
        };
        let columns=ColumnMap::from_header_rows(&top,&sub)?;

        // Create a empty table to be filled with the file content
        let mut results=AssayTable::with_capacity(None);

        // fill the file content into the table
        for record in records
        {
            results.push(&record?,&columns)
        }
        log::info!("# total: {}",results.len());
        if results.num_skipped>0
        {
            log::info!("# skipped rows: {}",results.num_skipped);
        }
        // return the filled table
        Ok(results)
    }

    /// ### Summary
    /// retain only the measurements whose allele name starts with at least one of the accepted prefixes
    /// ### Parameters
    /// prefixes: the accepted species/locus prefixes, matched case-sensitively against the start of the
    /// allele name, no normalization is applied
    /// ### Returns
    /// a new table holding the matching measurements, an input without any match yields an empty table
    /// ### Notes
    /// the per-prefix match counts are logged, the counts are a diagnostic aid only
    pub fn filter_by_allele(&self, prefixes:&[String])->AssayTable
    {
        for prefix in prefixes
        {
            let num_matching=self.measurements
                .iter()
                .filter(|measurement|measurement.get_allele().starts_with(prefix.as_str()))
                .count();
            log::info!("# {}: {}",prefix,num_matching);
        }
        let retained=self.measurements
            .iter()
            .filter(|measurement|prefixes.iter().any(|prefix|measurement.get_allele().starts_with(prefix.as_str())))
            .cloned()
            .collect::<Vec<_>>();
        log::info!("# entries matching allele prefixes: {}",retained.len());
        AssayTable
        {
            measurements:retained,
            num_skipped:self.num_skipped
        }
    }

    /// ### Summary
    /// partition the table by assay type
    /// ### Returns
    /// a hashmap linking each (assay group, assay method) key to the measurements recorded with that
    /// assay type, both key components are taken verbatim from the measurements
    pub fn group_by_assay(&self)->HashMap<GroupKey,Vec<&RawMeasurement>>
    {
        let mut groups:HashMap<GroupKey,Vec<&RawMeasurement>>=HashMap::new();
        for measurement in self.measurements.iter()
        {
            groups
                .entry((measurement.get_assay_group().clone(),measurement.get_assay_method().clone()))
                .or_insert_with(Vec::new)
                .push(measurement)
        }
        groups
    }

    #[inline]
    pub fn measurements(&self)->&[RawMeasurement]
    {
        &self.measurements
    }

    #[inline]
    pub fn len(&self)->usize
    {
        self.measurements.len()
    }

    #[inline]
    pub fn is_empty(&self)->bool
    {
        self.measurements.is_empty()
    }

    /// the number of rows of the source file that could not be loaded
    #[inline]
    pub fn num_skipped(&self)->usize
    {
        self.num_skipped
    }
}

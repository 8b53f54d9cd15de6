//! JSON record input and output for the command-line tool

use crate::config::SortSpec;
use crate::error::{SortContext, SortError, SortResult};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Read one JSON array of objects from `reader`
pub fn read_records<R: Read>(reader: R, source_name: &str) -> SortResult<Vec<Value>> {
    let value: Value =
        serde_json::from_reader(reader).map_err(|e| SortError::json(source_name, e))?;

    let Value::Array(records) = value else {
        return Err(SortError::invalid_input(&format!(
            "{source_name}: expected a JSON array of objects"
        )));
    };

    if let Some(position) = records.iter().position(|record| !record.is_object()) {
        return Err(SortError::invalid_input(&format!(
            "{source_name}: element {position} is not an object"
        )));
    }

    Ok(records)
}

/// Read and concatenate records from files, `-` meaning stdin
pub fn read_inputs(files: &[String]) -> SortResult<Vec<Value>> {
    if files.is_empty() {
        return read_records(io::stdin().lock(), "<stdin>");
    }

    if files.iter().filter(|file| file.as_str() == "-").count() > 1 {
        return Err(SortError::invalid_input("standard input ('-') given more than once"));
    }

    let mut records = Vec::new();
    for file in files {
        let batch = if file == "-" {
            read_records(io::stdin().lock(), "<stdin>")?
        } else {
            let handle = File::open(Path::new(file)).with_file_context(file)?;
            read_records(BufReader::new(handle), file)?
        };
        debug!(file = %file, records = batch.len(), "read input");
        records.extend(batch);
    }
    Ok(records)
}

/// Load a sort specification from a JSON file
pub fn read_spec_file(path: &str) -> SortResult<SortSpec> {
    let handle = File::open(Path::new(path)).with_file_context(path)?;
    serde_json::from_reader(BufReader::new(handle)).map_err(|e| SortError::json(path, e))
}

/// Write records as a JSON array
pub fn write_records<W: Write>(writer: W, records: &[Value], compact: bool) -> SortResult<()> {
    let mut writer = BufWriter::new(writer);
    let result = if compact {
        serde_json::to_writer(&mut writer, records)
    } else {
        serde_json::to_writer_pretty(&mut writer, records)
    };
    result.map_err(|e| SortError::json("<output>", e))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write records to `output`, or stdout when `None`
pub fn write_output(output: Option<&str>, records: &[Value], compact: bool) -> SortResult<()> {
    match output {
        Some(path) => {
            let handle = File::create(Path::new(path)).with_file_context(path)?;
            write_records(handle, records, compact)
        }
        None => write_records(io::stdout().lock(), records, compact),
    }
}

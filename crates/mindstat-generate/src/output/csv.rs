use mindstat_core::{Record, header};

/// Serialize records as delimited text: header row first, rows joined by
/// `\n` with no trailing line end, values quoted only when they contain the
/// delimiter, a quote or a newline.
pub fn dataset_to_csv(records: &[Record], delimiter: u8) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(header())?;
    for record in records {
        writer.write_record(record.to_row())?;
    }

    let mut buffer = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
    }
    Ok(buffer)
}
